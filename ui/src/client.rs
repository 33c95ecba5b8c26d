//! Browser-side call to the upload proxy.

use api::GeoLocation;
use api::ImageUpload;
use api::GEOLOCATE_PATH;

use crate::compat;
use crate::errors::SubmitError;
use crate::reply::interpret_reply;

/// Posts `upload` to the proxy on the page's own origin.
pub async fn geolocate(upload: ImageUpload) -> Result<GeoLocation, SubmitError> {
    let url = format!("{}{}", compat::origin(), GEOLOCATE_PATH);
    geolocate_at(&url, upload).await
}

/// Posts `upload` as multipart to `url` and interprets the answer.
pub async fn geolocate_at(url: &str, upload: ImageUpload) -> Result<GeoLocation, SubmitError> {
    let transport = |e: reqwest::Error| SubmitError::Transport(e.to_string());

    let form = upload.into_form().map_err(transport)?;
    let response = reqwest::Client::new()
        .post(url)
        .multipart(form)
        .send()
        .await
        .map_err(transport)?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(transport)?;
    interpret_reply(status, &body)
}
