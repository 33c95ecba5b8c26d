//! Turns the proxy's HTTP answer into a location or a displayable error.

use api::ErrorBody;
use api::GeoLocation;

use crate::errors::SubmitError;

pub fn interpret_reply(status: u16, body: &str) -> Result<GeoLocation, SubmitError> {
    if !(200..300).contains(&status) {
        return Err(match ErrorBody::message_from_json(body) {
            Some(message) => SubmitError::Upstream { status, message },
            None => SubmitError::Status(status),
        });
    }

    let location: GeoLocation =
        serde_json::from_str(body).map_err(|e| SubmitError::Malformed(e.to_string()))?;
    location
        .validate()
        .map_err(|e| SubmitError::Malformed(e.to_string()))
}
