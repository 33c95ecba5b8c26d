//! The image payload as it travels over either multipart hop.

use crate::UPLOAD_FIELD;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Builds a multipart form with the image in the `file` field.
    ///
    /// Fails only when `content_type` is not a parsable media type.
    pub fn into_form(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let part = reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        Ok(reqwest::multipart::Form::new().part(UPLOAD_FIELD, part))
    }
}
