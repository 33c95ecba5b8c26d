//! The picked image and its preview handle.

use std::fmt;
use std::sync::Arc;

use api::ImageUpload;
use api::MAX_UPLOAD_BYTES;

use crate::errors::InputError;

/// Bytes of a picked image plus what we know about them.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBlob {
    file_name: String,
    media_type: String,
    bytes: Arc<[u8]>,
}

impl ImageBlob {
    /// Validates a picked file.
    ///
    /// The media type is taken from `declared_type` when it names an image,
    /// otherwise sniffed from the bytes, otherwise guessed from the file
    /// extension.
    pub fn new(
        file_name: impl Into<String>,
        declared_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self, InputError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(InputError::Empty);
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(InputError::TooLarge {
                size: bytes.len(),
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let declared = declared_type.map(str::trim).filter(|t| !t.is_empty());
        let media_type = declared
            .filter(|t| is_image_type(t))
            .map(str::to_string)
            .or_else(|| sniff_media_type(&bytes))
            .or_else(|| media_type_from_name(&file_name))
            .ok_or_else(|| {
                InputError::NotAnImage(declared.unwrap_or("unknown type").to_string())
            })?;

        Ok(Self {
            file_name,
            media_type,
            bytes: bytes.into(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_upload(&self) -> ImageUpload {
        ImageUpload::new(&self.file_name, &self.media_type, self.bytes.to_vec())
    }
}

impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn is_image_type(media_type: &str) -> bool {
    media_type.to_ascii_lowercase().starts_with("image/")
}

fn sniff_media_type(bytes: &[u8]) -> Option<String> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

fn media_type_from_name(file_name: &str) -> Option<String> {
    image::ImageFormat::from_path(file_name)
        .ok()
        .map(|format| format.to_mime_type().to_string())
        .filter(|t| is_image_type(t))
}

/// A displayable reference to the picked image.
///
/// In the browser this is an object URL that has to be revoked; the release
/// runs exactly once, when the preview is dropped.
pub struct Preview {
    url: String,
    release: Option<Box<dyn FnOnce(&str)>>,
}

impl Preview {
    pub fn new(url: impl Into<String>, release: impl FnOnce(&str) + 'static) -> Self {
        Self {
            url: url.into(),
            release: Some(Box::new(release)),
        }
    }

    /// A preview that owns nothing, e.g. a `data:` URL.
    pub fn unmanaged(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            release: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(&self.url);
        }
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview")
            .field("url", &self.url)
            .field("managed", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn declared_image_type_is_kept() {
        let blob = ImageBlob::new("photo", Some("image/heic"), vec![1, 2, 3]).unwrap();
        assert_eq!(blob.media_type(), "image/heic");
        assert_eq!(blob.len(), 3);
    }

    #[test]
    fn media_type_is_sniffed_when_not_declared() {
        let blob = ImageBlob::new("clip", None, PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(blob.media_type(), "image/png");

        let mislabeled = ImageBlob::new("clip", Some("text/plain"), PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(mislabeled.media_type(), "image/png");
    }

    #[test]
    fn extension_is_the_last_resort() {
        let blob = ImageBlob::new("beach.JPG", Some(""), vec![7, 7, 7]).unwrap();
        assert_eq!(blob.media_type(), "image/jpeg");
    }

    #[test]
    fn non_images_are_rejected() {
        assert_eq!(
            ImageBlob::new("notes.txt", Some("text/plain"), b"hello".to_vec()),
            Err(InputError::NotAnImage("text/plain".to_string()))
        );
        assert_eq!(
            ImageBlob::new("blob", None, b"hello".to_vec()),
            Err(InputError::NotAnImage("unknown type".to_string()))
        );
    }

    #[test]
    fn empty_and_oversized_files_are_rejected() {
        assert_eq!(
            ImageBlob::new("a.png", Some("image/png"), vec![]),
            Err(InputError::Empty)
        );
        let too_big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        assert!(matches!(
            ImageBlob::new("a.png", Some("image/png"), too_big),
            Err(InputError::TooLarge { .. })
        ));
    }

    #[test]
    fn upload_carries_name_type_and_bytes() {
        let blob = ImageBlob::new("a.png", None, PNG_MAGIC.to_vec()).unwrap();
        let upload = blob.to_upload();
        assert_eq!(upload.file_name, "a.png");
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.bytes, PNG_MAGIC);
    }

    #[test]
    fn preview_releases_once_on_drop() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let log = released.clone();
        let preview = Preview::new("blob:1", move |url| log.borrow_mut().push(url.to_string()));
        assert_eq!(preview.url(), "blob:1");
        assert!(released.borrow().is_empty());
        drop(preview);
        assert_eq!(*released.borrow(), vec!["blob:1".to_string()]);
    }
}
