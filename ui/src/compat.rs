// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

use crate::errors::InputError;

/// Sender the paste listener delivers images (or failures) into.
pub type PasteSink = futures_channel::mpsc::UnboundedSender<crate::workflow::Picked>;

/// Maps what the browser exposes to whether an async clipboard read can be
/// attempted. Insecure origins have no `navigator.clipboard`, and some
/// browsers ship one without `read`.
pub fn clipboard_support(has_clipboard: bool, has_read: bool) -> Result<(), InputError> {
    if has_clipboard && has_read {
        Ok(())
    } else {
        Err(InputError::ClipboardUnsupported)
    }
}

/// Name given to images that arrive without one.
pub fn clipboard_file_name(media_type: &str) -> String {
    let extension = media_type
        .strip_prefix("image/")
        .and_then(|subtype| subtype.split(['+', ';']).next())
        .filter(|ext| !ext.is_empty())
        .unwrap_or("png");
    format!("pasted-image.{}", extension)
}

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use js_sys::Array;
    use js_sys::Uint8Array;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use js_sys::Reflect;
    use web_sys::{self, Blob, BlobPropertyBag, Clipboard, ClipboardEvent, ClipboardItem, File, Url, Window};

    use super::clipboard_file_name;
    use super::clipboard_support;
    use super::PasteSink;
    use crate::errors::InputError;
    use crate::image::ImageBlob;
    use crate::image::Preview;
    use crate::workflow::PickStamp;

    /// Origin the page was served from; the proxy lives there too.
    pub fn origin() -> String {
        web_sys::window()
            .and_then(|win: Window| win.location().origin().ok())
            .unwrap_or_default()
    }

    fn describe(value: &JsValue) -> String {
        value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value))
    }

    async fn blob_bytes(blob: &Blob) -> Result<Vec<u8>, JsValue> {
        let buffer = JsFuture::from(blob.array_buffer()).await?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }

    /// Wraps the image in an object URL, revoked when the preview drops.
    pub fn create_preview(image: &ImageBlob) -> Result<Preview, InputError> {
        let bytes = Uint8Array::from(image.bytes());
        let options = BlobPropertyBag::new();
        options.set_type(image.media_type());
        let blob = Blob::new_with_u8_array_sequence_and_options(&Array::of1(&bytes), &options)
            .map_err(|e| InputError::Preview(describe(&e)))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| InputError::Preview(describe(&e)))?;

        Ok(Preview::new(url, |url| {
            let _ = Url::revoke_object_url(url);
        }))
    }

    /// `navigator.clipboard`, checked before use. The generated bindings
    /// would otherwise throw on a missing object instead of rejecting.
    fn async_clipboard() -> Result<Clipboard, InputError> {
        let navigator = web_sys::window()
            .ok_or(InputError::ClipboardUnsupported)?
            .navigator();
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null());
        let has_read = clipboard
            .as_ref()
            .and_then(|c| c.dyn_ref::<js_sys::Object>())
            .is_some_and(|c| Reflect::has(c, &JsValue::from_str("read")).unwrap_or(false));
        clipboard_support(clipboard.is_some(), has_read)?;
        clipboard
            .map(|c| c.unchecked_into::<Clipboard>())
            .ok_or(InputError::ClipboardUnsupported)
    }

    /// Reads the first image from the async clipboard API.
    pub async fn read_clipboard_image() -> Result<ImageBlob, InputError> {
        let clipboard = async_clipboard()?;

        let items = JsFuture::from(clipboard.read())
            .await
            .map_err(|e| InputError::ClipboardDenied {
                reason: describe(&e),
            })?;
        let items: Array = items
            .dyn_into()
            .map_err(|_| InputError::NoImageInClipboard)?;

        for item in items.iter() {
            let Ok(item) = item.dyn_into::<ClipboardItem>() else {
                continue;
            };
            let media_type = item
                .types()
                .iter()
                .filter_map(|t| t.as_string())
                .find(|t| t.starts_with("image/"));
            let Some(media_type) = media_type else {
                continue;
            };

            let blob: Blob = JsFuture::from(item.get_type(&media_type))
                .await
                .map_err(|e| InputError::FileRead(describe(&e)))?
                .dyn_into()
                .map_err(|_| InputError::NoImageInClipboard)?;
            let bytes = blob_bytes(&blob)
                .await
                .map_err(|e| InputError::FileRead(describe(&e)))?;
            return ImageBlob::new(clipboard_file_name(&media_type), Some(&media_type), bytes);
        }

        Err(InputError::NoImageInClipboard)
    }

    fn pasted_image_file(event: &ClipboardEvent) -> Option<File> {
        let items = event.clipboard_data()?.items();
        (0..items.length())
            .filter_map(|i| items.get(i))
            .find(|item| item.kind() == "file" && item.type_().starts_with("image/"))
            .and_then(|item| item.get_as_file().ok().flatten())
    }

    /// A window-level `paste` listener. Removed from the window on drop.
    pub struct PasteSubscription {
        window: Window,
        listener: Closure<dyn FnMut(ClipboardEvent)>,
    }

    impl PasteSubscription {
        pub fn register(sink: PasteSink) -> Result<Self, String> {
            let window = web_sys::window().ok_or_else(|| "no window".to_string())?;

            let listener = Closure::<dyn FnMut(ClipboardEvent)>::new(move |event: ClipboardEvent| {
                let stamp = PickStamp::next();
                let Some(file) = pasted_image_file(&event) else {
                    let _ = sink.unbounded_send((stamp, Err(InputError::NoImageInClipboard)));
                    return;
                };
                event.prevent_default();

                let sink = sink.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let media_type = file.type_();
                    let name = Some(file.name())
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| clipboard_file_name(&media_type));
                    let picked = match blob_bytes(&file).await {
                        Ok(bytes) => ImageBlob::new(name, Some(&media_type), bytes),
                        Err(e) => Err(InputError::FileRead(describe(&e))),
                    };
                    let _ = sink.unbounded_send((stamp, picked));
                });
            });

            window
                .add_event_listener_with_callback("paste", listener.as_ref().unchecked_ref())
                .map_err(|e| describe(&e))?;

            Ok(Self { window, listener })
        }
    }

    impl Drop for PasteSubscription {
        fn drop(&mut self) {
            let _ = self
                .window
                .remove_event_listener_with_callback("paste", self.listener.as_ref().unchecked_ref());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    use super::PasteSink;
    use crate::errors::InputError;
    use crate::image::ImageBlob;
    use crate::image::Preview;

    /// Address `dx serve` listens on; only used outside the browser.
    const LOCAL_ORIGIN: &str = "http://127.0.0.1:8080";

    pub fn origin() -> String {
        LOCAL_ORIGIN.to_string()
    }

    /// Inline `data:` URL; there is nothing to release.
    pub fn create_preview(image: &ImageBlob) -> Result<Preview, InputError> {
        Ok(Preview::unmanaged(format!(
            "data:{};base64,{}",
            image.media_type(),
            BASE64.encode(image.bytes())
        )))
    }

    pub async fn read_clipboard_image() -> Result<ImageBlob, InputError> {
        Err(InputError::ClipboardUnsupported)
    }

    /// No window to listen on; holds nothing.
    pub struct PasteSubscription;

    impl PasteSubscription {
        pub fn register(_sink: PasteSink) -> Result<Self, String> {
            Ok(Self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasted_names_follow_media_type() {
        assert_eq!(clipboard_file_name("image/png"), "pasted-image.png");
        assert_eq!(clipboard_file_name("image/svg+xml"), "pasted-image.svg");
        assert_eq!(clipboard_file_name("application/octet-stream"), "pasted-image.png");
    }

    #[test]
    fn clipboard_needs_both_object_and_read() {
        assert!(clipboard_support(true, true).is_ok());
        assert!(matches!(
            clipboard_support(false, false),
            Err(InputError::ClipboardUnsupported)
        ));
        assert!(matches!(
            clipboard_support(true, false),
            Err(InputError::ClipboardUnsupported)
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn native_clipboard_read_reports_unsupported() {
        let outcome = read_clipboard_image().await;
        assert!(matches!(outcome, Err(InputError::ClipboardUnsupported)));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_preview_is_a_data_url() {
        let image =
            crate::image::ImageBlob::new("a.png", Some("image/png"), vec![1, 2, 3]).unwrap();
        let preview = create_preview(&image).unwrap();
        assert_eq!(preview.url(), "data:image/png;base64,AQID");
    }
}
