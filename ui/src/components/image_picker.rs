//=============================================================================
// File: src/components/image_picker.rs
//=============================================================================
use dioxus::html::FileData;
use dioxus::html::HasFileData;
use dioxus::prelude::*;

use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::errors::InputError;
use crate::image::ImageBlob;
use crate::workflow::PickStamp;
use crate::workflow::Picked;

/// Reads a picked or dropped file into a validated image.
async fn read_picked(file: Option<FileData>) -> Result<ImageBlob, InputError> {
    let file = file.ok_or(InputError::NoFile)?;
    let name = file.name();
    let declared_type = file.content_type();
    let bytes = file
        .read_bytes()
        .await
        .map_err(|e| InputError::FileRead(e.to_string()))?;
    ImageBlob::new(name, declared_type.as_deref(), bytes.to_vec())
}

/// Drop zone, file chooser and clipboard button.
///
/// Every acquisition attempt, good or bad, is reported through `on_pick`,
/// stamped when the user started it.
/// `on_paste_click` asks the parent to read the clipboard.
#[component]
pub fn ImagePicker(
    on_pick: EventHandler<Picked>,
    on_paste_click: EventHandler<()>,
) -> Element {
    let mut dragging = use_signal(|| false);

    rsx! {
        div {
            class: if dragging() { "drop-zone dragging" } else { "drop-zone" },
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: move |evt| {
                evt.prevent_default();
                dragging.set(false);
                let file = evt.files().into_iter().next();
                let stamp = PickStamp::next();
                spawn(async move {
                    on_pick.call((stamp, read_picked(file).await));
                });
            },
            p { "Drag an image here, paste it with Ctrl+V, or" }
            div {
                class: "picker-actions",
                label {
                    role: "button",
                    class: "outline",
                    r#for: "image-input",
                    "Choose image"
                }
                input {
                    id: "image-input",
                    r#type: "file",
                    accept: "image/*",
                    hidden: true,
                    onchange: move |evt| {
                        let file = evt.files().into_iter().next();
                        let stamp = PickStamp::next();
                        spawn(async move {
                            on_pick.call((stamp, read_picked(file).await));
                        });
                    },
                }
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| on_paste_click.call(()),
                    "Paste from clipboard"
                }
            }
        }
    }
}
