//=============================================================================
// File: src/screens/geolocate.rs
//=============================================================================
use dioxus::prelude::*;
use futures::StreamExt;

use crate::client;
use crate::compat;
use crate::components::banner::ErrorBanner;
use crate::components::empty_state::EmptyState;
use crate::components::image_picker::ImagePicker;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::result_panel::ResultPanel;
use crate::hooks::use_paste_listener::use_paste_listener;
use crate::view;
use crate::view::Body;
use crate::workflow::PickStamp;
use crate::workflow::Picked;
use crate::workflow::Workflow;

/// Attaches a preview to a freshly acquired image and hands it to the
/// workflow, or records why acquisition failed. Outcomes overtaken by a
/// later pick are dropped.
fn accept_image(mut workflow: Signal<Workflow>, (stamp, picked): Picked) {
    let current = workflow.write().claim_pick(stamp);
    if !current {
        return;
    }
    let prepared = picked.and_then(|image| {
        let preview = compat::create_preview(&image)?;
        Ok((image, preview))
    });
    match prepared {
        Ok((image, preview)) => workflow.write().select(image, preview),
        Err(e) => workflow.write().reject_input(e),
    }
}

#[component]
pub fn GeolocateScreen() -> Element {
    // Dropping the workflow with the component releases the preview.
    let mut workflow = use_signal(Workflow::new);

    let pastes = use_coroutine(
        move |mut rx: UnboundedReceiver<Picked>| async move {
            while let Some(picked) = rx.next().await {
                accept_image(workflow, picked);
            }
        },
    );
    use_paste_listener(pastes.tx());

    let screen = view::render(&workflow.read());
    let loading = screen.body.is_loading();

    let submit = move |_| {
        let Some(ticket) = workflow.write().begin_submit() else {
            return;
        };
        spawn(async move {
            let outcome = client::geolocate(ticket.upload()).await;
            if workflow.write().complete(&ticket, outcome).is_stale() {
                dioxus_logger::tracing::info!("ignored a reply for a replaced image");
            }
        });
    };

    let paste_from_clipboard = move |_| {
        let stamp = PickStamp::next();
        spawn(async move {
            let picked = compat::read_clipboard_image().await;
            accept_image(workflow, (stamp, picked));
        });
    };

    rsx! {
        Card {
            h2 {
                "Where was this photo taken?"
            }

            if let Some(notice) = screen.notice.clone() {
                ErrorBanner { message: notice }
            }

            ImagePicker {
                on_pick: move |picked| accept_image(workflow, picked),
                on_paste_click: paste_from_clipboard,
            }

            match screen.preview_url.clone() {
                Some(url) => rsx! {
                    figure {
                        class: "preview",
                        img {
                            src: "{url}",
                            alt: "Selected image",
                        }
                        if let Some(name) = screen.file_name.clone() {
                            figcaption { "{name}" }
                        }
                    }
                },
                None => rsx! {
                    EmptyState {
                        title: "No image selected",
                        description: "Pick, drop or paste a photo to estimate where it was taken.".to_string(),
                        icon: rsx! { "🌍" },
                    }
                },
            }

            div {
                class: "picker-actions",
                Button {
                    disabled: !screen.can_submit,
                    busy: loading,
                    on_click: submit,
                    if loading { "Locating..." } else { "Geolocate" }
                }
                if screen.preview_url.is_some() {
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        on_click: move |_| workflow.write().clear(),
                        "Clear"
                    }
                }
            }

            if screen.waiting_on_previous {
                p {
                    small { "Waiting for the previous request to finish..." }
                }
            }

            match screen.body.clone() {
                Body::Loading => rsx! {
                    progress {}
                },
                Body::Failed(message) => rsx! {
                    ErrorBanner { message }
                },
                Body::Located(location) => rsx! {
                    ResultPanel { location }
                },
                Body::NoImage | Body::Ready => rsx! {},
            }
        }
    }
}
