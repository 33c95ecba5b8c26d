// The client-side Dioxus application logic.

use dioxus::prelude::*;

pub mod client;
pub mod compat;
mod components;
pub mod errors;
pub mod hooks;
pub mod image;
pub mod reply;
mod screens;
pub mod view;
pub mod workflow;

use components::pico::Container;
use screens::geolocate::GeolocateScreen;

const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css";

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let app_css = r#"
    /* --- DROP ZONE --- */
    .drop-zone {
        border: 2px dashed var(--pico-muted-border-color);
        border-radius: var(--pico-border-radius);
        padding: 1.5rem;
        margin-bottom: 1rem;
        text-align: center;
        transition: border-color 0.15s, background-color 0.15s;
    }

    .drop-zone.dragging {
        border-color: var(--pico-primary);
        background-color: color-mix(in srgb, var(--pico-primary), transparent 94%);
    }

    .picker-actions {
        display: flex;
        flex-wrap: wrap;
        gap: 0.5rem;
        justify-content: center;
    }

    .picker-actions > * { margin-bottom: 0; }

    /* --- PREVIEW --- */
    .preview { text-align: center; margin: 1rem 0; }
    .preview img {
        max-height: 360px;
        max-width: 100%;
        border-radius: var(--pico-border-radius);
        object-fit: contain;
    }

    .empty-state {
        display: flex;
        flex-direction: column;
        align-items: center;
        padding: 2rem;
        margin: 1rem 0;
        text-align: center;
        color: var(--pico-muted-color);
        background-color: var(--pico-card-sectioning-background-color);
        border-radius: var(--pico-border-radius);
    }

    .empty-state-icon { font-size: 12vmin; margin-bottom: 1rem; opacity: 0.8; }

    /* --- RESULT --- */
    .result-panel { margin-top: 1rem; }
    .result-panel td { font-family: var(--pico-font-family-monospace); }
"#;

    rsx! {
        document::Title { "GeoLens" }
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: PICO_CSS,
        }
        style {
            "{app_css}"
        }
        Container {
            header {
                h1 { "GeoLens" }
                p { "Estimate where a photo was taken." }
            }
            GeolocateScreen {}
        }
    }
}
