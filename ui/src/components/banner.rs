use dioxus::prelude::*;

/// A short error message shown inline.
#[component]
pub fn ErrorBanner(message: String) -> Element {
    rsx! {
        p {
            role: "alert",
            style: "color: var(--pico-color-red-500);",
            "{message}"
        }
    }
}
