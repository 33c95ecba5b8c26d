//! The components module contains all shared components for our app. Components are the building blocks of dioxus apps.
//! They can be used to defined common UI elements like buttons, forms, and modals.
pub mod banner;
pub mod empty_state;
pub mod image_picker;
pub mod pico;
pub mod result_panel;
