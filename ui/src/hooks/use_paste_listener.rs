//=============================================================================
// File: src/hooks/use_paste_listener.rs
//=============================================================================
use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::compat::PasteSink;
use crate::compat::PasteSubscription;

/// Forwards window-level pastes into `sink` while the calling component is
/// mounted.
///
/// The listener is registered on the first render only and removed when the
/// component unmounts, so a component never holds more than one.
pub fn use_paste_listener(sink: PasteSink) {
    let subscription = use_hook(move || {
        let subscription = match PasteSubscription::register(sink) {
            Ok(subscription) => Some(subscription),
            Err(e) => {
                dioxus_logger::tracing::warn!("paste listener not registered: {}", e);
                None
            }
        };
        Rc::new(RefCell::new(subscription))
    });

    use_drop(move || {
        subscription.borrow_mut().take();
    });
}
