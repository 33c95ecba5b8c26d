//! The select → submit → show state machine behind the geolocate screen.
//!
//! Kept free of any Dioxus types so that every transition can be exercised
//! directly. The screen stores a `Workflow` in a signal and calls into it
//! from event handlers.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use api::GeoLocation;
use api::ImageUpload;
use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::warn;

use crate::errors::InputError;
use crate::errors::SubmitError;
use crate::image::ImageBlob;
use crate::image::Preview;

/// Lifecycle of the current request. Exactly one holds at a time.
#[derive(Clone, PartialEq, Debug, Default, strum::EnumIs)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(GeoLocation),
    Error(String),
}

/// The picked image together with its preview.
///
/// Dropping a selection releases the preview.
#[derive(Debug)]
pub struct Selection {
    image: ImageBlob,
    preview: Preview,
}

impl Selection {
    pub fn image(&self) -> &ImageBlob {
        &self.image
    }

    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }
}

/// Handed out by [`Workflow::begin_submit`] and given back to
/// [`Workflow::complete`] with the outcome.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    epoch: u64,
    image: ImageBlob,
}

impl SubmitTicket {
    pub fn upload(&self) -> ImageUpload {
        self.image.to_upload()
    }
}

/// Orders image acquisitions by when the user started them.
///
/// Taken in the event handler before any bytes are read, so reads that
/// finish out of order can still be ranked.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct PickStamp(u64);

static NEXT_PICK: AtomicU64 = AtomicU64::new(0);

impl PickStamp {
    pub fn next() -> Self {
        Self(NEXT_PICK.fetch_add(1, Ordering::Relaxed))
    }
}

/// A finished acquisition attempt and the stamp it was started under.
pub type Picked = (PickStamp, Result<ImageBlob, InputError>);

#[derive(Clone, Copy, PartialEq, Eq, Debug, strum::EnumIs)]
pub enum Completion {
    Applied,
    /// The selection changed while the request was in flight.
    Stale,
}

#[derive(Debug, Default)]
pub struct Workflow {
    selection: Option<Selection>,
    state: RequestState,
    /// Last local input problem. Lives beside `state` so that a failed
    /// clipboard read never disturbs a displayed result.
    notice: Option<InputError>,
    /// Bumped by every selection change.
    epoch: u64,
    /// Epoch of the one outstanding request, if any.
    in_flight: Option<u64>,
    /// Newest acquisition applied so far.
    latest_pick: Option<PickStamp>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection. The previous preview is released, any result
    /// or error is cleared, and an outstanding request becomes stale.
    pub fn select(&mut self, image: ImageBlob, preview: Preview) {
        debug!(
            "selected '{}' ({}, {} bytes)",
            image.file_name(),
            image.media_type(),
            image.len()
        );
        self.selection = Some(Selection { image, preview });
        self.state = RequestState::Idle;
        self.notice = None;
        self.epoch += 1;
    }

    /// Claims the right to apply a finished acquisition. Returns `false` when
    /// one started later has already been applied.
    pub fn claim_pick(&mut self, stamp: PickStamp) -> bool {
        if self.latest_pick.is_some_and(|latest| stamp < latest) {
            debug!("dropping {:?}, superseded by a later pick", stamp);
            return false;
        }
        self.latest_pick = Some(stamp);
        true
    }

    /// Records a failed image acquisition. Nothing else changes.
    pub fn reject_input(&mut self, error: InputError) {
        warn!("image input rejected: {:?}", error);
        self.notice = Some(error);
    }

    /// Drops the selection and returns to the empty screen.
    pub fn clear(&mut self) {
        self.selection = None;
        self.state = RequestState::Idle;
        self.notice = None;
        self.epoch += 1;
    }

    /// Submit guard: an image is selected and no request is in flight.
    ///
    /// A request made for an older selection still counts as in flight, so
    /// there is never more than one outstanding network call.
    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && self.in_flight.is_none()
    }

    /// Moves to `Loading` and returns the ticket to submit with, or `None`
    /// if the guard refuses.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }
        let image = self.selection.as_ref()?.image.clone();
        self.state = RequestState::Loading;
        self.notice = None;
        self.in_flight = Some(self.epoch);
        Some(SubmitTicket {
            epoch: self.epoch,
            image,
        })
    }

    /// Applies the outcome of a request, unless the selection has moved on.
    pub fn complete(
        &mut self,
        ticket: &SubmitTicket,
        outcome: Result<GeoLocation, SubmitError>,
    ) -> Completion {
        if self.in_flight == Some(ticket.epoch) {
            self.in_flight = None;
        }
        if ticket.epoch != self.epoch || !self.state.is_loading() {
            debug!("discarding result for superseded selection");
            return Completion::Stale;
        }
        self.state = match outcome {
            Ok(location) => RequestState::Success(location),
            Err(e) => {
                warn!("geolocation failed: {:?}", e);
                RequestState::Error(e.to_string())
            }
        };
        Completion::Applied
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn notice(&self) -> Option<&InputError> {
        self.notice.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}
