//! Pure derivation of what the screen shows from the workflow state.

use api::GeoLocation;

use crate::workflow::RequestState;
use crate::workflow::Workflow;

/// External map search; the query is `<lat>,<lon>`.
pub const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

#[derive(Clone, PartialEq, Debug)]
pub struct LocationView {
    pub latitude: String,
    pub longitude: String,
    pub confidence: String,
    pub map_link: String,
}

impl From<&GeoLocation> for LocationView {
    fn from(location: &GeoLocation) -> Self {
        Self {
            latitude: format!("{:.5}", location.lat),
            longitude: format!("{:.5}", location.lon),
            confidence: format!("{:.1}%", location.confidence * 100.0),
            map_link: map_link(location),
        }
    }
}

/// Map URL using the coordinates exactly as received.
pub fn map_link(location: &GeoLocation) -> String {
    format!(
        "{}{},{}",
        MAP_SEARCH_URL,
        location.lat,
        location.lon
    )
}

#[derive(Clone, PartialEq, Debug, strum::EnumIs)]
pub enum Body {
    NoImage,
    Ready,
    Loading,
    Failed(String),
    Located(LocationView),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ScreenView {
    pub preview_url: Option<String>,
    pub file_name: Option<String>,
    /// Local input problem, shown above everything else.
    pub notice: Option<String>,
    pub body: Body,
    pub can_submit: bool,
    /// A request for an earlier image has not answered yet.
    pub waiting_on_previous: bool,
}

pub fn render(workflow: &Workflow) -> ScreenView {
    let selection = workflow.selection();
    let body = match workflow.state() {
        RequestState::Idle if selection.is_none() => Body::NoImage,
        RequestState::Idle => Body::Ready,
        RequestState::Loading => Body::Loading,
        RequestState::Error(message) => Body::Failed(message.clone()),
        RequestState::Success(location) => Body::Located(location.into()),
    };
    let waiting_on_previous = workflow.is_in_flight() && !body.is_loading();

    ScreenView {
        preview_url: selection.map(|s| s.preview_url().to_string()),
        file_name: selection.map(|s| s.image().file_name().to_string()),
        notice: workflow.notice().map(|e| e.to_string()),
        body,
        can_submit: workflow.can_submit(),
        waiting_on_previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InputError;
    use crate::errors::SubmitError;
    use crate::image::ImageBlob;
    use crate::image::Preview;
    use crate::reply::interpret_reply;

    fn with_image() -> Workflow {
        let mut workflow = Workflow::new();
        let image = ImageBlob::new("louvre.png", Some("image/png"), vec![1, 2, 3]).unwrap();
        workflow.select(image, Preview::unmanaged("blob:louvre"));
        workflow
    }

    fn submitted(reply: Result<GeoLocation, SubmitError>) -> Workflow {
        let mut workflow = with_image();
        let ticket = workflow.begin_submit().unwrap();
        workflow.complete(&ticket, reply);
        workflow
    }

    #[test]
    fn empty_screen_has_nothing_to_submit() {
        let view = render(&Workflow::new());
        assert_eq!(view.body, Body::NoImage);
        assert!(view.preview_url.is_none());
        assert!(!view.can_submit);
    }

    #[test]
    fn selected_image_is_ready() {
        let view = render(&with_image());
        assert_eq!(view.body, Body::Ready);
        assert_eq!(view.preview_url.as_deref(), Some("blob:louvre"));
        assert_eq!(view.file_name.as_deref(), Some("louvre.png"));
        assert!(view.can_submit);
    }

    #[test]
    fn loading_disables_submit() {
        let mut workflow = with_image();
        workflow.begin_submit();
        let view = render(&workflow);
        assert_eq!(view.body, Body::Loading);
        assert!(!view.can_submit);
        assert!(!view.waiting_on_previous);
    }

    #[test]
    fn paris_result_is_formatted() {
        let reply = interpret_reply(200, r#"{"lat": 48.8566, "lon": 2.3522, "confidence": 0.87}"#);
        let view = render(&submitted(reply));

        let Body::Located(location) = view.body else {
            panic!("expected a result panel");
        };
        assert_eq!(location.latitude, "48.85660");
        assert_eq!(location.longitude, "2.35220");
        assert_eq!(location.confidence, "87.0%");
        assert!(location.map_link.contains("48.8566,2.3522"));
        assert!(location.map_link.starts_with(MAP_SEARCH_URL));
    }

    #[test]
    fn backend_error_shows_message_and_no_result() {
        let reply = interpret_reply(500, r#"{"error":"model unavailable"}"#);
        let view = render(&submitted(reply));
        assert_eq!(view.body, Body::Failed("model unavailable".to_string()));
        assert!(!view.body.is_located());
        assert!(view.can_submit);
    }

    #[test]
    fn clipboard_error_leaves_result_panel_alone() {
        let reply = interpret_reply(200, r#"{"lat": 48.8566, "lon": 2.3522, "confidence": 0.87}"#);
        let mut workflow = submitted(reply);
        let before = render(&workflow).body;

        workflow.reject_input(InputError::ClipboardDenied {
            reason: "NotAllowedError".to_string(),
        });
        let after = render(&workflow);

        assert_eq!(after.body, before);
        assert!(after.notice.is_some_and(|n| n.contains("Ctrl+V")));
    }

    #[test]
    fn new_selection_clears_result_before_submitting() {
        let reply = interpret_reply(200, r#"{"lat": 48.8566, "lon": 2.3522, "confidence": 0.87}"#);
        let mut workflow = submitted(reply);
        assert!(render(&workflow).body.is_located());

        let image = ImageBlob::new("colosseum.png", Some("image/png"), vec![4, 5]).unwrap();
        workflow.select(image, Preview::unmanaged("blob:colosseum"));

        let view = render(&workflow);
        assert_eq!(view.body, Body::Ready);
        assert_eq!(view.preview_url.as_deref(), Some("blob:colosseum"));
    }

    #[test]
    fn reselect_during_request_waits_for_previous() {
        let mut workflow = with_image();
        workflow.begin_submit();
        let image = ImageBlob::new("b.png", Some("image/png"), vec![9]).unwrap();
        workflow.select(image, Preview::unmanaged("blob:b"));

        let view = render(&workflow);
        assert_eq!(view.body, Body::Ready);
        assert!(!view.can_submit);
        assert!(view.waiting_on_previous);
    }

    #[test]
    fn negative_coordinates_keep_their_sign() {
        let location = GeoLocation {
            lat: -33.8688,
            lon: 151.2093,
            confidence: 0.5,
        };
        let view = LocationView::from(&location);
        assert_eq!(view.latitude, "-33.86880");
        assert_eq!(view.confidence, "50.0%");
        assert!(view.map_link.ends_with("-33.8688,151.2093"));
    }
}
