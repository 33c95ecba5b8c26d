use dioxus::prelude::*;

use crate::view::LocationView;

#[component]
pub fn ResultPanel(location: LocationView) -> Element {
    rsx! {
        section {
            class: "result-panel",
            h3 { "Estimated location" }
            table {
                tbody {
                    tr {
                        th { scope: "row", "Latitude" }
                        td { "{location.latitude}" }
                    }
                    tr {
                        th { scope: "row", "Longitude" }
                        td { "{location.longitude}" }
                    }
                    tr {
                        th { scope: "row", "Confidence" }
                        td { "{location.confidence}" }
                    }
                }
            }
            a {
                href: "{location.map_link}",
                target: "_blank",
                rel: "noopener noreferrer",
                "View on map ↗"
            }
        }
    }
}
