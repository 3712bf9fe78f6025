//! Image details panel: size, dimensions, model preprocessing and GPS.

use debris_flow::{GeoLocation, ImageStats};
use dioxus::prelude::*;

/// Props for the [`StatsPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StatsPanelProps {
    /// Locally derived stats; `None` if the image could not be decoded.
    stats: Option<ImageStats>,
    /// GPS position from EXIF, if present.
    location: Option<GeoLocation>,
}

/// Details of the uploaded image shown alongside a prediction.
///
/// Missing stats or location are stated explicitly rather than hidden.
#[component]
pub fn StatsPanel(props: StatsPanelProps) -> Element {
    let coordinates = props
        .location
        .map(|loc| (format!("{:.6}", loc.latitude), format!("{:.6}", loc.longitude)));

    rsx! {
        section { class: "panel",
            h3 { class: "panel__title", "Image Details" }
            if let Some(ref stats) = props.stats {
                dl { class: "panel__list",
                    dt { "File size" }
                    dd { "{stats.size}" }
                    dt { "Dimensions" }
                    dd { "{stats.dimensions} px" }
                    dt { "Pixel count" }
                    dd { "{stats.pixel_count}" }
                    dt { "Model input" }
                    dd { "Resized to {stats.resized_to}" }
                    dt { "Normalization" }
                    dd { "{stats.normalization}" }
                }
            } else {
                p { class: "panel__muted", "Image details unavailable" }
            }

            h4 { class: "panel__subtitle", "Location" }
            if let Some((ref latitude, ref longitude)) = coordinates {
                dl { class: "panel__list",
                    dt { "Latitude" }
                    dd { "{latitude}" }
                    dt { "Longitude" }
                    dd { "{longitude}" }
                }
            } else {
                p { class: "panel__muted", "No location data available" }
            }
        }
    }
}
