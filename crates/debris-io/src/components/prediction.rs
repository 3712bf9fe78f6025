//! Prediction result panel.

use debris_flow::{PredictionResult, format_probability};
use dioxus::prelude::*;

/// Props for the [`PredictionPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PredictionPanelProps {
    /// The classification to display.
    prediction: PredictionResult,
}

/// Label, probability (as a percentage) and class of a prediction.
#[component]
pub fn PredictionPanel(props: PredictionPanelProps) -> Element {
    let PredictionResult {
        label,
        probability,
        class,
    } = &props.prediction;
    let percent = format_probability(*probability);

    rsx! {
        section { class: "panel",
            h3 { class: "panel__title", "Prediction Result" }
            dl { class: "panel__list",
                dt { "Label" }
                dd { "{label}" }
                dt { "Probability" }
                dd { "{percent}" }
                dt { "Class" }
                dd { "{class}" }
            }
        }
    }
}
