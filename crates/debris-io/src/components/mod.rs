//! Dioxus UI components for the classifier view.
//!
//! Provides the file picker with drag-and-drop, the image preview, and
//! the prediction and image-details panels.

mod prediction;
mod preview;
mod stats;
mod upload;

pub use prediction::PredictionPanel;
pub use preview::ImagePreview;
pub use stats::StatsPanel;
pub use upload::FileUpload;
