//! debris-io: Browser I/O and Dioxus component library.
//!
//! Handles file selection, the `fetch` upload to the classification
//! service, and provides the UI components the classifier view is
//! assembled from.

pub mod client;
pub mod components;

pub use client::{ClassifierClient, FetchError};
pub use components::{FileUpload, ImagePreview, PredictionPanel, StatsPanel};
