//! debris-flow: Sans-IO core of the debris classifier upload flow.
//!
//! Turns a user-selected image into the state the UI renders:
//! selection -> local metadata (size, dimensions, EXIF GPS) ->
//! multipart upload -> interpreted prediction or error message.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. The browser `fetch`
//! transport and the Dioxus components live in `debris-io`; the native
//! transport lives in `debris-cli`.

pub mod config;
pub mod location;
pub mod multipart;
pub mod preview;
pub mod response;
pub mod state;
pub mod stats;
pub mod types;

pub use config::ClassifierConfig;
pub use location::extract_location;
pub use multipart::MultipartForm;
pub use response::{ClassifyError, format_probability, interpret_response};
pub use state::{ClassifierState, Generation, Outcome, Selection, SubmitError, SubmitTicket};
pub use stats::derive_stats;
pub use types::{
    Dimensions, FileSize, GeoLocation, ImageMime, ImageStats, MetadataError, PredictedClass,
    PredictionResult, SelectedImage,
};
