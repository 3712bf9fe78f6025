//! Classifier flow state machine.
//!
//! [`ClassifierState`] owns everything the classifier view renders and
//! is the only place that mutates it. Every piece of asynchronous work
//! (dimension decode, EXIF parse, upload) is started for a specific
//! [`Generation`] and its result is dropped if the user has picked
//! another file in the meantime, so a late callback can never write
//! into a newer selection.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::preview;
use crate::response::ClassifyError;
use crate::types::{GeoLocation, ImageStats, PredictionResult, SelectedImage};

/// Monotonic counter identifying one file selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// The raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Result of the most recent submission for the current selection.
///
/// Error and prediction are mutually exclusive by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome {
    /// Nothing submitted yet (or a submission is in flight).
    #[default]
    Idle,
    /// The last attempt failed with this user-facing message.
    Failed(String),
    /// The last attempt succeeded.
    Predicted(PredictionResult),
}

/// Handle returned by [`ClassifierState::select`] for spawning the
/// derivation tasks of a new selection.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Generation the derivations must report back with.
    pub generation: Generation,
    /// The selected image, shared with the tasks.
    pub image: Arc<SelectedImage>,
}

/// Handle for one in-flight upload.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    /// Generation the upload belongs to.
    pub generation: Generation,
    /// The image to upload.
    pub image: Arc<SelectedImage>,
}

/// Why [`ClassifierState::begin_submit`] refused to start an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// No image is selected; the view now shows the validation error.
    #[error("no image selected")]
    NoImageSelected,
    /// An upload for the current selection is already running.
    #[error("a submission is already in flight")]
    InFlight,
}

/// Everything the classifier view renders, plus the bookkeeping that
/// keeps stale asynchronous results out.
#[derive(Debug, Clone, Default)]
pub struct ClassifierState {
    generation: Generation,
    image: Option<Arc<SelectedImage>>,
    preview: Option<String>,
    stats: Option<ImageStats>,
    location: Option<GeoLocation>,
    outcome: Outcome,
    in_flight: Option<Generation>,
}

impl ClassifierState {
    /// A fresh state with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection.
    ///
    /// Resets preview, stats, location, outcome and the in-flight
    /// marker before anything new is derived, then records the new
    /// image and its preview.
    pub fn select(&mut self, image: SelectedImage) -> Selection {
        self.generation = self.generation.next();
        self.reset_derived();

        let image = Arc::new(image);
        self.preview = Some(preview::data_uri(&image));
        self.image = Some(Arc::clone(&image));
        info!(
            generation = self.generation.get(),
            file = %image.file_name,
            bytes = image.size_bytes(),
            mime = %image.mime,
            "image selected"
        );

        Selection {
            generation: self.generation,
            image,
        }
    }

    fn reset_derived(&mut self) {
        self.preview = None;
        self.stats = None;
        self.location = None;
        self.outcome = Outcome::Idle;
        self.in_flight = None;
    }

    /// Record the stats derivation for `generation`.
    ///
    /// Returns `false` (and changes nothing) if the selection has moved
    /// on. `None` means the derivation failed and the field stays unset.
    pub fn apply_stats(&mut self, generation: Generation, stats: Option<ImageStats>) -> bool {
        if !self.is_current(generation, "stats") {
            return false;
        }
        self.stats = stats;
        true
    }

    /// Record the location derivation for `generation`.
    ///
    /// Returns `false` (and changes nothing) if the selection has moved
    /// on. `None` means no GPS tags, or a parse failure.
    pub fn apply_location(&mut self, generation: Generation, location: Option<GeoLocation>) -> bool {
        if !self.is_current(generation, "location") {
            return false;
        }
        self.location = location;
        true
    }

    /// Start an upload of the current image.
    ///
    /// Clears the previous outcome and marks the upload in flight.
    ///
    /// # Errors
    ///
    /// [`SubmitError::NoImageSelected`] if nothing is selected; the
    /// outcome becomes the validation message. [`SubmitError::InFlight`]
    /// if an upload is already running; state is untouched.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitError> {
        if self.in_flight.is_some() {
            return Err(SubmitError::InFlight);
        }
        let Some(image) = self.image.as_ref().map(Arc::clone) else {
            self.outcome = Outcome::Failed(ClassifyError::NoImageSelected.to_string());
            return Err(SubmitError::NoImageSelected);
        };
        self.outcome = Outcome::Idle;
        self.in_flight = Some(self.generation);
        info!(generation = self.generation.get(), file = %image.file_name, "submitting image");
        Ok(SubmitTicket {
            generation: self.generation,
            image,
        })
    }

    /// Record the result of the upload started with `ticket`.
    ///
    /// Returns `false` (and changes nothing visible) if the selection has
    /// moved on since the upload started.
    pub fn finish_submit(
        &mut self,
        ticket: &SubmitTicket,
        result: Result<PredictionResult, ClassifyError>,
    ) -> bool {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
        }
        if !self.is_current(ticket.generation, "prediction") {
            return false;
        }
        self.outcome = match result {
            Ok(prediction) => {
                info!(label = %prediction.label, probability = prediction.probability, "prediction received");
                Outcome::Predicted(prediction)
            }
            Err(e) => {
                warn!(error = %e, "prediction failed");
                Outcome::Failed(e.to_string())
            }
        };
        true
    }

    fn is_current(&self, generation: Generation, what: &str) -> bool {
        let current = generation == self.generation;
        if !current {
            debug!(
                stale = generation.get(),
                current = self.generation.get(),
                "discarding stale {what}"
            );
        }
        current
    }

    /// The current selection's generation.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// The selected image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_deref()
    }

    /// `data:` URI of the selected image, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Derived stats, once the decode has finished successfully.
    #[must_use]
    pub const fn stats(&self) -> Option<&ImageStats> {
        self.stats.as_ref()
    }

    /// Derived GPS location, if the image has one.
    #[must_use]
    pub const fn location(&self) -> Option<&GeoLocation> {
        self.location.as_ref()
    }

    /// Outcome of the last submission.
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The prediction, when the last submission succeeded.
    #[must_use]
    pub const fn prediction(&self) -> Option<&PredictionResult> {
        match &self.outcome {
            Outcome::Predicted(p) => Some(p),
            _ => None,
        }
    }

    /// The error message, when the last submission failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Whether an upload for the current selection is running.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }
}
