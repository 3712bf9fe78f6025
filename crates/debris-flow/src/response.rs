//! Interpretation of the classification service's responses.
//!
//! Shared by every transport: the transport only reports the HTTP
//! status and body bytes (or its own failure), and this module decides
//! what the user sees.

use serde_json::Value;

use crate::types::PredictionResult;

/// Name of the multipart field the service reads the image from.
pub const UPLOAD_FIELD: &str = "image";

/// A failed classification attempt.
///
/// The `Display` output is the exact message shown to the user. Every
/// message not supplied by the service starts with the same generic
/// prefix followed by the underlying detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// Submit was pressed with no image selected. Never reaches the
    /// network.
    #[error("Please select an image.")]
    NoImageSelected,

    /// The request could not be sent or no response arrived.
    #[error("An error occurred while making the prediction: {0}")]
    Transport(String),

    /// Non-2xx response carrying an `error` message, shown verbatim.
    #[error("{message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// The service's `error` field.
        message: String,
    },

    /// Non-2xx response without a usable `error` message.
    #[error("An error occurred while making the prediction: Request failed with status code {status}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
    },

    /// 2xx response whose body is not a valid prediction.
    #[error("An error occurred while making the prediction: {0}")]
    MalformedResponse(String),
}

/// Turn an HTTP status and body into a prediction or an error.
///
/// # Errors
///
/// - [`ClassifyError::Service`] for a non-2xx status whose JSON body
///   has a non-empty `error` string.
/// - [`ClassifyError::UnexpectedStatus`] for any other non-2xx status.
/// - [`ClassifyError::MalformedResponse`] for a 2xx body that is not
///   `{label, probability, class}` or whose probability is outside
///   `[0, 1]`.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<PredictionResult, ClassifyError> {
    if !(200..300).contains(&status) {
        return Err(service_error(status, body));
    }
    let prediction: PredictionResult = serde_json::from_slice(body)
        .map_err(|e| ClassifyError::MalformedResponse(format!("invalid response body: {e}")))?;
    if !(0.0..=1.0).contains(&prediction.probability) {
        return Err(ClassifyError::MalformedResponse(format!(
            "probability {} is outside [0, 1]",
            prediction.probability
        )));
    }
    Ok(prediction)
}

fn service_error(status: u16, body: &[u8]) -> ClassifyError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_owned))
        .filter(|m| !m.is_empty());
    match message {
        Some(message) => ClassifyError::Service { status, message },
        None => ClassifyError::UnexpectedStatus { status },
    }
}

/// Render a probability in `[0, 1]` as a percentage with two decimals.
#[must_use]
pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}
