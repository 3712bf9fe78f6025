//! Blocking upload to the classification service.

use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use debris_flow::{ClassifyError, MultipartForm, PredictionResult, SelectedImage, interpret_response};
use tracing::{debug, info};

/// Upper bound on a response body; predictions are a few dozen bytes.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Upload `image` to `endpoint` and interpret the reply.
///
/// # Errors
///
/// [`ClassifyError::Transport`] if the request fails before a response
/// arrives or the body cannot be read; otherwise whatever
/// [`interpret_response`] decides.
pub fn classify(endpoint: &str, image: &SelectedImage) -> Result<PredictionResult, ClassifyError> {
    let form = MultipartForm::for_image(image, boundary());
    let content_type = form.content_type();
    let body = form.finish();

    info!(endpoint, file = %image.file_name, bytes = body.len(), "uploading image");
    let response = match ureq::post(endpoint)
        .set("Content-Type", &content_type)
        .send_bytes(&body)
    {
        Ok(response) | Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(e)) => return Err(ClassifyError::Transport(e.to_string())),
    };

    let status = response.status();
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| ClassifyError::Transport(format!("failed to read response: {e}")))?;
    debug!(status, bytes = bytes.len(), "classification response");

    interpret_response(status, &bytes)
}

/// A multipart boundary unlikely to appear in image data.
fn boundary() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("----debris-{:x}-{nanos:x}", std::process::id())
}
