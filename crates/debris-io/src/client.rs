//! Upload to the classification service via the browser `fetch` API.
//!
//! The image goes out as `multipart/form-data` built from a `FormData`
//! so the browser chooses the boundary. Status and body are handed to
//! [`debris_flow::interpret_response`]; this module only reports
//! transport failures.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use debris_flow::response::UPLOAD_FIELD;
use debris_flow::{ClassifyError, PredictionResult, SelectedImage, interpret_response};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::BlobPropertyBag;

/// Errors raised by browser APIs while sending the request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A browser API call returned an error or a required object was
    /// missing.
    #[error("{0}")]
    JsError(String),
}

impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        Self::JsError(js_error_message(&value))
    }
}

/// Best human-readable text for a thrown JS value (`TypeError: Failed
/// to fetch` becomes `Failed to fetch`).
fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Client for the remote classification endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierClient {
    endpoint: String,
}

impl ClassifierClient {
    /// Create a client posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// The configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload `image` and interpret the reply.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Transport`] if the request cannot be
    /// sent or its body cannot be read, and the errors of
    /// [`interpret_response`] otherwise.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
    pub async fn classify(&self, image: &SelectedImage) -> Result<PredictionResult, ClassifyError> {
        let (status, body) = self.post(image).await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "upload failed");
            ClassifyError::Transport(e.to_string())
        })?;
        debug!(status, bytes = body.len(), "classification response");
        interpret_response(status, &body)
    }

    /// Send the multipart request and collect status and body bytes.
    #[allow(clippy::future_not_send)]
    async fn post(&self, image: &SelectedImage) -> Result<(u16, Vec<u8>), FetchError> {
        let window =
            web_sys::window().ok_or_else(|| FetchError::JsError("no global window".into()))?;

        // Wrap the file bytes in a typed Blob so the part carries the
        // image's Content-Type.
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(image.bytes.as_slice()));
        let opts = BlobPropertyBag::new();
        opts.set_type(image.mime.as_str());
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

        let form = web_sys::FormData::new()?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &image.file_name)?;

        let init = web_sys::RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);
        let request = web_sys::Request::new_with_str_and_init(&self.endpoint, &init)?;

        let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        let status = response.status();

        let buffer = JsFuture::from(response.array_buffer()?).await?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok((status, body))
    }
}
