//! `multipart/form-data` body encoding for native transports.
//!
//! The browser builds its own body from a `FormData`; this encoder
//! exists for clients that send raw bytes (the CLI).

use std::fmt::Write;

use crate::response::UPLOAD_FIELD;
use crate::types::SelectedImage;

/// An in-memory `multipart/form-data` body under construction.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    /// Start an empty form delimited by `boundary`.
    ///
    /// The boundary must not occur inside any part's content.
    #[must_use]
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// The single-part form the classification service expects: the
    /// image under the `image` field, with its file name and MIME type.
    #[must_use]
    pub fn for_image(image: &SelectedImage, boundary: impl Into<String>) -> Self {
        Self::new(boundary).file(
            UPLOAD_FIELD,
            &image.file_name,
            image.mime.as_str(),
            &image.bytes,
        )
    }

    /// Append a file part.
    #[must_use]
    pub fn file(mut self, field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        let mut head = String::new();
        let _ = write!(
            head,
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            self.boundary,
            escape_quoted(field),
            escape_quoted(file_name),
            content_type,
        );
        self.body.extend_from_slice(head.as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Value for the request's `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the form and return the encoded body.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"--\r\n");
        self.body
    }
}

/// Percent-encode the characters that would break a quoted header
/// parameter, the way browsers encode `FormData` file names.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageMime;

    #[test]
    fn image_form_layout() {
        let image = SelectedImage {
            bytes: b"PNGDATA".to_vec(),
            file_name: "orbit.png".into(),
            mime: ImageMime::Png,
        };
        let form = MultipartForm::for_image(&image, "XyZ");
        assert_eq!(form.content_type(), "multipart/form-data; boundary=XyZ");
        let body = form.finish();
        let expected = b"--XyZ\r\n\
Content-Disposition: form-data; name=\"image\"; filename=\"orbit.png\"\r\n\
Content-Type: image/png\r\n\
\r\n\
PNGDATA\r\n\
--XyZ--\r\n";
        assert_eq!(body, expected.to_vec());
    }

    #[test]
    fn quotes_and_newlines_in_file_name_are_escaped() {
        let body = MultipartForm::new("b")
            .file("image", "a\"b\r\n.jpg", "image/jpeg", b"")
            .finish();
        let text = String::from_utf8(body).unwrap_or_default();
        assert!(text.contains("filename=\"a%22b%0D%0A.jpg\""), "{text}");
    }

    #[test]
    fn binary_payload_is_untouched() {
        let data = [0u8, 0xFF, b'\r', b'\n', 0x7F];
        let body = MultipartForm::new("b")
            .file("image", "x.png", "image/png", &data)
            .finish();
        assert!(body.windows(data.len()).any(|w| w == data));
    }
}
