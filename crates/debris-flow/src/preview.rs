//! Display-only preview of the selected image.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::types::SelectedImage;

/// Encode the selected image as a `data:` URI for an `<img src>`.
///
/// The browser decodes it for display; nothing is re-encoded, so the
/// preview is byte-for-byte the file that will be uploaded.
#[must_use]
pub fn data_uri(image: &SelectedImage) -> String {
    format!(
        "data:{};base64,{}",
        image.mime.as_str(),
        STANDARD.encode(&image.bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageMime;

    #[test]
    fn data_uri_carries_mime_and_payload() {
        let image = SelectedImage {
            bytes: b"hello".to_vec(),
            file_name: "a.png".into(),
            mime: ImageMime::Png,
        };
        assert_eq!(data_uri(&image), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn data_uri_for_jpeg() {
        let image = SelectedImage {
            bytes: vec![0xFF, 0xD8, 0xFF],
            file_name: "b.jpg".into(),
            mime: ImageMime::Jpeg,
        };
        assert_eq!(data_uri(&image), "data:image/jpeg;base64,/9j/");
    }
}
