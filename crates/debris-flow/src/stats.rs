//! Local image statistics: decoded dimensions and file size.

use crate::types::{Dimensions, FileSize, ImageStats, MetadataError, SelectedImage};

/// Decode the selected image and summarize it for display.
///
/// # Errors
///
/// Returns [`MetadataError::EmptyInput`] if the file is empty.
/// Returns [`MetadataError::ImageDecode`] if the bytes do not decode as
/// an image.
pub fn derive_stats(image: &SelectedImage) -> Result<ImageStats, MetadataError> {
    let dimensions = decode_dimensions(&image.bytes)?;
    Ok(ImageStats::new(FileSize(image.size_bytes()), dimensions))
}

/// Fully decode `bytes` and report the natural pixel dimensions.
///
/// The whole image is decoded rather than only its header so a
/// truncated file is reported as undecodable.
///
/// # Errors
///
/// See [`derive_stats`].
pub fn decode_dimensions(bytes: &[u8]) -> Result<Dimensions, MetadataError> {
    if bytes.is_empty() {
        return Err(MetadataError::EmptyInput);
    }
    let img = image::load_from_memory(bytes)?;
    Ok(Dimensions {
        width: img.width(),
        height: img.height(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            image::Rgb([(x * 7) as u8, (y * 3) as u8, 128])
        });
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        buf
    }

    #[test]
    fn png_dimensions_match_source() {
        let bytes = encode(37, 21, image::ImageFormat::Png);
        let selected = SelectedImage::new(bytes, "frame.png");
        let stats = derive_stats(&selected).unwrap();
        assert_eq!(
            stats.dimensions,
            Dimensions {
                width: 37,
                height: 21
            }
        );
        assert_eq!(stats.pixel_count, 37 * 21);
        assert_eq!(stats.size, FileSize(selected.size_bytes()));
    }

    #[test]
    fn jpeg_dimensions_match_source() {
        let bytes = encode(64, 48, image::ImageFormat::Jpeg);
        let selected = SelectedImage::new(bytes, "frame.jpg");
        assert_eq!(selected.mime, crate::ImageMime::Jpeg);
        let stats = derive_stats(&selected).unwrap();
        assert_eq!(stats.dimensions.width, 64);
        assert_eq!(stats.dimensions.height, 48);
        assert_eq!(stats.pixel_count, 3072);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            decode_dimensions(&[]),
            Err(MetadataError::EmptyInput)
        ));
    }

    #[test]
    fn corrupt_input_fails_to_decode() {
        assert!(matches!(
            decode_dimensions(&[0xFF, 0xD8, 0xFF, 0x00, 0x01]),
            Err(MetadataError::ImageDecode(_))
        ));
    }

    #[test]
    fn truncated_png_fails_to_decode() {
        let bytes = encode(16, 16, image::ImageFormat::Png);
        assert!(decode_dimensions(&bytes[..bytes.len() / 2]).is_err());
    }
}
