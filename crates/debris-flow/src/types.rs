//! Shared types for the debris classifier flow.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte count at which [`FileSize`] switches from KB to MB.
pub const MIB: u64 = 1_048_576;

/// Input size the remote model resizes every upload to.
pub const MODEL_INPUT: Dimensions = Dimensions {
    width: 128,
    height: 128,
};

/// Pixel normalization the remote model applies before inference.
pub const MODEL_NORMALIZATION: &str = "Pixel values normalized to [0, 1]";

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Total number of pixels (`width * height`).
    #[must_use]
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

/// MIME type of a selected image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    /// `image/png`
    Png,
    /// `image/jpeg`
    Jpeg,
    /// Anything else the picker let through. Not rejected locally; the
    /// service decides.
    Other(String),
}

impl ImageMime {
    /// Identify the MIME type from the file's magic bytes, falling back
    /// to the file-name extension.
    #[must_use]
    pub fn detect(bytes: &[u8], file_name: &str) -> Self {
        let format = image::guess_format(bytes).ok().or_else(|| {
            file_name
                .rsplit_once('.')
                .and_then(|(_, ext)| image::ImageFormat::from_extension(ext))
        });
        match format {
            Some(image::ImageFormat::Png) => Self::Png,
            Some(image::ImageFormat::Jpeg) => Self::Jpeg,
            Some(other) => Self::Other(other.to_mime_type().to_owned()),
            None => Self::Other("application/octet-stream".to_owned()),
        }
    }

    /// The MIME type string, e.g. `"image/png"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The image the user picked, exactly as read from the file.
///
/// Replaced wholesale when the user picks another file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// Original file name. Sent with the upload since the service
    /// checks the extension.
    pub file_name: String,
    /// Detected MIME type.
    pub mime: ImageMime,
}

impl SelectedImage {
    /// Wrap freshly read file bytes, detecting the MIME type.
    #[must_use]
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let mime = ImageMime::detect(&bytes, &file_name);
        Self {
            bytes,
            file_name,
            mime,
        }
    }

    /// File size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A byte count rendered as KB below [`MIB`] and MB from [`MIB`] up,
/// both with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSize(pub u64);

impl fmt::Display for FileSize {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= MIB {
            write!(f, "{:.2} MB", self.0 as f64 / MIB as f64)
        } else {
            write!(f, "{:.2} KB", self.0 as f64 / 1024.0)
        }
    }
}

/// Locally derived, read-only snapshot of the selected image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageStats {
    /// File size.
    pub size: FileSize,
    /// Decoded pixel dimensions.
    pub dimensions: Dimensions,
    /// `width * height`.
    pub pixel_count: u64,
    /// What the service resizes the image to. Constant.
    pub resized_to: Dimensions,
    /// How the service normalizes pixel values. Constant.
    pub normalization: &'static str,
}

impl ImageStats {
    /// Build stats from a file size and decoded dimensions.
    #[must_use]
    pub fn new(size: FileSize, dimensions: Dimensions) -> Self {
        Self {
            size,
            dimensions,
            pixel_count: dimensions.pixel_count(),
            resized_to: MODEL_INPUT,
            normalization: MODEL_NORMALIZATION,
        }
    }
}

/// Signed decimal coordinates from the image's EXIF GPS tags.
///
/// South latitudes and west longitudes are negative. Values are
/// rounded to six decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, `-90..=90`.
    pub latitude: f64,
    /// Longitude in degrees, `-180..=180`.
    pub longitude: f64,
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Class identifier returned by the service.
///
/// The service sends `0`/`1`; a string is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictedClass {
    /// Numeric class id.
    Number(serde_json::Number),
    /// Named class.
    Text(String),
}

impl fmt::Display for PredictedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A successful classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Human-readable label, e.g. `"Debris"`.
    pub label: String,
    /// Model confidence in `[0, 1]`.
    pub probability: f64,
    /// Class identifier.
    pub class: PredictedClass,
}

/// Errors from local metadata derivation.
///
/// Never shown to the user: a failed derivation only leaves the
/// corresponding field unset.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The file was empty.
    #[error("image data is empty")]
    EmptyInput,

    /// The image could not be decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The EXIF block could not be read from the container.
    #[error("failed to read EXIF data: {0}")]
    Exif(#[from] exif::Error),

    /// The embedded EXIF block is structurally invalid.
    #[error("malformed EXIF data: {0}")]
    MalformedExif(&'static str),
}
