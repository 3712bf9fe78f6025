//! EXIF GPS extraction.
//!
//! `kamadak-exif` finds the EXIF block inside the container (JPEG APP1,
//! PNG `eXIf`) and decodes its IFDs. Only the four GPS latitude and
//! longitude tags of the primary image are read.
//!
//! A missing EXIF block or missing GPS tags is not an error, it just
//! means there is no location to show.

use std::io::Cursor;

use exif::{Exif, In, Reader, Tag, Value};

use crate::types::{GeoLocation, MetadataError};

/// Marker some containers leave in front of the TIFF header.
const EXIF_PREFIX: &[u8] = b"Exif\0\0";

/// Read the GPS position embedded in an image file, if any.
///
/// # Errors
///
/// Returns [`MetadataError`] if the container cannot be read or the
/// EXIF block is malformed. Callers treat any error as "no location".
pub fn extract_location(bytes: &[u8]) -> Result<Option<GeoLocation>, MetadataError> {
    if bytes.is_empty() {
        return Err(MetadataError::EmptyInput);
    }
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => gps_location(&exif),
        Err(exif::Error::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Parse the GPS position out of a raw EXIF (TIFF) block.
///
/// Accepts the block with or without the leading `Exif\0\0` marker and
/// in either byte order.
///
/// # Errors
///
/// Returns [`MetadataError`] if the TIFF structure is invalid or a
/// coordinate value is not three usable rationals.
pub fn parse_gps(exif: &[u8]) -> Result<Option<GeoLocation>, MetadataError> {
    let data = exif.strip_prefix(EXIF_PREFIX).unwrap_or(exif);
    let exif = Reader::new().read_raw(data.to_vec())?;
    gps_location(&exif)
}

fn gps_location(exif: &Exif) -> Result<Option<GeoLocation>, MetadataError> {
    let latitude = exif.get_field(Tag::GPSLatitude, In::PRIMARY);
    let longitude = exif.get_field(Tag::GPSLongitude, In::PRIMARY);
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Ok(None);
    };

    let lat = signed(
        dms(&latitude.value)?,
        hemisphere(exif, Tag::GPSLatitudeRef),
        b'S',
    );
    let lon = signed(
        dms(&longitude.value)?,
        hemisphere(exif, Tag::GPSLongitudeRef),
        b'W',
    );

    Ok(Some(GeoLocation {
        latitude: round6(lat),
        longitude: round6(lon),
    }))
}

/// First character of a hemisphere reference (`N`/`S`/`E`/`W`).
fn hemisphere(exif: &Exif, tag: Tag) -> Option<u8> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(parts) => parts.first()?.first().copied(),
        _ => None,
    }
}

/// Decimal degrees from a degrees/minutes/seconds rational triple.
fn dms(value: &Value) -> Result<f64, MetadataError> {
    let Value::Rational(parts) = value else {
        return Err(MetadataError::MalformedExif("coordinate is not RATIONAL"));
    };
    let [degrees, minutes, seconds, ..] = parts.as_slice() else {
        return Err(MetadataError::MalformedExif(
            "coordinate needs three rationals",
        ));
    };
    if [degrees, minutes, seconds].iter().any(|r| r.denom == 0) {
        return Err(MetadataError::MalformedExif("zero denominator"));
    }
    Ok(dms_to_decimal(
        degrees.to_f64(),
        minutes.to_f64(),
        seconds.to_f64(),
    ))
}

/// Convert degrees, minutes and seconds to decimal degrees.
#[must_use]
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Round to six decimal places.
fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Apply the hemisphere reference: `negative` (`S` for latitude, `W`
/// for longitude) yields a negative value whatever the sign of
/// `magnitude`.
fn signed(magnitude: f64, reference: Option<u8>, negative: u8) -> f64 {
    match reference {
        Some(r) if r.eq_ignore_ascii_case(&negative) => -magnitude.abs(),
        _ => magnitude,
    }
}
