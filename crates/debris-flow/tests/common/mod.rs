//! Fixture builders shared by the integration tests: encoded images
//! and EXIF blocks carrying a GPS position.

#![allow(dead_code, clippy::unwrap_used)]

use std::io::Cursor;

const TAG_GPS_INFO: u16 = 0x8825;
const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
const TAG_GPS_LATITUDE: u16 = 0x0002;
const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
const TAG_GPS_LONGITUDE: u16 = 0x0004;

const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

/// 40° 26' 46" N.
pub const PITTSBURGH_LAT: [(u32, u32); 3] = [(40, 1), (26, 1), (46, 1)];
/// 79° 58' 56" W.
pub const PITTSBURGH_LON: [(u32, u32); 3] = [(79, 1), (58, 1), (56, 1)];

/// A TIFF-structured EXIF block whose IFD0 points at a GPS IFD.
///
/// Layout: header (8) | IFD0 with one entry (2 + 12 + 4) |
/// GPS IFD with four entries (2 + 48 + 4) | six rationals (48).
pub fn gps_exif(
    big_endian: bool,
    lat: [(u32, u32); 3],
    lat_ref: u8,
    lon: [(u32, u32); 3],
    lon_ref: u8,
) -> Vec<u8> {
    let u16b = |v: u16| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };
    let u32b = |v: u32| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };
    let ifd0 = 8u32;
    let gps_ifd = ifd0 + 2 + 12 + 4;
    let rationals = gps_ifd + 2 + 4 * 12 + 4;

    let mut out = Vec::new();
    out.extend_from_slice(if big_endian { b"MM" } else { b"II" });
    out.extend_from_slice(&u16b(42));
    out.extend_from_slice(&u32b(ifd0));

    // IFD0: GPSInfo -> gps_ifd
    out.extend_from_slice(&u16b(1));
    out.extend_from_slice(&u16b(TAG_GPS_INFO));
    out.extend_from_slice(&u16b(TYPE_LONG));
    out.extend_from_slice(&u32b(1));
    out.extend_from_slice(&u32b(gps_ifd));
    out.extend_from_slice(&u32b(0));

    // GPS IFD
    out.extend_from_slice(&u16b(4));
    let ascii = |out: &mut Vec<u8>, tag: u16, c: u8| {
        out.extend_from_slice(&u16b(tag));
        out.extend_from_slice(&u16b(TYPE_ASCII));
        out.extend_from_slice(&u32b(2));
        out.extend_from_slice(&[c, 0, 0, 0]);
    };
    let rational = |out: &mut Vec<u8>, tag: u16, offset: u32| {
        out.extend_from_slice(&u16b(tag));
        out.extend_from_slice(&u16b(TYPE_RATIONAL));
        out.extend_from_slice(&u32b(3));
        out.extend_from_slice(&u32b(offset));
    };
    ascii(&mut out, TAG_GPS_LATITUDE_REF, lat_ref);
    rational(&mut out, TAG_GPS_LATITUDE, rationals);
    ascii(&mut out, TAG_GPS_LONGITUDE_REF, lon_ref);
    rational(&mut out, TAG_GPS_LONGITUDE, rationals + 24);
    out.extend_from_slice(&u32b(0));

    for (num, den) in lat.into_iter().chain(lon) {
        out.extend_from_slice(&u32b(num));
        out.extend_from_slice(&u32b(den));
    }
    out
}

/// The Pittsburgh fixture (N/W), little-endian.
pub fn pittsburgh_exif() -> Vec<u8> {
    gps_exif(false, PITTSBURGH_LAT, b'N', PITTSBURGH_LON, b'W')
}

pub fn encode(img: &image::RgbImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

/// Encode a JPEG and insert `tiff` as an APP1 `Exif` segment right
/// after SOI.
pub fn jpeg_with_exif(width: u32, height: u32, tiff: &[u8]) -> Vec<u8> {
    let jpeg = encode(
        &image::RgbImage::from_pixel(width, height, image::Rgb([90, 90, 90])),
        image::ImageFormat::Jpeg,
    );
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "JPEG starts with SOI");

    let payload_len = u16::try_from(2 + 6 + tiff.len()).unwrap();
    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&payload_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Encode a PNG and insert `tiff` as an `eXIf` chunk right after IHDR.
pub fn png_with_exif(width: u32, height: u32, tiff: &[u8]) -> Vec<u8> {
    let png = encode(
        &image::RgbImage::from_pixel(width, height, image::Rgb([90, 90, 90])),
        image::ImageFormat::Png,
    );
    // Signature (8) + IHDR chunk (4 length + 4 type + 13 data + 4 CRC).
    let after_ihdr = 8 + 25;
    assert_eq!(&png[12..16], b"IHDR");

    let mut chunk = Vec::with_capacity(tiff.len() + 12);
    chunk.extend_from_slice(&u32::try_from(tiff.len()).unwrap().to_be_bytes());
    chunk.extend_from_slice(b"eXIf");
    chunk.extend_from_slice(tiff);
    let crc = crc32(&chunk[4..]);
    chunk.extend_from_slice(&crc.to_be_bytes());

    let mut out = png[..after_ihdr].to_vec();
    out.extend(chunk);
    out.extend_from_slice(&png[after_ihdr..]);
    out
}

/// CRC-32 (IEEE) as used by PNG chunks.
fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFF_u32;
    for &b in bytes {
        crc ^= u32::from(b);
        for _ in 0..8 {
            crc = if crc & 1 == 1 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}
