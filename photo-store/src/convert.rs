use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

/// Fixed re-encode quality for transcoded photos
pub const JPEG_QUALITY: u8 = 80;

/// Error type for format conversion during ingest
#[derive(Debug)]
pub enum ConversionError {
    Decode(String),
    Encode(String),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::Decode(msg) => write!(f, "HEIF decode error: {}", msg),
            ConversionError::Encode(msg) => write!(f, "JPEG encode error: {}", msg),
        }
    }
}

impl std::error::Error for ConversionError {}

/// True when the declared type or the name extension indicates the legacy
/// HEIF/HEIC container, which browsers cannot display directly.
pub fn is_legacy_container(name: &str, mime_type: &str) -> bool {
    if mime_type.eq_ignore_ascii_case("image/heic") || mime_type.eq_ignore_ascii_case("image/heif")
    {
        return true;
    }

    let name = name.to_ascii_lowercase();
    name.ends_with(".heic") || name.ends_with(".heif")
}

/// Decode a HEIF/HEIC payload and re-encode it as JPEG at [`JPEG_QUALITY`].
pub fn transcode_to_jpeg(data: &[u8]) -> Result<Vec<u8>, ConversionError> {
    let lib_heif = LibHeif::new();

    let context = HeifContext::read_from_bytes(data)
        .map_err(|e| ConversionError::Decode(format!("unreadable container: {}", e)))?;
    let handle = context
        .primary_image_handle()
        .map_err(|e| ConversionError::Decode(format!("no primary image: {}", e)))?;

    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| ConversionError::Decode(format!("decode failed: {}", e)))?;

    let planes = decoded.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| ConversionError::Decode("missing interleaved plane".to_string()))?;

    let width = plane.width as usize;
    let height = plane.height as usize;

    // Rows may be padded to the stride; copy only the pixel bytes.
    let mut rgb = Vec::with_capacity(width * height * 3);
    for row in plane.data.chunks(plane.stride).take(height) {
        if row.len() < width * 3 {
            return Err(ConversionError::Decode(
                "image row shorter than expected".to_string(),
            ));
        }
        rgb.extend_from_slice(&row[..width * 3]);
    }

    let img = RgbImage::from_raw(plane.width, plane.height, rgb)
        .ok_or_else(|| ConversionError::Decode("plane size mismatch".to_string()))?;

    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .map_err(|e| ConversionError::Encode(e.to_string()))?;

    Ok(out.into_inner())
}
