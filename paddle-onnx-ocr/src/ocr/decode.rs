use crate::error::{OcrError, Result};
use image::{DynamicImage, ImageReader, RgbImage};

/// Decode raw image bytes (PNG, JPEG, BMP, ...) into an RGB bitmap for the engine.
///
/// The format is sniffed from the bytes. Alpha is dropped since the detector
/// expects three channels.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(OcrError::Decode("image data is empty".to_string()));
    }

    let reader = ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| OcrError::Decode(format!("failed to read image: {e}")))?;

    if reader.format().is_none() {
        return Err(OcrError::Decode("unrecognized image format".to_string()));
    }

    let img = reader
        .decode()
        .map_err(|e| OcrError::Decode(e.to_string()))?;

    Ok(to_rgb(img))
}

fn to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}
