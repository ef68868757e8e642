use crate::error::{LibraryResult, PhotoLibraryError};
use crate::models::{ImageData, PhotoFormat};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::DynamicImage;
use std::io::Write;

/// Standard alphabet, padding optional, like the host platform's default decoder
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Turns the wire payload into encoded image bytes.
///
/// Accepts line-wrapped base64 and `data:<mime>;base64,` URLs.
pub fn payload_bytes(data: &ImageData) -> LibraryResult<Vec<u8>> {
    if data.is_empty() {
        return Err(PhotoLibraryError::MissingImageData);
    }
    match data {
        ImageData::Bytes(bytes) => Ok(bytes.clone()),
        ImageData::Base64(text) => {
            let body = match text.find(";base64,") {
                Some(idx) if text.starts_with("data:") => &text[idx + ";base64,".len()..],
                _ => text.as_str(),
            };
            let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
            Ok(PAYLOAD_ENGINE.decode(compact)?)
        }
    }
}

/// Decodes the payload into a bitmap.
///
/// Runs before any storage strategy so a bad payload never touches disk.
pub fn decode_image(data: &ImageData) -> LibraryResult<DynamicImage> {
    let bytes = payload_bytes(data)?;
    let img = image::load_from_memory(&bytes).map_err(PhotoLibraryError::Decode)?;
    log::debug!(
        "Decoded image {}x{} ({} bytes)",
        img.width(),
        img.height(),
        bytes.len()
    );
    Ok(img)
}

/// Compresses `img` into `out`.
///
/// JPEG has no alpha channel, so the bitmap is flattened to RGB first. PNG
/// is lossless and ignores `quality`.
pub fn encode_image<W: Write>(
    img: &DynamicImage,
    format: PhotoFormat,
    quality: u8,
    out: W,
) -> LibraryResult<()> {
    let result = match format {
        PhotoFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(out, quality);
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)
        }
        PhotoFormat::Png => img.write_with_encoder(PngEncoder::new(out)),
    };
    result.map_err(PhotoLibraryError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 2, Rgba([200, 10, 10, 128]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_empty_payload_is_invalid_input() {
        let err = decode_image(&ImageData::Base64(String::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_garbage_is_decode_failure() {
        let err = decode_image(&ImageData::Base64("!!not base64!!".into())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);

        let err = decode_image(&ImageData::Bytes(b"hello world".to_vec())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    }

    #[test]
    fn test_data_url_and_line_breaks() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes());
        let wrapped: String = encoded
            .as_bytes()
            .chunks(16)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        let url = format!("data:image/png;base64,{}", wrapped);

        let img = decode_image(&ImageData::Base64(url)).unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
    }

    #[test]
    fn test_unpadded_base64() {
        let encoded = base64::engine::general_purpose::STANDARD_NO_PAD.encode(png_bytes());
        assert!(decode_image(&ImageData::Base64(encoded)).is_ok());
    }

    #[test]
    fn test_jpeg_from_rgba_source() {
        let img = image::load_from_memory(&png_bytes()).unwrap();
        let mut out = Vec::new();
        encode_image(&img, PhotoFormat::Jpeg, 80, &mut out).unwrap();
        assert_eq!(
            image::guess_format(&out).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_png_keeps_alpha() {
        let img = image::load_from_memory(&png_bytes()).unwrap();
        let mut out = Vec::new();
        encode_image(&img, PhotoFormat::Png, 100, &mut out).unwrap();
        let back = image::load_from_memory_with_format(&out, ImageFormat::Png).unwrap();
        assert_eq!(back.to_rgba8().get_pixel(0, 0), &Rgba([200, 10, 10, 128]));
    }
}
