use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, ImageFormat, Rgba};

use crate::frame::DestinationBuffer;
use crate::preview::error::{PreviewError, Result};

fn to_image(buffer: &DestinationBuffer) -> Result<ImageBuffer<Rgba<u8>, &[u8]>> {
    let size = buffer.size();
    ImageBuffer::from_raw(size.width as u32, size.height as u32, buffer.as_bytes()).ok_or_else(
        || PreviewError::Present(format!("buffer does not match {}x{}", size.width, size.height)),
    )
}

/// Encode the screen buffer as PNG.
pub fn encode_png(buffer: &DestinationBuffer) -> Result<Vec<u8>> {
    let img = to_image(buffer)?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Encode the screen buffer as JPEG at the given quality (1-100).
///
/// Alpha is always opaque in the buffer, so it is dropped.
pub fn encode_jpeg(buffer: &DestinationBuffer, quality: u8) -> Result<Vec<u8>> {
    let rgb: Vec<u8> = buffer
        .pixels()
        .iter()
        .flat_map(|c| [c.r, c.g, c.b])
        .collect();
    let size = buffer.size();

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    let img: ImageBuffer<image::Rgb<u8>, _> =
        ImageBuffer::from_raw(size.width as u32, size.height as u32, rgb).ok_or_else(|| {
            PreviewError::Present(format!("buffer does not match {}x{}", size.width, size.height))
        })?;
    img.write_with_encoder(encoder)?;
    Ok(out)
}

/// Save the screen buffer to `path`. `.jpg`/`.jpeg` write JPEG at quality
/// 85, anything else PNG.
pub fn save(buffer: &DestinationBuffer, path: &Path) -> Result<()> {
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));

    let bytes = if is_jpeg {
        encode_jpeg(buffer, 85)?
    } else {
        encode_png(buffer)?
    };
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Color, ScreenSize};

    fn gradient_buffer(width: usize, height: usize) -> DestinationBuffer {
        let mut buffer = DestinationBuffer::initialize(ScreenSize::new(width, height));
        for (i, pixel) in buffer.pixels_mut().iter_mut().enumerate() {
            let (x, y) = (i % width, i / width);
            *pixel = Color::opaque((x % 256) as u8, (y % 256) as u8, 128);
        }
        buffer
    }

    #[test]
    fn encode_png_produces_png_signature() {
        let png = encode_png(&gradient_buffer(64, 48)).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn png_decodes_back_to_same_pixels() {
        let buffer = gradient_buffer(16, 8);
        let png = encode_png(&buffer).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.as_raw().as_slice(), buffer.as_bytes());
    }

    #[test]
    fn encode_jpeg_produces_valid_jpeg_bytes() {
        let jpeg = encode_jpeg(&gradient_buffer(1024, 768), 85).unwrap();
        // JPEG files start with FF D8
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn encode_jpeg_lower_quality_produces_smaller_output() {
        let buffer = gradient_buffer(640, 480);
        let high = encode_jpeg(&buffer, 90).unwrap();
        let low = encode_jpeg(&buffer, 30).unwrap();
        assert!(
            low.len() < high.len(),
            "quality 30 ({}) should be smaller than quality 90 ({})",
            low.len(),
            high.len()
        );
    }

    #[test]
    fn save_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = gradient_buffer(8, 8);

        let png_path = dir.path().join("still.png");
        let jpg_path = dir.path().join("still.JPG");
        save(&buffer, &png_path).unwrap();
        save(&buffer, &jpg_path).unwrap();

        assert_eq!(std::fs::read(&png_path).unwrap()[0], 0x89);
        assert_eq!(std::fs::read(&jpg_path).unwrap()[..2], [0xFFu8, 0xD8]);
    }

    #[test]
    fn black_fallback_buffer_encodes() {
        let buffer = DestinationBuffer::initialize(ScreenSize::default());
        assert!(encode_png(&buffer).is_ok());
    }
}
