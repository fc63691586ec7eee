use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::frame::error::{FrameError, Result};

/// Bytes per pixel in a sensor frame. Channel order is `[B, G, R, X]`.
pub const BYTES_PER_PIXEL: usize = 4;

/// Default destination surface width.
pub const SCREEN_WIDTH: usize = 1024;

/// Default destination surface height.
pub const SCREEN_HEIGHT: usize = 768;

/// A destination pixel, stored as `[R, G, B, A]`.
///
/// `#[repr(C)]` + `Pod` lets a whole buffer be viewed as packed RGBA bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black, the fallback image before any frame arrives.
    pub const BLACK: Color = Color::opaque(0, 0, 0);

    /// Create a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    /// Convert a sensor pixel in `[B, G, R, X]` order. The X byte is
    /// discarded and alpha is forced opaque.
    pub const fn from_bgrx(pixel: [u8; 4]) -> Self {
        Self::opaque(pixel[2], pixel[1], pixel[0])
    }

    /// Pack as a `0RGB` word, the layout most software framebuffers expect.
    pub fn to_0rgb(self) -> u32 {
        u32::from_be_bytes([0, self.r, self.g, self.b])
    }
}

/// Destination surface dimensions. Fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: usize,
    pub height: usize,
}

impl ScreenSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of colors a destination buffer of this size holds.
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

/// Borrowed view of one sensor frame, checked against its declared size.
#[derive(Debug, Clone, Copy)]
pub struct SourceFrame<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> SourceFrame<'a> {
    /// Wrap a raw `[B, G, R, X]` buffer.
    ///
    /// Rejects zero dimensions, dimensions whose byte size overflows
    /// `usize`, and buffers whose length is not exactly `width * height * 4`.
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(FrameError::TooLarge { width, height })?;
        if data.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bgrx_swaps_channels_and_forces_alpha() {
        let color = Color::from_bgrx([10, 20, 30, 0]);
        assert_eq!(color, Color::opaque(30, 20, 10));
        assert_eq!(color.a, 255);
    }

    #[test]
    fn black_is_opaque() {
        assert_eq!(
            Color::BLACK,
            Color {
                r: 0,
                g: 0,
                b: 0,
                a: 255
            }
        );
    }

    #[test]
    fn to_0rgb_packs_red_in_high_byte() {
        assert_eq!(Color::opaque(0x12, 0x34, 0x56).to_0rgb(), 0x0012_3456);
    }

    #[test]
    fn color_is_four_packed_bytes() {
        assert_eq!(std::mem::size_of::<Color>(), 4);
        let color = Color::opaque(1, 2, 3);
        let bytes: &[u8] = bytemuck::bytes_of(&color);
        assert_eq!(bytes, &[1, 2, 3, 255]);
    }

    #[test]
    fn screen_size_defaults_to_1024x768() {
        let size = ScreenSize::default();
        assert_eq!(size, ScreenSize::new(1024, 768));
        assert_eq!(size.pixel_count(), 1024 * 768);
    }

    #[test]
    fn source_frame_accepts_matching_length() {
        let data = vec![0u8; 3 * 2 * 4];
        let frame = SourceFrame::new(&data, 3, 2).unwrap();
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.data().len(), 24);
    }

    #[test]
    fn source_frame_rejects_zero_dimensions() {
        let err = SourceFrame::new(&[], 0, 480).unwrap_err();
        assert_eq!(
            err,
            FrameError::ZeroDimension {
                width: 0,
                height: 480
            }
        );
    }

    #[test]
    fn source_frame_rejects_short_buffer() {
        let data = vec![0u8; 15];
        let err = SourceFrame::new(&data, 2, 2).unwrap_err();
        assert_eq!(
            err,
            FrameError::LengthMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn source_frame_rejects_overflowing_dimensions() {
        let err = SourceFrame::new(&[], usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            FrameError::TooLarge {
                width: usize::MAX,
                height: 2
            }
        );

        let side = u32::MAX as usize;
        assert!(matches!(
            SourceFrame::new(&[], side, side),
            Err(FrameError::TooLarge { .. })
        ));
    }

    #[test]
    fn source_frame_rejects_rgb24_sized_buffer() {
        // 3 bytes per pixel is a common mistake when the stream format changes
        let data = vec![0u8; 640 * 480 * 3];
        assert!(SourceFrame::new(&data, 640, 480).is_err());
    }
}
