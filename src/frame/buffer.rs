use crate::frame::remap::remap;
use crate::frame::types::{Color, ScreenSize, SourceFrame};

/// Fixed-size RGBA surface the presentation layer displays.
///
/// Allocated once at startup and rewritten in place by every remap. Its
/// length is always `size.width * size.height`; it is never resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationBuffer {
    pixels: Vec<Color>,
    size: ScreenSize,
}

impl DestinationBuffer {
    /// Allocate a buffer for `size`, filled with opaque black so it is safe
    /// to present before any sensor frame arrives.
    pub fn initialize(size: ScreenSize) -> Self {
        Self {
            pixels: vec![Color::BLACK; size.pixel_count()],
            size,
        }
    }

    pub fn size(&self) -> ScreenSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable access to the colors. The slice cannot change length.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Packed `[R, G, B, A]` bytes, e.g. for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Resample a validated sensor frame into this buffer.
    pub fn remap_from(&mut self, source: &SourceFrame<'_>) {
        remap(
            source.data(),
            source.width(),
            source.height(),
            &mut self.pixels,
            self.size.width,
            self.size.height,
        );
    }
}
