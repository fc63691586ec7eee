use crate::frame::types::{Color, BYTES_PER_PIXEL};

/// Resample a `[B, G, R, X]` sensor frame onto a fixed-size RGBA buffer.
///
/// Nearest-neighbor, independent per axis: destination pixel `(x, y)` reads
/// source pixel `(x * image_width / screen_width, y * image_height / screen_height)`
/// with truncating integer division. Every element of `dest` is rewritten.
///
/// # Panics
///
/// If `source.len() != image_width * image_height * 4`, if either image
/// dimension is zero, or if `dest.len() != screen_width * screen_height`.
/// These are caller errors; validate with [`SourceFrame::new`] first.
///
/// [`SourceFrame::new`]: crate::frame::SourceFrame::new
pub fn remap(
    source: &[u8],
    image_width: usize,
    image_height: usize,
    dest: &mut [Color],
    screen_width: usize,
    screen_height: usize,
) {
    assert!(
        image_width > 0 && image_height > 0,
        "source frame has a zero dimension: {image_width}x{image_height}"
    );
    assert_eq!(
        source.len(),
        image_width * image_height * BYTES_PER_PIXEL,
        "source length does not match {image_width}x{image_height}"
    );
    assert_eq!(
        dest.len(),
        screen_width * screen_height,
        "destination length does not match {screen_width}x{screen_height}"
    );

    if dest.is_empty() {
        return;
    }

    for (y, row) in dest.chunks_exact_mut(screen_width).enumerate() {
        let src_row = (y * image_height / screen_height) * image_width;
        for (x, pixel) in row.iter_mut().enumerate() {
            let cell = (src_row + x * image_width / screen_width) * BYTES_PER_PIXEL;
            *pixel = Color::opaque(source[cell + 2], source[cell + 1], source[cell]);
        }
    }
}
