//! Assertion helpers for tests.

use postly::rendering::Surface;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Assert bytes are a PNG image
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert bytes are a JPEG image
pub fn assert_jpeg(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&[0xFF, 0xD8]),
        "Expected JPEG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..2.min(bytes.len())]
    );
}

/// Pixels inside the rectangle that differ from `background`
pub fn count_differing(
    surface: &Surface,
    background: [u8; 4],
    (x0, y0): (u32, u32),
    (x1, y1): (u32, u32),
) -> usize {
    (y0..y1)
        .flat_map(|y| (x0..x1).map(move |x| (x, y)))
        .filter(|&(x, y)| surface.pixel(x, y).is_some_and(|px| px != background))
        .count()
}
