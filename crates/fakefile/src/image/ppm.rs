use super::{Rgb, Size, rgb_pixels};

/// Encode a binary (P6) PPM filled with `color`
pub fn ppm(size: Size, color: Rgb) -> Vec<u8> {
    let (width, height) = size;
    let mut out = format!("P6\n{width} {height}\n255\n").into_bytes();
    out.extend_from_slice(&rgb_pixels(size, color));
    out
}
