use super::{Rgb, Size};
use crate::error::{Result, header_field};

const HEADER_SIZE: u32 = 14 + 40;
/// 72 DPI expressed in pixels per meter
const RESOLUTION: i32 = 2835;

/// Encode an uncompressed 24-bit bottom-up BMP filled with `color`
pub fn bmp(size: Size, color: Rgb) -> Result<Vec<u8>> {
    let (width, height) = size;
    let (r, g, b) = color;

    let row_len = (3 * u64::from(width)).div_ceil(4) * 4;
    let file_size: u32 = header_field("size", u64::from(HEADER_SIZE) + row_len * u64::from(height))?;
    let image_size = file_size - HEADER_SIZE;
    let signed_width: i32 = header_field("width", width)?;
    let signed_height: i32 = header_field("height", height)?;

    let mut row = [b, g, r].repeat(width as usize);
    row.resize(row_len as usize, 0);

    let mut out = Vec::with_capacity(file_size as usize);
    // File header
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&HEADER_SIZE.to_le_bytes());
    // BITMAPINFOHEADER
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&signed_width.to_le_bytes());
    out.extend_from_slice(&signed_height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&RESOLUTION.to_le_bytes());
    out.extend_from_slice(&RESOLUTION.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for _ in 0..height {
        out.extend_from_slice(&row);
    }
    Ok(out)
}
