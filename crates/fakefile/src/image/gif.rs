use super::{Rgb, Size};
use crate::error::{Result, header_field};

/// Global color table present, 8-bit color resolution, 256 entries
const PACKED_FIELDS: u8 = 0xF7;
/// LZW stream for a flat image of color index 0
const IMAGE_DATA: [u8; 4] = [0x02, 0x4C, 0x01, 0x00];
const TRAILER: u8 = 0x3B;

/// Encode a flat GIF89a whose palette entry 0 is `color`
///
/// Both dimensions must fit the 16-bit screen descriptor fields.
pub fn gif(size: Size, color: Rgb) -> Result<Vec<u8>> {
    let (width, height) = size;
    let (r, g, b) = color;
    let width = header_field::<u16, _>("width", width)?.to_le_bytes();
    let height = header_field::<u16, _>("height", height)?.to_le_bytes();

    let mut out = Vec::with_capacity(13 + 768 + 10 + 1 + IMAGE_DATA.len() + 1);
    out.extend_from_slice(b"GIF89a");

    // Logical screen descriptor
    out.extend_from_slice(&width);
    out.extend_from_slice(&height);
    out.extend_from_slice(&[PACKED_FIELDS, 0, 0]);

    // Global color table, rest black
    out.extend_from_slice(&[r, g, b]);
    out.resize(out.len() + 3 * 255, 0);

    // Image descriptor
    out.push(0x2C);
    out.extend_from_slice(&[0, 0, 0, 0]);
    out.extend_from_slice(&width);
    out.extend_from_slice(&height);
    out.push(0);

    out.push(8);
    out.extend_from_slice(&IMAGE_DATA);
    out.push(TRAILER);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gif_layout() {
        let bytes = gif((300, 2), (9, 8, 7)).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
        assert_eq!(&bytes[6..8], &300u16.to_le_bytes());
        assert_eq!(&bytes[8..10], &2u16.to_le_bytes());
        assert_eq!(bytes[10], 0xF7);
        assert_eq!(&bytes[13..16], &[9, 8, 7]);
        assert!(bytes[16..13 + 768].iter().all(|&byte| byte == 0));

        let descriptor = 13 + 768;
        assert_eq!(bytes[descriptor], 0x2C);
        assert_eq!(&bytes[descriptor + 5..descriptor + 7], &300u16.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 6..], &[8, 0x02, 0x4C, 0x01, 0x00, 0x3B]);
        assert_eq!(bytes.len(), 13 + 768 + 10 + 6);
    }

    #[test]
    fn test_gif_rejects_wide_images() {
        assert!(gif((65_535, 1), (0, 0, 0)).is_ok());
        let err = gif((65_536, 1), (0, 0, 0)).unwrap_err();
        assert!(err.is_invalid_format());
        assert!(gif((1, 70_000), (0, 0, 0)).unwrap_err().is_invalid_format());
    }
}
