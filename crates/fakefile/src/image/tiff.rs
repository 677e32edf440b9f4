use super::{Rgb, Size, rgb_pixels};
use crate::error::{Result, header_field};

const HEADER: [u8; 8] = *b"II*\x00\x08\x00\x00\x00";
const ENTRY_COUNT: u32 = 12;
/// Header, entry count, entries and next IFD pointer
const DATA_OFFSET: u32 = 8 + 2 + 12 * ENTRY_COUNT + 4;
/// Bits-per-sample array and two rationals
const TRAILER_SIZE: u32 = 6 + 16;

const SHORT: u16 = 3;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

/// Encode an uncompressed little-endian RGB TIFF with a single strip
///
/// The pixel data follows the IFD directly; the bits-per-sample array and
/// the two resolution rationals (72/1) are stored after the pixels.
pub fn tiff(size: Size, color: Rgb) -> Result<Vec<u8>> {
    let (width, height) = size;
    let pixel_bytes = 3 * u64::from(width) * u64::from(height);
    let file_size: u32 = header_field(
        "size",
        u64::from(DATA_OFFSET) + pixel_bytes + u64::from(TRAILER_SIZE),
    )?;
    let image_size = file_size - DATA_OFFSET - TRAILER_SIZE;
    let extra = DATA_OFFSET + image_size;
    let pixels = rgb_pixels(size, color);

    let entries: [(u16, u16, u32, u32); ENTRY_COUNT as usize] = [
        (256, LONG, 1, width),
        (257, LONG, 1, height),
        (258, SHORT, 3, extra),
        (259, SHORT, 1, 1),
        (262, SHORT, 1, 2),
        (273, LONG, 1, DATA_OFFSET),
        (277, SHORT, 1, 3),
        (278, LONG, 1, height),
        (279, LONG, 1, image_size),
        (282, RATIONAL, 1, extra + 6),
        (283, RATIONAL, 1, extra + 14),
        (284, SHORT, 1, 1),
    ];

    let mut out = Vec::with_capacity(file_size as usize);
    out.extend_from_slice(&HEADER);
    out.extend_from_slice(&(ENTRY_COUNT as u16).to_le_bytes());
    for (tag, kind, count, value) in entries {
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&0u32.to_le_bytes());

    out.extend_from_slice(&pixels);
    for _ in 0..3 {
        out.extend_from_slice(&8u16.to_le_bytes());
    }
    for _ in 0..2 {
        out.extend_from_slice(&72u32.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_u16(bytes: &[u8], at: usize) -> u16 {
        u16::from_le_bytes(bytes[at..at + 2].try_into().unwrap())
    }

    fn le_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    /// Value field of the IFD entry carrying `tag`
    fn tag_value(bytes: &[u8], tag: u16) -> u32 {
        let count = le_u16(bytes, 8) as usize;
        (0..count)
            .map(|i| 10 + 12 * i)
            .find(|&at| le_u16(bytes, at) == tag)
            .map(|at| le_u32(bytes, at + 8))
            .unwrap()
    }

    #[test]
    fn test_tiff_strip_points_at_pixels() {
        let bytes = tiff((4, 3), (1, 2, 3)).unwrap();
        assert_eq!(&bytes[..4], b"II*\x00");
        assert_eq!(le_u32(&bytes, 4), 8);
        assert_eq!(le_u16(&bytes, 8), 12);

        let offset = tag_value(&bytes, 273) as usize;
        let count = tag_value(&bytes, 279) as usize;
        assert_eq!(offset, 158);
        assert_eq!(count, 4 * 3 * 3);
        assert_eq!(&bytes[offset..offset + count], [1, 2, 3].repeat(12).as_slice());
        assert_eq!(tag_value(&bytes, 256), 4);
        assert_eq!(tag_value(&bytes, 257), 3);
        assert_eq!(tag_value(&bytes, 278), 3);
    }

    #[test]
    fn test_tiff_trailing_values() {
        let bytes = tiff((2, 2), (0, 0, 0)).unwrap();
        let bits = tag_value(&bytes, 258) as usize;
        assert_eq!(&bytes[bits..bits + 6], &[8, 0, 8, 0, 8, 0]);
        for tag in [282, 283] {
            let at = tag_value(&bytes, tag) as usize;
            assert_eq!(le_u32(&bytes, at), 72);
            assert_eq!(le_u32(&bytes, at + 4), 1);
        }
        assert_eq!(bytes.len(), 158 + 12 + 6 + 16);
    }

    #[test]
    fn test_tiff_rejects_offsets_past_4_gib() {
        let err = tiff((40_000, 40_000), (0, 0, 0)).unwrap_err();
        assert!(err.is_invalid_format());
    }
}
