use crate::compress;
use crate::error::Result;

use super::{Rgb, Size};

const SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Append one `length | type | data | crc` chunk
fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&compress::crc32(&[kind, data]).to_be_bytes());
}

/// Encode a truecolor 8-bit PNG filled with `color`
pub fn png(size: Size, color: Rgb) -> Result<Vec<u8>> {
    let (width, height) = size;
    let (r, g, b) = color;

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    // depth 8, color type 2 (RGB), deflate, no filter, no interlace
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);

    // Every scanline uses filter type 0
    let mut row = Vec::with_capacity(1 + 3 * width as usize);
    row.push(0);
    row.extend_from_slice(&[r, g, b].repeat(width as usize));
    let idat = compress::zlib(&row.repeat(height as usize))?;

    let mut out = Vec::with_capacity(SIGNATURE.len() + 25 + idat.len() + 12 + 12);
    out.extend_from_slice(SIGNATURE);
    write_chunk(&mut out, b"IHDR", &ihdr);
    write_chunk(&mut out, b"IDAT", &idat);
    write_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}
