//! Single-color raster (and SVG) image encoders
//!
//! Each encoder is a pure function of `(size, color)`. Width and height are
//! expected to be positive; zero is not rejected. Sizes the format's header
//! fields cannot describe are `InvalidFormat`.

mod bmp;
mod gif;
mod png;
mod ppm;
mod svg;
mod tiff;

pub use bmp::bmp;
pub use gif::gif;
pub use png::png;
pub use ppm::ppm;
pub use svg::svg;
pub use tiff::tiff;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FakefileError, Result, invalid_format};

/// `(width, height)` in pixels
pub type Size = (u32, u32);

/// `(red, green, blue)`
pub type Rgb = (u8, u8, u8);

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
    Bmp,
    Gif,
    Tif,
    Ppm,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 6] = [
        ImageFormat::Png,
        ImageFormat::Svg,
        ImageFormat::Bmp,
        ImageFormat::Gif,
        ImageFormat::Tif,
        ImageFormat::Ppm,
    ];

    /// File extension, also the canonical name
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Gif => "gif",
            ImageFormat::Tif => "tif",
            ImageFormat::Ppm => "ppm",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = FakefileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            "bmp" => Ok(ImageFormat::Bmp),
            "gif" => Ok(ImageFormat::Gif),
            "tif" | "tiff" => Ok(ImageFormat::Tif),
            "ppm" => Ok(ImageFormat::Ppm),
            other => Err(invalid_format(
                "image_format",
                format!("unsupported image format `{other}`"),
            )),
        }
    }
}

/// Size and color of a generated image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub size: Size,
    pub color: Rgb,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            size: (100, 100),
            color: (0, 0, 255),
        }
    }
}

impl ImageOptions {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = (r, g, b);
        self
    }
}

/// Encode a single-color image in the requested format
pub fn encode(format: ImageFormat, size: Size, color: Rgb) -> Result<Vec<u8>> {
    match format {
        ImageFormat::Png => png(size, color),
        ImageFormat::Svg => Ok(svg(size, color).into_bytes()),
        ImageFormat::Bmp => bmp(size, color),
        ImageFormat::Gif => gif(size, color),
        ImageFormat::Tif => tiff(size, color),
        ImageFormat::Ppm => Ok(ppm(size, color)),
    }
}

/// `width * height` copies of the RGB triple
pub(crate) fn rgb_pixels(size: Size, color: Rgb) -> Vec<u8> {
    let (width, height) = size;
    let (r, g, b) = color;
    [r, g, b].repeat(width as usize * height as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        for format in ImageFormat::ALL {
            assert_eq!(format.extension().parse::<ImageFormat>().unwrap(), format);
        }
        assert_eq!("TIFF".parse::<ImageFormat>().unwrap(), ImageFormat::Tif);
        assert!("jpeg".parse::<ImageFormat>().unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_every_format_has_its_signature() {
        let cases: [(ImageFormat, &[u8]); 6] = [
            (ImageFormat::Png, b"\x89PNG\r\n\x1a\n"),
            (ImageFormat::Svg, b"\n<svg"),
            (ImageFormat::Bmp, b"BM"),
            (ImageFormat::Gif, b"GIF89a"),
            (ImageFormat::Tif, b"II*\x00"),
            (ImageFormat::Ppm, b"P6\n"),
        ];
        for (width, height) in [(1, 1), (3, 2), (17, 5)] {
            for (format, magic) in cases {
                let bytes = encode(format, (width, height), (12, 34, 56)).unwrap();
                assert!(bytes.starts_with(magic), "{format} signature");
            }
        }
    }

    #[test]
    fn test_rgb_pixels() {
        assert_eq!(rgb_pixels((2, 1), (1, 2, 3)), vec![1, 2, 3, 1, 2, 3]);
    }
}
