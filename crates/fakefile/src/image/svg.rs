use super::{Rgb, Size};

/// Render a full-size rectangle of `color` as an SVG document
pub fn svg(size: Size, color: Rgb) -> String {
    let (width, height) = size;
    let (r, g, b) = color;
    format!(
        "\n<svg width=\"{width}px\" height=\"{height}px\" xmlns=\"http://www.w3.org/2000/svg\">\n  \
         <rect width=\"100%\" height=\"100%\" fill=\"rgb({r}, {g}, {b})\" />\n</svg>\n"
    )
}
