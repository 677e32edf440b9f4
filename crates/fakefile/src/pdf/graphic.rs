use serde::{Deserialize, Serialize};

use crate::compress;
use crate::error::Result;
use crate::image::{Rgb, Size, rgb_pixels};
use crate::metadata::MetaData;

use super::ObjectWriter;

const CATALOG: u32 = 1;
const PAGES: u32 = 2;
const IMAGE: u32 = 3;

/// Page count and the image drawn on every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphicPdfOptions {
    pub nb_pages: usize,
    pub image_size: Size,
    pub image_color: Rgb,
}

impl Default for GraphicPdfOptions {
    fn default() -> Self {
        Self {
            nb_pages: 1,
            image_size: (100, 100),
            image_color: (255, 0, 0),
        }
    }
}

impl GraphicPdfOptions {
    pub fn with_nb_pages(mut self, nb_pages: usize) -> Self {
        self.nb_pages = nb_pages;
        self
    }

    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_size = (width, height);
        self
    }

    pub fn with_image_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.image_color = (r, g, b);
        self
    }
}

/// Build a PDF whose pages all draw the same flat-color image
///
/// Objects: catalog, page tree, the shared image, then every page followed
/// by every content stream, `2 * nb_pages + 3` in total.
pub fn graphic_pdf(options: &GraphicPdfOptions, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
    let nb_pages = options.nb_pages as u32;
    let (width, height) = options.image_size;
    let (r, g, b) = options.image_color;
    if let Some(metadata) = metadata {
        metadata.add_content(format!(
            "{nb_pages} page(s) showing a {width}x{height} image of rgb({r}, {g}, {b})"
        ));
    }

    let page_id = |i: u32| IMAGE + 1 + i;
    let content_id = |i: u32| IMAGE + 1 + nb_pages + i;

    let mut writer = ObjectWriter::new("1.4")?;
    writer.object(CATALOG, &format!("<</Type /Catalog/Pages {PAGES} 0 R>>"))?;

    let kids = (0..nb_pages)
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect::<Vec<_>>()
        .join(" ");
    writer.object(PAGES, &format!("<</Type /Pages/Kids [{kids}]/Count {nb_pages}>>"))?;

    let pixels = compress::zlib(&rgb_pixels(options.image_size, options.image_color))?;
    writer.stream(
        IMAGE,
        &format!(
            "/Type /XObject/Subtype /Image/Width {width}/Height {height}\
             /ColorSpace /DeviceRGB/BitsPerComponent 8/Filter /FlateDecode"
        ),
        &pixels,
    )?;

    for i in 0..nb_pages {
        writer.object(
            page_id(i),
            &format!(
                "<</Type /Page/Parent {PAGES} 0 R/MediaBox [0 0 612 792]\
                 /Resources <</XObject <</Im{IMAGE} {IMAGE} 0 R>>>>/Contents {} 0 R>>",
                content_id(i)
            ),
        )?;
    }
    let draw = format!("q\n100 0 0 100 0 0 cm\n/Im{IMAGE} Do\nQ\n");
    for i in 0..nb_pages {
        writer.stream(content_id(i), "", draw.as_bytes())?;
    }

    writer.finish(CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::assert_offsets_match;
    use std::io::Read;

    #[test]
    fn test_graphic_pdf_offsets() {
        for nb_pages in [1, 2, 7] {
            let options = GraphicPdfOptions::default().with_nb_pages(nb_pages);
            let pdf = graphic_pdf(&options, None).unwrap();
            assert_eq!(assert_offsets_match(&pdf), nb_pages * 2 + 3);
        }
    }

    #[test]
    fn test_graphic_pdf_image_stream() {
        let options = GraphicPdfOptions::default()
            .with_nb_pages(2)
            .with_image_size(4, 3)
            .with_image_color(1, 2, 3);
        let mut metadata = MetaData::new();
        let pdf = graphic_pdf(&options, Some(&mut metadata)).unwrap();
        let text = String::from_utf8_lossy(&pdf);

        assert!(text.contains("/Kids [4 0 R 5 0 R]/Count 2"));
        assert!(text.contains("/Width 4/Height 3"));
        assert_eq!(text.matches("/Im3 Do").count(), 2);
        assert!(metadata.content.unwrap().starts_with("2 page(s)"));

        let marker = b"/Filter /FlateDecode/Length ";
        let at = pdf.windows(marker.len()).position(|w| w == marker).unwrap() + marker.len();
        let rest = &pdf[at..];
        let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        let length: usize = std::str::from_utf8(&rest[..digits]).unwrap().parse().unwrap();
        let data_start = at + digits + ">>\nstream\n".len();

        let mut raw = Vec::new();
        flate2::read::ZlibDecoder::new(&pdf[data_start..data_start + length])
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(raw, [1, 2, 3].repeat(12));
    }
}
