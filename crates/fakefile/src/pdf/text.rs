use crate::content::{ContentProvider, PageOptions};
use crate::error::Result;
use crate::metadata::MetaData;

use super::{ObjectWriter, escape_string};

const CATALOG: u32 = 1;
const RESOURCES: u32 = 2;
const FONT: u32 = 3;
const PAGES: u32 = 4;

/// Page object and content stream numbers of page `index`
fn page_ids(index: usize) -> (u32, u32) {
    let page = PAGES + 1 + 2 * index as u32;
    (page, page + 1)
}

/// Build a PDF 1.4 document with one line of text per page
///
/// Fails with `MissingInput` when neither `nb_pages` nor `texts` is given.
pub fn text_pdf(
    content: &dyn ContentProvider,
    pages: &PageOptions,
    metadata: Option<&mut MetaData>,
) -> Result<Vec<u8>> {
    let texts = pages.resolve(content)?;
    if let Some(metadata) = metadata {
        metadata.add_lines(&texts);
    }

    let mut writer = ObjectWriter::new("1.4")?;
    writer.object(CATALOG, &format!("<</Type /Catalog/Pages {PAGES} 0 R>>"))?;
    writer.object(RESOURCES, &format!("<</Font <</F1 {FONT} 0 R>>>>"))?;
    writer.object(FONT, "<</Type /Font/Subtype /Type1/BaseFont /Helvetica>>")?;

    let kids = (0..texts.len())
        .map(|i| format!("{} 0 R", page_ids(i).0))
        .collect::<Vec<_>>()
        .join(" ");
    writer.object(
        PAGES,
        &format!(
            "<</Type /Pages/Kids [{kids}]/Count {}/MediaBox [0 0 612 792]>>",
            texts.len()
        ),
    )?;

    for (i, text) in texts.iter().enumerate() {
        let (page, stream) = page_ids(i);
        writer.object(
            page,
            &format!("<</Type /Page/Parent {PAGES} 0 R/Resources {RESOURCES} 0 R/Contents {stream} 0 R>>"),
        )?;
        let ops = format!("BT /F1 24 Tf 100 700 Td ({}) Tj ET", escape_string(text));
        writer.stream(stream, "", ops.as_bytes())?;
    }

    writer.finish(CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::LoremProvider;
    use crate::pdf::testing::assert_offsets_match;

    #[test]
    fn test_text_pdf_pages_and_offsets() {
        let mut metadata = MetaData::new();
        let pages = PageOptions::default().with_texts(["Hello (world)", "Second page"]);
        let pdf = text_pdf(&LoremProvider, &pages, Some(&mut metadata)).unwrap();

        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert_eq!(assert_offsets_match(&pdf), 4 + 2 * 2);

        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Kids [5 0 R 7 0 R]/Count 2"));
        assert!(text.contains(r"BT /F1 24 Tf 100 700 Td (Hello \(world\)) Tj ET"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("trailer\n<</Size 9/Root 1 0 R>>"));
        assert_eq!(metadata.content.as_deref(), Some("Hello (world)\nSecond page"));
    }

    #[test]
    fn test_text_pdf_from_page_count() {
        let mut metadata = MetaData::new();
        let pages = PageOptions::empty().with_nb_pages(3);
        let pdf = text_pdf(&LoremProvider, &pages, Some(&mut metadata)).unwrap();
        assert_eq!(assert_offsets_match(&pdf), 10);
        assert_eq!(metadata.content.unwrap().lines().count(), 3);
    }

    #[test]
    fn test_text_pdf_requires_input() {
        let err = text_pdf(&LoremProvider, &PageOptions::empty(), None).unwrap_err();
        assert!(err.is_missing_input());
    }
}
