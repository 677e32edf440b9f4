use crate::content::{ContentProvider, PageOptions};
use crate::error::Result;
use crate::metadata::MetaData;

use super::{ZipEntry, build_zip, escape_xml};

const DOCUMENT_HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    "<w:body>",
);
const DOCUMENT_FOOTER: &str = "</w:body></w:document>";
const PAGE_BREAK: &str = r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#;

const PACKAGE_RELS: &str = concat!(
    "<?xml version='1.0' encoding='UTF-8' standalone='yes'?>",
    "<Relationships xmlns='http://schemas.openxmlformats.org/package/2006/relationships'>",
    "<Relationship Id='rId1' ",
    "Type='http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument' ",
    "Target='word/document.xml'/>",
    "</Relationships>",
);

const DOCUMENT_RELS: &str = concat!(
    "<?xml version='1.0' encoding='UTF-8' standalone='yes'?>",
    "<Relationships xmlns='http://schemas.openxmlformats.org/package/2006/relationships'>",
    "<Relationship Id='rId1' ",
    "Type='http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles' ",
    "Target='styles.xml'/>",
    "</Relationships>",
);

const STYLES: &str = concat!(
    "<?xml version='1.0' encoding='UTF-8' standalone='yes'?>",
    "<w:styles xmlns:w='http://schemas.openxmlformats.org/wordprocessingml/2006/main'>",
    "<w:style w:type='paragraph' w:default='1' w:styleId='Normal'>",
    "<w:name w:val='Normal'/><w:qFormat/></w:style></w:styles>",
);

const CONTENT_TYPES: &str = concat!(
    "<?xml version='1.0' encoding='UTF-8' standalone='yes'?>",
    "<Types xmlns='http://schemas.openxmlformats.org/package/2006/content-types'>",
    "<Default Extension='rels' ContentType='application/vnd.openxmlformats-package.relationships+xml'/>",
    "<Default Extension='xml' ContentType='application/xml'/>",
    "<Override PartName='/word/document.xml' ",
    "ContentType='application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml'/>",
    "<Override PartName='/word/styles.xml' ",
    "ContentType='application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml'/>",
    "</Types>",
);

fn document_xml(texts: &[String]) -> String {
    let pages = texts
        .iter()
        .map(|text| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", escape_xml(text)))
        .collect::<Vec<_>>()
        .join(PAGE_BREAK);
    format!("{DOCUMENT_HEADER}{pages}{DOCUMENT_FOOTER}")
}

/// Build a WordprocessingML document with one paragraph per page
pub fn docx(
    content: &dyn ContentProvider,
    pages: &PageOptions,
    metadata: Option<&mut MetaData>,
) -> Result<Vec<u8>> {
    let texts = pages.resolve(content)?;
    if let Some(metadata) = metadata {
        metadata.add_lines(&texts);
    }

    let document = document_xml(&texts);
    build_zip([
        ZipEntry::deflated("word/document.xml", document.as_bytes()),
        ZipEntry::deflated("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ZipEntry::deflated("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
        ZipEntry::deflated("word/styles.xml", STYLES.as_bytes()),
        ZipEntry::deflated("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::LoremProvider;
    use crate::document::testing::{entry_names, read_entry};

    #[test]
    fn test_docx_entries() {
        let bytes = docx(&LoremProvider, &PageOptions::default(), None).unwrap();
        assert_eq!(
            entry_names(&bytes),
            [
                "word/document.xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/styles.xml",
                "[Content_Types].xml",
            ]
        );
    }

    #[test]
    fn test_docx_page_breaks_between_pages() {
        let mut metadata = MetaData::new();
        let pages = PageOptions::default().with_texts(["one", "two & three", "four"]);
        let bytes = docx(&LoremProvider, &pages, Some(&mut metadata)).unwrap();

        let document = read_entry(&bytes, "word/document.xml");
        assert!(document.contains("<w:body><w:p><w:r><w:t>one</w:t>"));
        assert!(document.contains("<w:t>two &amp; three</w:t>"));
        assert_eq!(document.matches(PAGE_BREAK).count(), 2);
        assert!(document.ends_with("<w:t>four</w:t></w:r></w:p></w:body></w:document>"));
        assert_eq!(metadata.content.as_deref(), Some("one\ntwo & three\nfour"));
    }

    #[test]
    fn test_docx_requires_input() {
        let err = docx(&LoremProvider, &PageOptions::empty(), None).unwrap_err();
        assert!(err.is_missing_input());
    }
}
