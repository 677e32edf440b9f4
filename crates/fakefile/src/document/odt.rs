use crate::content::{ContentProvider, PageOptions};
use crate::error::Result;
use crate::metadata::MetaData;

use super::{ZipEntry, build_zip, escape_xml};

const MIMETYPE: &str = "application/vnd.oasis.opendocument.text";

const CONTENT_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content
 xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"
 xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"
 xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0"
 xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0"
 xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0">
  <office:body>
    <office:text>
"#;

const CONTENT_FOOTER: &str = r#"
    </office:text>
  </office:body>
</office:document-content>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles
 xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"
 xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0"
 xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"
 xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0">
  <office:styles>
    <style:style style:name="P1" style:family="paragraph">
      <style:paragraph-properties fo:break-before="page"/>
    </style:style>
  </office:styles>
</office:document-styles>"#;

const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest
  xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0">
  <manifest:file-entry
    manifest:media-type="application/vnd.oasis.opendocument.text"
    manifest:full-path="/"/>
  <manifest:file-entry
    manifest:media-type="text/xml"
    manifest:full-path="content.xml"/>
  <manifest:file-entry
    manifest:media-type="text/xml" manifest:full-path="styles.xml"/>
</manifest:manifest>"#;

fn content_xml(texts: &[String]) -> String {
    let mut content = String::from(CONTENT_HEADER);
    for text in texts {
        // P1 starts a new page
        content.push_str(&format!(
            r#"<text:p text:style-name="P1">{}</text:p>"#,
            escape_xml(text)
        ));
    }
    content.push_str(CONTENT_FOOTER);
    content
}

/// Build an OpenDocument text with one paragraph per page
pub fn odt(
    content: &dyn ContentProvider,
    pages: &PageOptions,
    metadata: Option<&mut MetaData>,
) -> Result<Vec<u8>> {
    let texts = pages.resolve(content)?;
    if let Some(metadata) = metadata {
        metadata.add_lines(&texts);
    }

    let content = content_xml(&texts);
    // The mimetype entry must come first and stay uncompressed
    build_zip([
        ZipEntry::stored("mimetype", MIMETYPE.as_bytes()),
        ZipEntry::deflated("content.xml", content.as_bytes()),
        ZipEntry::deflated("styles.xml", STYLES.as_bytes()),
        ZipEntry::deflated("META-INF/manifest.xml", MANIFEST.as_bytes()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::LoremProvider;
    use crate::document::testing::{entry_names, read_entry};
    use std::io::Cursor;

    #[test]
    fn test_odt_mimetype_first_and_stored() {
        let bytes = odt(&LoremProvider, &PageOptions::default().with_nb_pages(2), None).unwrap();
        assert_eq!(
            entry_names(&bytes),
            ["mimetype", "content.xml", "styles.xml", "META-INF/manifest.xml"]
        );

        let mut archive = zip::ZipArchive::new(Cursor::new(&bytes[..])).unwrap();
        let mimetype = archive.by_index(0).unwrap();
        assert_eq!(mimetype.compression(), zip::CompressionMethod::Stored);
        drop(mimetype);
        assert_eq!(read_entry(&bytes, "mimetype"), MIMETYPE);
        // Readers sniff the mimetype right after the first local header
        assert_eq!(&bytes[30..38], b"mimetype");
    }

    #[test]
    fn test_odt_paragraphs() {
        let mut metadata = MetaData::new();
        let pages = PageOptions::default().with_texts(["<first>", "second"]);
        let bytes = odt(&LoremProvider, &pages, Some(&mut metadata)).unwrap();

        let content = read_entry(&bytes, "content.xml");
        assert_eq!(content.matches(r#"<text:p text:style-name="P1">"#).count(), 2);
        assert!(content.contains("&lt;first&gt;"));
        assert!(read_entry(&bytes, "styles.xml").contains(r#"fo:break-before="page""#));
        assert_eq!(metadata.content.as_deref(), Some("<first>\nsecond"));
    }

    #[test]
    fn test_odt_requires_input() {
        let err = odt(&LoremProvider, &PageOptions::empty(), None).unwrap_err();
        assert!(err.is_missing_input());
    }
}
