use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rand::Rng;
use rand::distributions::Alphanumeric;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc2822;

use crate::error::{EncodingError, Result, invalid_format};
use crate::generator::Generator;
use crate::metadata::MetaData;

use super::{ArchiveOptions, collect_inner_files};

const CRLF: &str = "\r\n";
const BASE64_LINE: usize = 76;

/// Message fields and attachments
///
/// `archive.producer` is `None` by default: a plain single-part message.
/// Subject and body come from the content provider when unset.
#[derive(Debug, Clone, Default)]
pub struct EmlOptions {
    pub archive: ArchiveOptions,
    pub content: Option<String>,
    pub subject: Option<String>,
}

impl EmlOptions {
    pub fn with_archive(mut self, archive: ArchiveOptions) -> Self {
        self.archive = archive;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// RFC 2047 encoded-word for non-ASCII header values
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?utf-8?b?{}?=", BASE64.encode(value))
    }
}

/// Caller-supplied header value; line breaks would start new headers
fn header_value(parameter: &str, value: &str) -> Result<String> {
    if value.chars().any(char::is_control) {
        return Err(invalid_format(
            parameter,
            "header values cannot contain control characters",
        ));
    }
    Ok(encode_header(value))
}

/// `filename` parameter of a Content-Disposition header
///
/// Plain ASCII names are quoted; anything else uses the RFC 2231
/// `filename*` form.
fn filename_parameter(name: &str) -> String {
    if name.is_ascii() && !name.chars().any(|c| c.is_ascii_control()) {
        let quoted = name.replace('\\', "\\\\").replace('"', "\\\"");
        format!("filename=\"{quoted}\"")
    } else {
        format!("filename*=utf-8''{}", urlencoding::encode(name))
    }
}

fn random_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

fn text_part_headers(body: &str) -> String {
    let encoding = if body.is_ascii() { "7bit" } else { "8bit" };
    format!(
        "Content-Type: text/plain; charset=\"utf-8\"{CRLF}Content-Transfer-Encoding: {encoding}{CRLF}"
    )
}

/// Body text with CRLF line endings and a final line break
fn normalize_body(body: &str) -> String {
    let mut normalized = body.lines().collect::<Vec<_>>().join(CRLF);
    normalized.push_str(CRLF);
    normalized
}

fn base64_lines(data: &[u8]) -> String {
    let encoded = BASE64.encode(data);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE * 2 + 2);
    // Base64 output is ASCII
    for line in encoded.as_bytes().chunks(BASE64_LINE) {
        out.push_str(&String::from_utf8_lossy(line));
        out.push_str(CRLF);
    }
    out
}

/// Build an RFC 5322 message, with one attachment per produced file
pub fn eml(generator: &Generator, options: &EmlOptions, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
    let content = generator.content();
    let body = match &options.content {
        Some(body) if !body.is_empty() => body.clone(),
        _ => content.text(200),
    };
    let subject = match &options.subject {
        Some(subject) if !subject.is_empty() => subject.clone(),
        _ => content.sentence(),
    };
    let subject_header = header_value("subject", &subject)?;

    let attachments = match &options.archive.producer {
        Some(producer) => collect_inner_files(generator, producer, &options.archive)?,
        None => Vec::new(),
    };
    if let Some(metadata) = metadata {
        metadata.add_content(format!("{subject}\n {body}"));
        for attachment in &attachments {
            metadata.add_file(&attachment.basename);
        }
    }

    let date = OffsetDateTime::now_utc()
        .format(&Rfc2822)
        .map_err(|e| EncodingError::archive("eml", e))?;

    let mut message = String::new();
    message.push_str(&format!("To: {}{CRLF}", content.email()));
    message.push_str(&format!("From: {}{CRLF}", content.email()));
    message.push_str(&format!("Subject: {}{CRLF}", subject_header));
    message.push_str(&format!("Date: {date}{CRLF}"));
    message.push_str(&format!("Message-ID: <{}@fakefile.invalid>{CRLF}", random_token(24)));
    message.push_str(&format!("MIME-Version: 1.0{CRLF}"));

    if attachments.is_empty() {
        message.push_str(&text_part_headers(&body));
        message.push_str(CRLF);
        message.push_str(&normalize_body(&body));
        return Ok(message.into_bytes());
    }

    let boundary = format!("==============={}==", random_token(19));
    message.push_str(&format!("Content-Type: multipart/mixed; boundary=\"{boundary}\"{CRLF}"));
    message.push_str(CRLF);

    message.push_str(&format!("--{boundary}{CRLF}"));
    message.push_str(&text_part_headers(&body));
    message.push_str(CRLF);
    message.push_str(&normalize_body(&body));

    for attachment in &attachments {
        message.push_str(&format!("--{boundary}{CRLF}"));
        message.push_str(&format!("Content-Type: application/octet-stream{CRLF}"));
        message.push_str(&format!(
            "Content-Disposition: attachment; {}{CRLF}",
            filename_parameter(&attachment.basename)
        ));
        message.push_str(&format!("Content-Transfer-Encoding: base64{CRLF}"));
        message.push_str(CRLF);
        message.push_str(&base64_lines(&attachment.data));
    }
    message.push_str(&format!("--{boundary}--{CRLF}"));
    Ok(message.into_bytes())
}
