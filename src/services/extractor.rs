use std::{
    io::{Cursor, Read},
    path::Path,
    time::Duration,
};

use once_cell::sync::Lazy;
use quick_xml::{events::Event, Reader};
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Node, Selector};

use crate::errors::{AppError, AppResult, ExtractionError};
use crate::models::domain::Source;
use crate::services::encoding::{decode_with_label, resolve_charset};

static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("body is a valid selector"));

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

const DOCX_BODY_PART: &str = "word/document.xml";

/// Turns one [`Source`] into plain text.
#[derive(Clone)]
pub struct ContentExtractor {
    http: reqwest::Client,
}

impl ContentExtractor {
    pub fn new(fetch_timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .user_agent(concat!("quizgen-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::InternalError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    pub async fn extract(&self, source: Source) -> Result<String, ExtractionError> {
        match source {
            Source::Url { url } => self.extract_url(&url).await,
            Source::File {
                name,
                mime_hint,
                bytes,
            } => {
                // PDF parsing is CPU-bound; keep it off the request worker.
                tokio::task::spawn_blocking(move || extract_file(&name, &mime_hint, &bytes))
                    .await
                    .map_err(|e| ExtractionError::Worker(e.to_string()))?
            }
        }
    }

    async fn extract_url(&self, url: &str) -> Result<String, ExtractionError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        let charset = resolve_charset(content_type.as_deref(), &body);
        log::info!("Detected charset {} for {}", charset, url);

        let html = decode_with_label(&charset, &body)?;
        Ok(html_body_text(&html))
    }
}

/// Visible text of the document body, in document order. Script and style
/// contents are dropped; markup whitespace is kept as it appears.
pub fn html_body_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Some(body) = document.select(&BODY_SELECTOR).next() else {
        return String::new();
    };

    let mut text = String::new();
    for node in body.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(e) if HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}

/// Extracts text from an uploaded document. The extension decides the
/// format; the declared MIME type is only consulted for unknown extensions.
pub fn extract_file(name: &str, mime_hint: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("txt") | Some("md") => Ok(utf8_text(bytes)),
        Some("pdf") => pdf_text(bytes),
        Some("docx") => docx_text(bytes),
        _ => {
            let essence = mime_hint
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();

            match essence.as_str() {
                "text/plain" | "text/markdown" => Ok(utf8_text(bytes)),
                _ => Err(ExtractionError::UnsupportedFileType {
                    name: name.to_string(),
                    mime: mime_hint.to_string(),
                }),
            }
        }
    }
}

fn utf8_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{FEFF}').unwrap_or(&*text).to_string()
}

fn pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Paragraph text of a DOCX body, one line per paragraph. Run formatting,
/// headers, footers and comments are ignored.
fn docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx_err = |e: &dyn std::fmt::Display| ExtractionError::Docx(e.to_string());

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| docx_err(&e))?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| docx_err(&e))?
        .read_to_string(&mut xml)
        .map_err(|e| docx_err(&e))?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(|e| docx_err(&e))? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"r" => in_run = false,
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) if in_run => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                text.push_str(&t.unescape().map_err(|e| docx_err(&e))?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
