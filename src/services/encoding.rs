use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ExtractionError;

pub const DEFAULT_CHARSET: &str = "utf-8";

static HEADER_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([\w-]+)"#)
        .expect("HEADER_CHARSET is a valid regex pattern")
});

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?([\w-]+)"#)
        .expect("META_CHARSET is a valid regex pattern")
});

/// Picks the charset label for an HTML payload. First match wins: the
/// `charset` parameter of the Content-Type header, then a `<meta ... charset>`
/// declaration in the body, then UTF-8. The label is lower-cased but not
/// checked against known encodings.
pub fn resolve_charset(content_type: Option<&str>, body: &[u8]) -> String {
    if let Some(caps) = content_type.and_then(|ct| HEADER_CHARSET.captures(ct)) {
        return caps[1].to_lowercase();
    }

    let speculative = String::from_utf8_lossy(body);
    if let Some(caps) = META_CHARSET.captures(&speculative) {
        return caps[1].to_lowercase();
    }

    DEFAULT_CHARSET.to_string()
}

/// Decodes `body` with the encoding named by `label`, dropping a leading
/// byte-order mark. Malformed sequences become U+FFFD.
pub fn decode_with_label(label: &str, body: &[u8]) -> Result<String, ExtractionError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ExtractionError::UnsupportedEncoding(label.to_string()))?;

    let (text, had_errors) = encoding.decode_with_bom_removal(body);
    if had_errors {
        log::debug!(
            "Replaced malformed byte sequences while decoding as {}",
            encoding.name()
        );
    }

    Ok(text
        .strip_prefix('\u{FEFF}')
        .unwrap_or(&*text)
        .to_string())
}
