use std::fmt;

/// One unit of input content, consumed by a single extraction run.
#[derive(Clone, PartialEq, Eq)]
pub enum Source {
    Url {
        url: String,
    },
    File {
        name: String,
        mime_hint: String,
        bytes: Vec<u8>,
    },
}

impl Source {
    pub fn url(url: impl Into<String>) -> Self {
        Source::Url { url: url.into() }
    }

    pub fn file(name: impl Into<String>, mime_hint: impl Into<String>, bytes: Vec<u8>) -> Self {
        Source::File {
            name: name.into(),
            mime_hint: mime_hint.into(),
            bytes,
        }
    }

    /// Short label for logs: the URL or the file name.
    pub fn label(&self) -> &str {
        match self {
            Source::Url { url } => url,
            Source::File { name, .. } => name,
        }
    }
}

// File contents are left out so logging a source never dumps a document.
impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url { url } => f.debug_struct("Url").field("url", url).finish(),
            Source::File {
                name,
                mime_hint,
                bytes,
            } => f
                .debug_struct("File")
                .field("name", name)
                .field("mime_hint", mime_hint)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}
