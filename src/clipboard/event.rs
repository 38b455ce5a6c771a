//! Clipboard paste events and their classified payloads.

use serde::{Deserialize, Serialize};

/// A file item carried by a paste event (already read from the platform
/// clipboard; immutable afterwards).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardFile {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ClipboardFile {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

/// The classified clipboard content, extracted once per paste.
///
/// Priority when several flavors are present: HTML, then a file item, then
/// plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    PlainText(String),
    Html(String),
    ImageFile { data: Vec<u8>, mime_type: String },
}

/// One platform paste event: the available clipboard flavors plus the
/// default-action suppression flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteEvent {
    text: Option<String>,
    html: Option<String>,
    files: Vec<ClipboardFile>,
    default_prevented: bool,
}

impl PasteEvent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: ClipboardFile) -> Self {
        self.files.push(file);
        self
    }

    /// Plain-text flavor; empty strings count as absent (platforms report
    /// missing flavors as empty data).
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// HTML flavor; empty strings count as absent.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref().filter(|h| !h.is_empty())
    }

    /// The first file item, if any.
    #[must_use]
    pub fn first_file(&self) -> Option<&ClipboardFile> {
        self.files.first()
    }

    /// Suppress the platform's default paste behavior.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Classify the event into a single payload.
    #[must_use]
    pub fn payload(&self) -> Option<ClipboardPayload> {
        if let Some(html) = self.html() {
            return Some(ClipboardPayload::Html(html.to_string()));
        }
        if let Some(file) = self.first_file() {
            return Some(ClipboardPayload::ImageFile {
                data: file.data.clone(),
                mime_type: file.mime_type.clone(),
            });
        }
        self.text()
            .map(|text| ClipboardPayload::PlainText(text.to_string()))
    }
}
