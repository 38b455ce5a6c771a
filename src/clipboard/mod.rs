//! Paste orchestration.
//!
//! `SmartClipboard` intercepts a paste event, classifies its payload, runs
//! the appropriate pipeline (HTML repair + sanitize, magic link, image
//! embed, escaped plain text) and applies the result to the host editor as
//! a single delta, then places the cursor.

pub mod delta;
pub mod editor;
pub mod event;

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{debug, warn};

use crate::allowlist::{self, AllowList};
use crate::config::ClipboardConfig;
use crate::links;
use crate::sanitize;
use crate::substitute;
use crate::tables;

pub use delta::{Delta, Op};
pub use editor::{Editor, Range, Source};
pub use event::{ClipboardFile, ClipboardPayload, PasteEvent};

/// Base64-encoding pasted files above this size moves to a blocking thread.
const ENCODE_OFFLOAD_THRESHOLD_BYTES: usize = 1024 * 1024;

/// Why a paste produced no edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The editor rejected input at the time of the paste.
    EditorDisabled,
    /// No selection was available to paste into.
    NoSelection,
    /// The pasted image file could not be encoded.
    UnreadableImage,
}

/// Result of handling one paste event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Nothing was inserted.
    Ignored(IgnoreReason),
    /// Content was inserted at `index` spanning `length` positions.
    Inserted { index: usize, length: usize },
    /// A configured host handler took over (image delegation).
    Delegated,
}

/// Receives paste events from the host integration.
#[async_trait]
pub trait ClipboardHandler<E: Editor + Send>: Send + Sync {
    /// Handle a paste event in the bubbling phase.
    async fn on_paste(&self, editor: &mut E, event: &mut PasteEvent) -> Result<PasteOutcome>;

    /// Handle a paste event in the capture phase. Defaults to `on_paste`.
    async fn on_capture_paste(
        &self,
        editor: &mut E,
        event: &mut PasteEvent,
    ) -> Result<PasteOutcome> {
        self.on_paste(editor, event).await
    }
}

/// The paste pipeline, configured once and applied per event.
#[derive(Debug, Clone, Default)]
pub struct SmartClipboard {
    config: ClipboardConfig,
}

impl SmartClipboard {
    #[must_use]
    pub fn new(config: ClipboardConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClipboardConfig {
        &self.config
    }

    fn derive_allow_list<E: Editor>(&self, editor: &E) -> AllowList {
        allowlist::derive(
            self.config.allowed_tags.as_deref(),
            self.config.allowed_attributes.as_deref(),
            &editor.toolbar_controls(),
            &self.config.custom_buttons,
        )
    }

    /// Sanitize pasted markup and splice it over the selection.
    fn paste_html<E: Editor>(
        &self,
        editor: &mut E,
        range: Range,
        allow: &AllowList,
        html: &str,
    ) -> Result<PasteOutcome> {
        let normalized =
            tables::normalize(html, allow).context("failed to normalize pasted tables")?;

        let (clean, substitution_tag) = if self.config.substitute_block_elements {
            let outcome = sanitize::sanitize_with_repair(&normalized, allow, &self.config.hooks)
                .context("failed to sanitize pasted markup")?;
            (outcome.html, outcome.substitution_tag)
        } else {
            let clean = sanitize::sanitize(&normalized, allow, &self.config.hooks)
                .context("failed to sanitize pasted markup")?;
            (clean, None)
        };

        let clean = match substitution_tag {
            Some(ref tag) if self.config.remove_consecutive_substitution_tags => {
                substitute::collapse_consecutive(&clean, tag)
                    .context("failed to collapse substitution runs")?
            }
            _ => clean,
        };

        let converted = editor.convert(&clean);
        let inserted = converted.length();
        debug!(
            "pasting {} positions of sanitized markup at index {}",
            inserted, range.index
        );

        let change = Delta::new()
            .retain(range.index)
            .delete(range.length)
            .concat(converted);
        editor.update_contents(change, Source::User);
        self.place_cursor(editor, range.index, inserted);
        Ok(PasteOutcome::Inserted {
            index: range.index,
            length: inserted,
        })
    }

    /// Wrap the selected text in a link whose target is the pasted URL.
    fn paste_link<E: Editor>(
        &self,
        editor: &mut E,
        range: Range,
        pasted: &str,
    ) -> Result<PasteOutcome> {
        let selected = editor.get_text(range.index, range.length);
        let href = links::ensure_scheme(pasted.trim());
        debug!("linking selection at index {} to {}", range.index, href);

        let length = selected.chars().count();
        let mut attributes = HashMap::new();
        attributes.insert("link".to_string(), href);
        let change = Delta::new()
            .retain(range.index)
            .delete(range.length)
            .insert_with(selected, attributes);
        editor.update_contents(change, Source::User);
        self.place_cursor(editor, range.index, length);
        Ok(PasteOutcome::Inserted {
            index: range.index,
            length,
        })
    }

    /// Replace the selection with an embedded image, or delegate to the host.
    async fn paste_image<E: Editor + Send>(
        &self,
        editor: &mut E,
        range: Range,
        data: Vec<u8>,
        mime_type: &str,
    ) -> Result<PasteOutcome> {
        if range.length > 0 {
            let deletion = Delta::new().retain(range.index).delete(range.length);
            editor.update_contents(deletion, Source::User);
        }

        if let Some(handler) = &self.config.handle_image_paste {
            debug!("delegating {} byte {} paste to host", data.len(), mime_type);
            handler(&data, mime_type);
            return Ok(PasteOutcome::Delegated);
        }

        let data_url = match encode_data_url(data, mime_type).await {
            Ok(url) => url,
            Err(err) => {
                warn!("dropping unreadable pasted image: {err:#}");
                return Ok(PasteOutcome::Ignored(IgnoreReason::UnreadableImage));
            }
        };

        editor.insert_embed(range.index, "image", &data_url, Source::User);
        // `keep_selection` leaves the selection where it was; otherwise the
        // cursor lands right after the embed.
        if !self.config.keep_selection {
            editor.set_selection(range.index + 1, 0, Source::Silent);
        }
        editor.scroll_selection_into_view();
        Ok(PasteOutcome::Inserted {
            index: range.index,
            length: 1,
        })
    }

    fn place_cursor<E: Editor>(&self, editor: &mut E, index: usize, length: usize) {
        if self.config.keep_selection {
            editor.set_selection(index, length, Source::Silent);
        } else {
            editor.set_selection(index + length, 0, Source::Silent);
        }
        editor.scroll_selection_into_view();
    }
}

#[async_trait]
impl<E: Editor + Send> ClipboardHandler<E> for SmartClipboard {
    /// Run the full paste pipeline against `editor`.
    ///
    /// The selection is read once at entry. Edits made to the editor between
    /// that read and the final insertion (possible during the async image
    /// encode) are applied against stale indices; hosts that allow concurrent
    /// edits should serialize them around this call.
    async fn on_paste(&self, editor: &mut E, event: &mut PasteEvent) -> Result<PasteOutcome> {
        event.prevent_default();

        if !editor.is_enabled() {
            debug!("ignoring paste into disabled editor");
            return Ok(PasteOutcome::Ignored(IgnoreReason::EditorDisabled));
        }
        let range = match editor.get_selection() {
            Some(range) => range,
            None => {
                debug!("ignoring paste with no selection");
                return Ok(PasteOutcome::Ignored(IgnoreReason::NoSelection));
            }
        };

        let allow = self.derive_allow_list(editor);

        let payload = event.payload();

        if let Some(ClipboardPayload::Html(html)) = &payload {
            return self.paste_html(editor, range, &allow, html);
        }

        // The link flavor outranks a file item: URL-shaped text over a
        // selection becomes a hyperlink even when an image is also present.
        if self.config.magic_paste_links && range.length > 0 && allow.allows_tag("a") {
            if let Some(text) = event.text() {
                if links::is_probable_url(text) {
                    let text = text.to_string();
                    return self.paste_link(editor, range, &text);
                }
            }
        }

        match payload {
            Some(ClipboardPayload::ImageFile { data, mime_type }) => {
                let is_image = mime_type
                    .to_ascii_lowercase()
                    .starts_with("image/");
                if is_image && allow.allows_tag("img") {
                    return self.paste_image(editor, range, data, &mime_type).await;
                }
                // Editors without image support fall back to the text flavor.
                let escaped = event
                    .text()
                    .map(|text| html_escape::encode_text(text).into_owned())
                    .unwrap_or_default();
                self.paste_html(editor, range, &allow, &escaped)
            }
            Some(ClipboardPayload::PlainText(text)) => {
                let escaped = html_escape::encode_text(&text);
                self.paste_html(editor, range, &allow, &escaped)
            }
            // An empty clipboard still commits the selection deletion.
            Some(ClipboardPayload::Html(_)) | None => self.paste_html(editor, range, &allow, ""),
        }
    }
}

/// Encode a pasted file as a `data:` URL.
///
/// Files above `ENCODE_OFFLOAD_THRESHOLD_BYTES` are encoded on a blocking
/// thread to keep the async runtime responsive.
async fn encode_data_url(data: Vec<u8>, mime_type: &str) -> Result<String> {
    let prefix = format!("data:{mime_type};base64,");
    if data.len() <= ENCODE_OFFLOAD_THRESHOLD_BYTES {
        return Ok(format!("{prefix}{}", BASE64.encode(&data)));
    }
    let encoded = tokio::task::spawn_blocking(move || BASE64.encode(&data))
        .await
        .context("image encoding task failed")?;
    Ok(format!("{prefix}{encoded}"))
}
