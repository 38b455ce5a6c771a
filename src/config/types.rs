//! Core configuration types for the paste pipeline.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::allowlist::CustomButton;
use crate::sanitize::SanitizeHooks;

/// Host-supplied handler for pasted image files: `(bytes, mime type)`.
///
/// When configured, the orchestrator hands the raw file over instead of
/// performing the insertion itself.
pub type ImagePasteHandler = Arc<dyn Fn(&[u8], &str) + Send + Sync>;

/// Options recognized by the clipboard handler.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Explicit tag allow-list. When set together with
    /// `allowed_attributes`, no feature-derived defaults are added.
    pub allowed_tags: Option<Vec<String>>,

    /// Explicit attribute allow-list (see `allowed_tags`).
    pub allowed_attributes: Option<Vec<String>>,

    /// Select the full inserted span after the paste instead of placing a
    /// collapsed cursor after it. Default: false.
    pub keep_selection: bool,

    /// Repair disallowed structural elements into the nearest allowed block
    /// tag instead of letting the sanitizer unwrap them. Default: true.
    pub substitute_block_elements: bool,

    /// Turn a URL-shaped plain-text paste over a non-empty selection into a
    /// hyperlink wrapping the selected text. Default: false.
    pub magic_paste_links: bool,

    /// Collapse runs of blank substitution-tagged elements after repair.
    /// Default: false.
    pub remove_consecutive_substitution_tags: bool,

    /// Plugin features contributing extra tags and attributes when their
    /// toolbar control is active.
    pub custom_buttons: Vec<CustomButton>,

    /// Sanitizer lifecycle hooks, scoped to each sanitize pass.
    #[serde(skip)]
    pub hooks: SanitizeHooks,

    /// Optional host handler for pasted image files.
    #[serde(skip)]
    pub handle_image_paste: Option<ImagePasteHandler>,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            allowed_tags: None,
            allowed_attributes: None,
            keep_selection: false,
            substitute_block_elements: true,
            magic_paste_links: false,
            remove_consecutive_substitution_tags: false,
            custom_buttons: Vec::new(),
            hooks: SanitizeHooks::default(),
            handle_image_paste: None,
        }
    }
}

impl ClipboardConfig {
    /// Start building a config with defaults.
    #[must_use]
    pub fn builder() -> super::builder::ClipboardConfigBuilder {
        super::builder::ClipboardConfigBuilder::default()
    }
}

impl fmt::Debug for ClipboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipboardConfig")
            .field("allowed_tags", &self.allowed_tags)
            .field("allowed_attributes", &self.allowed_attributes)
            .field("keep_selection", &self.keep_selection)
            .field("substitute_block_elements", &self.substitute_block_elements)
            .field("magic_paste_links", &self.magic_paste_links)
            .field(
                "remove_consecutive_substitution_tags",
                &self.remove_consecutive_substitution_tags,
            )
            .field("custom_buttons", &self.custom_buttons)
            .field("hooks", &self.hooks)
            .field(
                "handle_image_paste",
                &self.handle_image_paste.as_ref().map(|_| "<handler>"),
            )
            .finish()
    }
}
