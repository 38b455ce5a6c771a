//! Fluent builder for `ClipboardConfig`.

use std::sync::Arc;

use crate::allowlist::CustomButton;
use crate::sanitize::SanitizeHooks;

use super::types::{ClipboardConfig, ImagePasteHandler};

/// Builder with the same defaults as `ClipboardConfig::default()`.
#[derive(Default)]
pub struct ClipboardConfigBuilder {
    config: ClipboardConfig,
}

impl ClipboardConfigBuilder {
    /// Explicit tag allow-list.
    #[must_use]
    pub fn allowed_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.allowed_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Explicit attribute allow-list.
    #[must_use]
    pub fn allowed_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.allowed_attributes = Some(attrs.into_iter().map(Into::into).collect());
        self
    }

    /// Select the inserted span after pasting instead of collapsing the cursor.
    #[must_use]
    pub fn keep_selection(mut self, enabled: bool) -> Self {
        self.config.keep_selection = enabled;
        self
    }

    /// Repair disallowed structural elements into allowed block tags.
    #[must_use]
    pub fn substitute_block_elements(mut self, enabled: bool) -> Self {
        self.config.substitute_block_elements = enabled;
        self
    }

    /// Convert URL-shaped plain-text pastes over a selection into links.
    #[must_use]
    pub fn magic_paste_links(mut self, enabled: bool) -> Self {
        self.config.magic_paste_links = enabled;
        self
    }

    /// Collapse runs of blank substitution-tagged elements.
    #[must_use]
    pub fn remove_consecutive_substitution_tags(mut self, enabled: bool) -> Self {
        self.config.remove_consecutive_substitution_tags = enabled;
        self
    }

    /// Register a plugin feature contributing extra tags and attributes.
    #[must_use]
    pub fn custom_button(mut self, button: CustomButton) -> Self {
        self.config.custom_buttons.push(button);
        self
    }

    /// Install sanitizer lifecycle hooks.
    #[must_use]
    pub fn hooks(mut self, hooks: SanitizeHooks) -> Self {
        self.config.hooks = hooks;
        self
    }

    /// Delegate pasted image files to the host instead of inserting them.
    #[must_use]
    pub fn handle_image_paste<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[u8], &str) + Send + Sync + 'static,
    {
        self.config.handle_image_paste = Some(Arc::new(handler) as ImagePasteHandler);
        self
    }

    #[must_use]
    pub fn build(self) -> ClipboardConfig {
        self.config
    }
}
