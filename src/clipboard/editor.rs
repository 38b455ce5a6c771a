//! The host-editor boundary.
//!
//! The editor's internal document model and its HTML conversion routine are
//! external collaborators; this trait is the whole surface the paste
//! pipeline needs from them.

use serde::{Deserialize, Serialize};

use crate::allowlist::ToolbarControl;

use super::delta::Delta;

/// Origin of a document or selection change, mirrored from the host editor's
/// change-source semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// A user-originated change (undoable, fires change events).
    User,
    /// A programmatic change.
    Api,
    /// A change that should not fire change events (cursor moves).
    Silent,
}

/// A selection range in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub index: usize,
    pub length: usize,
}

impl Range {
    #[must_use]
    pub fn new(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// A collapsed cursor at `index`.
    #[must_use]
    pub fn cursor(index: usize) -> Self {
        Self { index, length: 0 }
    }
}

/// Capability surface of the host rich-text editor.
pub trait Editor {
    /// Whether the editor currently accepts input.
    fn is_enabled(&self) -> bool {
        true
    }

    /// The current selection, or `None` when the editor has no focus range.
    fn get_selection(&self) -> Option<Range>;

    /// Plain text of the document span `[index, index + length)`.
    fn get_text(&self, index: usize, length: usize) -> String;

    /// Convert an HTML fragment into an insert-only delta. Black box: the
    /// editor's own HTML-to-document conversion.
    fn convert(&self, html: &str) -> Delta;

    /// Apply a delta to the document.
    fn update_contents(&mut self, delta: Delta, source: Source);

    /// Move the selection.
    fn set_selection(&mut self, index: usize, length: usize, source: Source);

    /// Insert a length-one embedded object at `index`.
    fn insert_embed(&mut self, index: usize, kind: &str, value: &str, source: Source);

    /// Scroll the current selection into view.
    fn scroll_selection_into_view(&mut self) {}

    /// Active toolbar features, used to derive the paste allow-list.
    fn toolbar_controls(&self) -> Vec<ToolbarControl> {
        Vec::new()
    }
}
