//! The edit-operation currency exchanged with the host editor.
//!
//! A `Delta` is an ordered list of retain/delete/insert operations against
//! the editor's document. Exactly one delta is committed per paste: a
//! delete of the current selection composed with the insertion of the
//! converted content.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single document operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Skip over `n` characters.
    Retain(usize),
    /// Delete `n` characters at the cursor.
    Delete(usize),
    /// Insert text, optionally formatted (e.g. a `link` attribute).
    Insert {
        text: String,
        attributes: HashMap<String, String>,
    },
    /// Insert a length-one embedded object (e.g. an image data URL).
    InsertEmbed { kind: String, value: String },
}

impl Op {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Op::Retain(n) | Op::Delete(n) => *n,
            Op::Insert { text, .. } => text.chars().count(),
            Op::InsertEmbed { .. } => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An ordered sequence of document operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    ops: Vec<Op>,
}

impl Delta {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip `n` characters. Zero-length retains are dropped.
    #[must_use]
    pub fn retain(mut self, n: usize) -> Self {
        if n > 0 {
            self.ops.push(Op::Retain(n));
        }
        self
    }

    /// Delete `n` characters. Zero-length deletes are dropped.
    #[must_use]
    pub fn delete(mut self, n: usize) -> Self {
        if n > 0 {
            self.ops.push(Op::Delete(n));
        }
        self
    }

    /// Insert unformatted text. Empty inserts are dropped.
    #[must_use]
    pub fn insert(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.ops.push(Op::Insert {
                text,
                attributes: HashMap::new(),
            });
        }
        self
    }

    /// Insert formatted text (e.g. with a `link` attribute).
    #[must_use]
    pub fn insert_with(
        mut self,
        text: impl Into<String>,
        attributes: HashMap<String, String>,
    ) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.ops.push(Op::Insert { text, attributes });
        }
        self
    }

    /// Insert an embedded object such as an image.
    #[must_use]
    pub fn insert_embed(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.ops.push(Op::InsertEmbed {
            kind: kind.into(),
            value: value.into(),
        });
        self
    }

    /// Append all operations of `other`.
    #[must_use]
    pub fn concat(mut self, other: Delta) -> Self {
        self.ops.extend(other.ops);
        self
    }

    /// Total length spanned by the operations.
    #[must_use]
    pub fn length(&self) -> usize {
        self.ops.iter().map(Op::len).sum()
    }

    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
