//! Feature descriptors used to derive the paste allow-list.
//!
//! The host editor exposes its active toolbar features as
//! `(name, config)` pairs; `ToolbarControl` is the introspection-side model of
//! one such pair. `CustomButton` lets plugin features contribute their own
//! markup when their identifying control is active.

use serde::{Deserialize, Serialize};

/// One active toolbar feature, as reported by the host editor.
///
/// `value` carries single-valued controls (a heading button for one level, an
/// ordered-list button); `options` carries dropdown controls that expose
/// several values at once (a heading level picker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarControl {
    pub name: String,
    pub value: Option<String>,
    pub options: Vec<String>,
}

impl ToolbarControl {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            value: None,
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Markup contributed by a plugin-registered feature.
///
/// When a toolbar control named `module` is active, `allowed_tags` and
/// `allowed_attr` are appended to the derived allow-list (subject to the same
/// explicit-override gating as built-in features).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomButton {
    pub module: String,
    pub allowed_tags: Vec<String>,
    pub allowed_attr: Vec<String>,
}
