//! Allow-list derivation.
//!
//! The allow-list is built fresh for every paste: either both halves are
//! supplied explicitly by configuration (in which case no feature scanning
//! happens at all), or the missing half starts from a minimal base and grows
//! by one fixed contribution per active editor feature. Tags and attributes
//! are gated independently: explicit tags with implicit attributes means only
//! the attribute side of each feature is applied, and vice versa.

mod features;

pub use features::{CustomButton, ToolbarControl};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Base tags every derived allow-list starts from.
const BASE_TAGS: &[&str] = &["p", "br", "span"];

/// Base attributes every derived allow-list starts from.
const BASE_ATTRIBUTES: &[&str] = &["class"];

/// The set of tags and attributes permitted to survive sanitization.
///
/// Constructed at the start of each paste handling cycle and discarded at the
/// end; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    pub tags: HashSet<String>,
    pub attributes: HashSet<String>,
}

impl AllowList {
    #[must_use]
    pub fn new<T, A>(tags: T, attributes: A) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[must_use]
    pub fn allows_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }
}

/// Derive the allow-list for one paste.
///
/// `explicit_tags`/`explicit_attrs` come from configuration; `controls` is the
/// host editor's active toolbar feature list; `custom_buttons` contribute
/// plugin markup when their identifying control is active.
///
/// If both explicit lists are present they are returned unchanged and no
/// feature scanning occurs.
#[must_use]
pub fn derive(
    explicit_tags: Option<&[String]>,
    explicit_attrs: Option<&[String]>,
    controls: &[ToolbarControl],
    custom_buttons: &[CustomButton],
) -> AllowList {
    if let (Some(tags), Some(attrs)) = (explicit_tags, explicit_attrs) {
        return AllowList::new(tags.iter().cloned(), attrs.iter().cloned());
    }

    let scan_tags = explicit_tags.is_none();
    let scan_attrs = explicit_attrs.is_none();

    let mut tags: HashSet<String> = match explicit_tags {
        Some(explicit) => explicit.iter().cloned().collect(),
        None => BASE_TAGS.iter().map(|t| (*t).to_string()).collect(),
    };
    let mut attributes: HashSet<String> = match explicit_attrs {
        Some(explicit) => explicit.iter().cloned().collect(),
        None => BASE_ATTRIBUTES.iter().map(|a| (*a).to_string()).collect(),
    };

    for control in controls {
        apply_feature(control, scan_tags, scan_attrs, &mut tags, &mut attributes);

        for custom in custom_buttons {
            if custom.module == control.name {
                if scan_tags {
                    tags.extend(custom.allowed_tags.iter().cloned());
                }
                if scan_attrs {
                    attributes.extend(custom.allowed_attr.iter().cloned());
                }
            }
        }
    }

    log::debug!(
        "derived allow-list: {} tags, {} attributes",
        tags.len(),
        attributes.len()
    );

    AllowList { tags, attributes }
}

/// The fixed feature-to-markup mapping table.
fn apply_feature(
    control: &ToolbarControl,
    scan_tags: bool,
    scan_attrs: bool,
    tags: &mut HashSet<String>,
    attributes: &mut HashSet<String>,
) {
    fn add(set: &mut HashSet<String>, scan: bool, names: &[&str]) {
        if scan {
            set.extend(names.iter().map(|n| (*n).to_string()));
        }
    }

    match control.name.as_str() {
        "bold" => add(tags, scan_tags, &["b", "strong"]),
        "italic" => add(tags, scan_tags, &["i", "em"]),
        "underline" => add(tags, scan_tags, &["u"]),
        "strike" => add(tags, scan_tags, &["s"]),
        "color" | "background" => {
            if scan_attrs {
                attributes.insert("style".to_string());
            }
        }
        "script" => match control.value.as_deref() {
            Some("super") => add(tags, scan_tags, &["sup"]),
            Some("sub") => add(tags, scan_tags, &["sub"]),
            _ => {}
        },
        "header" => {
            if scan_tags {
                let levels = control
                    .value
                    .iter()
                    .chain(control.options.iter())
                    .filter_map(|v| heading_tag(v));
                tags.extend(levels);
            }
        }
        "code-block" => {
            add(tags, scan_tags, &["pre"]);
            if scan_attrs {
                attributes.insert("spellcheck".to_string());
            }
        }
        "list" => {
            match control.value.as_deref() {
                Some("ordered") => add(tags, scan_tags, &["ol"]),
                Some("bullet") => add(tags, scan_tags, &["ul"]),
                _ => {}
            }
            add(tags, scan_tags, &["li"]);
        }
        "link" => {
            add(tags, scan_tags, &["a"]);
            if scan_attrs {
                attributes.extend(["href", "target", "rel"].map(str::to_string));
            }
        }
        "image" => {
            add(tags, scan_tags, &["img"]);
            if scan_attrs {
                attributes.extend(["src", "title", "alt", "height", "width"].map(str::to_string));
            }
        }
        "video" => {
            add(tags, scan_tags, &["iframe"]);
            if scan_attrs {
                attributes.extend(
                    ["frameborder", "allowfullscreen", "src", "height", "width"]
                        .map(str::to_string),
                );
            }
        }
        "blockquote" => add(tags, scan_tags, &["blockquote"]),
        "table" => add(tags, scan_tags, &["table", "tr", "td"]),
        _ => {}
    }
}

fn heading_tag(value: &str) -> Option<String> {
    match value {
        "1" | "2" | "3" | "4" | "5" | "6" => Some(format!("h{value}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn explicit_both_bypasses_feature_scanning() {
        let controls = vec![
            ToolbarControl::new("bold"),
            ToolbarControl::new("link"),
            ToolbarControl::new("image"),
        ];
        let list = derive(
            Some(&strs(&["p", "em"])),
            Some(&strs(&["id"])),
            &controls,
            &[],
        );
        assert_eq!(list, AllowList::new(["p", "em"], ["id"]));
    }

    #[test]
    fn derivation_is_idempotent() {
        let controls = vec![
            ToolbarControl::new("bold"),
            ToolbarControl::with_value("list", "ordered"),
            ToolbarControl::new("link"),
        ];
        let first = derive(None, None, &controls, &[]);
        let second = derive(None, None, &controls, &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn base_sets_present_without_features() {
        let list = derive(None, None, &[], &[]);
        assert_eq!(list.tags, AllowList::new(["p", "br", "span"], ["class"]).tags);
        assert!(list.allows_attribute("class"));
        assert_eq!(list.attributes.len(), 1);
    }

    #[test]
    fn feature_table_contributions() {
        let controls = vec![
            ToolbarControl::new("bold"),
            ToolbarControl::new("italic"),
            ToolbarControl::new("color"),
            ToolbarControl::with_value("script", "super"),
            ToolbarControl::with_options("header", ["1", "2", "bogus"]),
            ToolbarControl::new("code-block"),
            ToolbarControl::with_value("list", "bullet"),
            ToolbarControl::new("link"),
            ToolbarControl::new("video"),
            ToolbarControl::new("table"),
        ];
        let list = derive(None, None, &controls, &[]);

        for tag in [
            "b", "strong", "i", "em", "sup", "h1", "h2", "pre", "ul", "li", "a", "iframe",
            "table", "tr", "td",
        ] {
            assert!(list.allows_tag(tag), "missing tag {tag}");
        }
        assert!(!list.allows_tag("h3"));
        assert!(!list.allows_tag("sub"));
        assert!(!list.allows_tag("ol"));

        for attr in [
            "class",
            "style",
            "spellcheck",
            "href",
            "target",
            "rel",
            "frameborder",
            "allowfullscreen",
            "src",
            "height",
            "width",
        ] {
            assert!(list.allows_attribute(attr), "missing attribute {attr}");
        }
    }

    #[test]
    fn tags_and_attributes_gate_independently() {
        let controls = vec![ToolbarControl::new("link"), ToolbarControl::new("image")];

        // Explicit tags: feature scanning only touches attributes.
        let list = derive(Some(&strs(&["p"])), None, &controls, &[]);
        assert_eq!(list.tags, AllowList::new(["p"], [] as [&str; 0]).tags);
        assert!(list.allows_attribute("href"));
        assert!(list.allows_attribute("src"));

        // Explicit attributes: feature scanning only touches tags.
        let list = derive(None, Some(&strs(&["class"])), &controls, &[]);
        assert!(list.allows_tag("a"));
        assert!(list.allows_tag("img"));
        assert_eq!(
            list.attributes,
            AllowList::new([] as [&str; 0], ["class"]).attributes
        );
    }

    #[test]
    fn custom_buttons_require_active_control() {
        let custom = CustomButton {
            module: "formula".to_string(),
            allowed_tags: strs(&["math"]),
            allowed_attr: strs(&["display"]),
        };

        let inactive = derive(None, None, &[ToolbarControl::new("bold")], &[custom.clone()]);
        assert!(!inactive.allows_tag("math"));

        let active = derive(
            None,
            None,
            &[ToolbarControl::new("formula")],
            &[custom],
        );
        assert!(active.allows_tag("math"));
        assert!(active.allows_attribute("display"));
    }
}
