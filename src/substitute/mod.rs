//! Structural substitution: repair disallowed structure instead of losing it.
//!
//! Sanitization alone would strip a disallowed `<h1>` or `<ul>` and promote
//! its content to the parent, flattening the document. This pass runs first
//! and rewrites disallowed structural elements into the nearest allowed
//! equivalent: headings keep their emphasis as `<b>`, block containers become
//! the substitution tag, and line-break-implying elements leave a `<br>`
//! behind.
//!
//! One substitution tag is chosen per pass, lazily on the first disallowed
//! node, from the first three entries of the block-element priority list. If
//! none of them is allowed, the pass performs no repair at all and the
//! sanitizer's default unwrapping applies.

pub mod collapse;

pub use collapse::collapse_consecutive;

use kuchiki::NodeRef;

use crate::allowlist::AllowList;
use crate::dom;

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Block elements eligible for substitution, priority candidates first.
const BLOCK_ELEMENTS: &[&str] = &[
    "p",
    "div",
    "section",
    "article",
    "fieldset",
    "address",
    "aside",
    "blockquote",
    "canvas",
    "dl",
    "figcaption",
    "figure",
    "footer",
    "form",
    "header",
    "main",
    "nav",
    "noscript",
    "ol",
    "pre",
    "table",
    "tfoot",
    "ul",
    "video",
];

/// Elements that imply a line break rather than a block of their own.
const NEW_LINE_ELEMENTS: &[&str] = &["li", "dt", "dd", "hr"];

/// How many entries of `BLOCK_ELEMENTS` are tried as substitution candidates.
const CANDIDATE_COUNT: usize = 3;

/// Per-pass substitution state: the tag is resolved at most once and reused
/// for every disallowed node encountered in the same pass.
pub struct Substitution<'a> {
    allow: &'a AllowList,
    choice: Option<Option<String>>,
}

impl<'a> Substitution<'a> {
    #[must_use]
    pub fn new(allow: &'a AllowList) -> Self {
        Self {
            allow,
            choice: None,
        }
    }

    /// The substitution tag for this pass, resolved lazily on first call.
    pub fn tag(&mut self) -> Option<&str> {
        if self.choice.is_none() {
            let found = BLOCK_ELEMENTS
                .iter()
                .take(CANDIDATE_COUNT)
                .find(|candidate| self.allow.allows_tag(candidate))
                .map(|candidate| (*candidate).to_string());
            match &found {
                Some(tag) => log::debug!("substitution tag for this pass: <{tag}>"),
                None => log::debug!(
                    "allow-list exhausted, no substitution candidate available; \
                     disallowed nodes will be unwrapped"
                ),
            }
            self.choice = Some(found);
        }
        self.choice.as_ref().and_then(|choice| choice.as_deref())
    }

    /// The tag this pass settled on, if any node needed one.
    #[must_use]
    pub fn into_choice(self) -> Option<String> {
        self.choice.flatten()
    }
}

/// Repair one disallowed element in place.
///
/// `tag_name` must be the lowercased name of `node`, already known to be
/// outside the allow-list. Elements that are neither headings, block
/// elements, nor newline elements are left for the sanitizer to unwrap.
pub(crate) fn apply(node: &NodeRef, tag_name: &str, substitution: &mut Substitution<'_>) {
    let Some(choice) = substitution.tag() else {
        return;
    };

    if HEADINGS.contains(&tag_name) {
        let wrapper = dom::new_element(choice);
        let emphasis = dom::new_element("b");
        dom::move_children(node, &emphasis);
        wrapper.append(emphasis);
        node.insert_before(wrapper);
        node.detach();
    } else if BLOCK_ELEMENTS.contains(&tag_name) {
        let wrapper = dom::new_element(choice);
        dom::move_children(node, &wrapper);
        node.insert_before(wrapper);
        node.detach();
    } else if NEW_LINE_ELEMENTS.contains(&tag_name) {
        dom::unwrap_children(node);
        node.insert_before(dom::new_element("br"));
        node.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_is_first_allowed_candidate() {
        let allow = AllowList::new(["div", "section"], [] as [&str; 0]);
        let mut substitution = Substitution::new(&allow);
        assert_eq!(substitution.tag(), Some("div"));
        assert_eq!(substitution.into_choice(), Some("div".to_string()));
    }

    #[test]
    fn choice_is_stable_across_calls() {
        let allow = AllowList::new(["p", "div"], [] as [&str; 0]);
        let mut substitution = Substitution::new(&allow);
        assert_eq!(substitution.tag(), Some("p"));
        assert_eq!(substitution.tag(), Some("p"));
    }

    #[test]
    fn exhausted_allow_list_yields_no_choice() {
        let allow = AllowList::new(["span", "b"], [] as [&str; 0]);
        let mut substitution = Substitution::new(&allow);
        assert_eq!(substitution.tag(), None);
        assert_eq!(substitution.into_choice(), None);
    }

    #[test]
    fn unresolved_pass_reports_no_choice() {
        let allow = AllowList::new(["p"], [] as [&str; 0]);
        let substitution = Substitution::new(&allow);
        assert_eq!(substitution.into_choice(), None);
    }
}
