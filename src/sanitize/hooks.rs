//! Pass-scoped sanitizer lifecycle hooks.
//!
//! Hooks are borrowed by a sanitize pass for its duration and released when
//! the pass returns; there is no process-wide registry, so a hook can never
//! leak into an unrelated sanitize call or overlap with another pass.

use std::fmt;
use std::sync::Arc;

use kuchiki::NodeRef;

/// Hook invoked with a node during the element phase. `before`/`after`
/// variants receive the fragment root; the `upon` variant runs once per
/// element and may mutate the node in place.
pub type ElementHook = Arc<dyn Fn(&NodeRef) + Send + Sync>;

/// Hook invoked per attribute: `(tag, attribute, value)`. Return the value to
/// keep (possibly rewritten) or `None` to drop the attribute regardless of
/// the allow-list.
pub type AttributeHook = Arc<dyn Fn(&str, &str, &str) -> Option<String> + Send + Sync>;

/// The recognized lifecycle hook points of one sanitize pass.
#[derive(Clone, Default)]
pub struct SanitizeHooks {
    pub before_sanitize_elements: Option<ElementHook>,
    pub upon_sanitize_element: Option<ElementHook>,
    pub after_sanitize_elements: Option<ElementHook>,
    pub before_sanitize_attributes: Option<ElementHook>,
    pub upon_sanitize_attribute: Option<AttributeHook>,
    pub after_sanitize_attributes: Option<ElementHook>,
}

impl SanitizeHooks {
    /// True when no hook is registered at all; lets the direct sanitize path
    /// skip the tree walk entirely.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before_sanitize_elements.is_none()
            && self.upon_sanitize_element.is_none()
            && self.after_sanitize_elements.is_none()
            && self.before_sanitize_attributes.is_none()
            && self.upon_sanitize_attribute.is_none()
            && self.after_sanitize_attributes.is_none()
    }
}

impl fmt::Debug for SanitizeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.before_sanitize_elements.is_some() {
            set.entry(&"before_sanitize_elements");
        }
        if self.upon_sanitize_element.is_some() {
            set.entry(&"upon_sanitize_element");
        }
        if self.after_sanitize_elements.is_some() {
            set.entry(&"after_sanitize_elements");
        }
        if self.before_sanitize_attributes.is_some() {
            set.entry(&"before_sanitize_attributes");
        }
        if self.upon_sanitize_attribute.is_some() {
            set.entry(&"upon_sanitize_attribute");
        }
        if self.after_sanitize_attributes.is_some() {
            set.entry(&"after_sanitize_attributes");
        }
        set.finish()
    }
}
