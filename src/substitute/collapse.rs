//! Consecutive-substitution collapsing.
//!
//! Substitution tends to leave runs of adjacent blank wrapper elements
//! (collapsed headings, stacked line breaks). This pass removes the redundant
//! members of each run: the first element of a run always survives, as does
//! any element with real content.

use kuchiki::NodeRef;

use crate::dom;
use crate::error::PasteError;

/// Remove redundant blank elements matching the substitution `tag`.
///
/// Document-order walk with a "can remove next" flag: the first matching
/// element anchors a run; subsequent blank elements are removed until a
/// content-bearing element resets the flag and the element after it anchors
/// the next run. Idempotent.
pub fn collapse_consecutive(html: &str, tag: &str) -> Result<String, PasteError> {
    let body = dom::parse_body(html);

    // Collect before iterating: this pass detaches nodes.
    let matches: Vec<NodeRef> = match body.select(tag) {
        Ok(matches) => matches.map(|m| m.as_node().clone()).collect(),
        Err(()) => return Ok(html.to_string()),
    };

    let mut can_remove = false;
    let mut removed = 0usize;
    for node in matches {
        if !can_remove {
            can_remove = true;
            continue;
        }
        if dom::is_blank(&node) {
            node.detach();
            removed += 1;
        } else {
            can_remove = false;
        }
    }

    if removed > 0 {
        log::debug!("collapsed {removed} redundant <{tag}> element(s)");
    }
    dom::serialize_children(&body)
}
