//! The sanitize pass: lifecycle hooks, structural repair, attribute
//! filtering, and the final allow-list enforcement.
//!
//! The heavy lifting of actually removing dangerous markup is delegated to
//! [`ammonia`]; everything this module adds happens *before* that final clean
//! so that disallowed structure is repaired (substituted) instead of silently
//! unwrapped. Every tag in the output is in `allow.tags` by construction:
//! ammonia has the last word.

mod hooks;

pub use hooks::{AttributeHook, ElementHook, SanitizeHooks};

use std::collections::{HashMap, HashSet};

use kuchiki::{ExpandedName, NodeRef};

use crate::allowlist::AllowList;
use crate::dom;
use crate::error::PasteError;
use crate::substitute::Substitution;

/// Result of a repairing sanitize pass: the clean markup plus the
/// substitution tag the pass settled on (if any node needed one), which the
/// collapser needs afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOutcome {
    pub html: String,
    pub substitution_tag: Option<String>,
}

/// Sanitize `html` against the allow-list with structural repair.
///
/// Disallowed headings become `<subst><b>…</b></subst>`, disallowed block
/// elements become `<subst>…</subst>`, and line-break-implying elements
/// leave a `<br>` behind, where `subst` is the first allowed candidate of
/// the block-element priority list. With no viable candidate, repair is
/// skipped and disallowed tags are unwrapped by the final clean.
pub fn sanitize_with_repair(
    html: &str,
    allow: &AllowList,
    hooks: &SanitizeHooks,
) -> Result<SanitizeOutcome, PasteError> {
    let body = dom::parse_body(html);
    let mut substitution = Substitution::new(allow);

    if let Some(hook) = &hooks.before_sanitize_elements {
        hook(&body);
    }

    // Collect up front: repair detaches nodes. Replaced nodes keep their
    // children in the tree, so later entries stay valid.
    let elements: Vec<NodeRef> = body
        .descendants()
        .filter(|node| node.as_element().is_some())
        .collect();
    for node in &elements {
        if let Some(hook) = &hooks.upon_sanitize_element {
            hook(node);
        }
        if let Some(name) = dom::element_name(node) {
            if !allow.allows_tag(&name) {
                crate::substitute::apply(node, &name, &mut substitution);
            }
        }
    }

    if let Some(hook) = &hooks.after_sanitize_elements {
        hook(&body);
    }

    filter_attributes(&body, allow, hooks);

    let markup = dom::serialize_children(&body)?;
    Ok(SanitizeOutcome {
        html: clean_markup(&markup, allow),
        substitution_tag: substitution.into_choice(),
    })
}

/// Sanitize `html` against the allow-list without structural repair.
///
/// Used when block-element substitution is disabled by configuration. With
/// no hooks registered this is a single ammonia pass over the raw markup.
pub fn sanitize(
    html: &str,
    allow: &AllowList,
    hooks: &SanitizeHooks,
) -> Result<String, PasteError> {
    if hooks.is_empty() {
        return Ok(clean_markup(html, allow));
    }

    let body = dom::parse_body(html);
    if let Some(hook) = &hooks.before_sanitize_elements {
        hook(&body);
    }
    if let Some(hook) = &hooks.upon_sanitize_element {
        let elements: Vec<NodeRef> = body
            .descendants()
            .filter(|node| node.as_element().is_some())
            .collect();
        for node in &elements {
            hook(node);
        }
    }
    if let Some(hook) = &hooks.after_sanitize_elements {
        hook(&body);
    }

    filter_attributes(&body, allow, hooks);

    let markup = dom::serialize_children(&body)?;
    Ok(clean_markup(&markup, allow))
}

/// Attribute phase: run the attribute hook and strip everything outside the
/// allow-list. The final clean re-enforces this, but stripping here means the
/// `after_sanitize_attributes` hook observes the tree in its final shape.
fn filter_attributes(body: &NodeRef, allow: &AllowList, hooks: &SanitizeHooks) {
    if let Some(hook) = &hooks.before_sanitize_attributes {
        hook(body);
    }

    for node in body.descendants() {
        let Some(element) = node.as_element() else {
            continue;
        };
        let tag = element.name.local.as_ref().to_ascii_lowercase();

        let entries: Vec<(ExpandedName, String)> = element
            .attributes
            .borrow()
            .map
            .iter()
            .map(|(name, attr)| (name.clone(), attr.value.clone()))
            .collect();

        for (name, value) in entries {
            let local = name.local.as_ref().to_ascii_lowercase();
            let mut kept_value = Some(value);

            if let Some(hook) = &hooks.upon_sanitize_attribute {
                kept_value = match &kept_value {
                    Some(value) => hook(&tag, &local, value),
                    None => None,
                };
            }

            let mut attributes = element.attributes.borrow_mut();
            match kept_value {
                Some(value) if allow.allows_attribute(&local) => {
                    if let Some(attr) = attributes.map.get_mut(&name) {
                        attr.value = value;
                    }
                }
                _ => {
                    attributes.map.remove(&name);
                }
            }
        }
    }

    if let Some(hook) = &hooks.after_sanitize_attributes {
        hook(body);
    }
}

/// The final, authoritative clean: ammonia configured from the allow-list.
///
/// The allow-list replaces ammonia's default tag set; attributes are applied
/// generically (the allow-list is global across tags, not per-tag), ammonia's
/// per-tag attribute defaults are cleared so nothing survives that the
/// allow-list never granted, and forced `rel` injection on links is disabled
/// for the same reason. Ammonia refuses a tag that is both allowed and
/// content-cleaned, so the allow-list wins: an explicitly allowed `script`
/// or `style` is removed from the content-cleaning set instead of aborting
/// the paste.
fn clean_markup(markup: &str, allow: &AllowList) -> String {
    let tags: HashSet<&str> = allow.tags.iter().map(String::as_str).collect();
    let attributes: HashSet<&str> = allow.attributes.iter().map(String::as_str).collect();
    let clean_content: HashSet<&str> = ["script", "style"]
        .into_iter()
        .filter(|tag| !tags.contains(tag))
        .collect();

    let mut builder = ammonia::Builder::default();
    builder
        .tags(tags)
        .clean_content_tags(clean_content)
        .generic_attributes(attributes)
        .tag_attributes(HashMap::new())
        .link_rel(None);
    builder.clean(markup).to_string()
}
