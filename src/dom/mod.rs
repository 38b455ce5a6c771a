//! Shared DOM-tree helpers for the normalization passes.
//!
//! Every pass in this crate follows the same cycle: parse the fragment once,
//! mutate the tree in place, serialize once. Passes that detach nodes must
//! collect their matches into a `Vec` first, since detaching during iteration
//! invalidates kuchiki's traversal iterators.

use html5ever::{LocalName, QualName, namespace_url, ns};
use kuchiki::traits::TendrilSink;
use kuchiki::{NodeData, NodeRef};

use crate::error::PasteError;

/// Parse an HTML fragment and return its `<body>` node.
///
/// The html5ever parser always synthesizes `html`/`head`/`body` around a
/// fragment, so the body is where the pasted content lands.
pub(crate) fn parse_body(html: &str) -> NodeRef {
    let document = kuchiki::parse_html().one(html.to_string());
    match document.select_first("body") {
        Ok(body) => body.as_node().clone(),
        // Unreachable with the html5ever tree builder, but never panic on
        // untrusted clipboard input.
        Err(()) => document,
    }
}

/// Serialize the children of `node` back to markup, excluding `node` itself.
pub(crate) fn serialize_children(node: &NodeRef) -> Result<String, PasteError> {
    let mut out = Vec::new();
    for child in node.children() {
        child.serialize(&mut out)?;
    }
    Ok(String::from_utf8(out)?)
}

/// Create an empty HTML element with the given tag name.
pub(crate) fn new_element(tag: &str) -> NodeRef {
    NodeRef::new_element(
        QualName::new(None, ns!(html), LocalName::from(tag)),
        std::iter::empty(),
    )
}

/// Lowercased local tag name of `node`, or `None` for non-element nodes.
pub(crate) fn element_name(node: &NodeRef) -> Option<String> {
    node.as_element()
        .map(|el| el.name.local.as_ref().to_ascii_lowercase())
}

/// Move all children of `node` into `target`, preserving order.
pub(crate) fn move_children(node: &NodeRef, target: &NodeRef) {
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
        target.append(child);
    }
}

/// Hoist all children of `node` to sit immediately before it.
pub(crate) fn unwrap_children(node: &NodeRef) {
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
        node.insert_before(child);
    }
}

/// True when `node` carries no visible content: no element children and only
/// whitespace text (comments are ignored). `<p><img></p>` is not blank.
pub(crate) fn is_blank(node: &NodeRef) -> bool {
    node.children().all(|child| match child.data() {
        NodeData::Text(text) => text.borrow().trim().is_empty(),
        NodeData::Comment(_) => true,
        NodeData::Element(_) => false,
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_body_extracts_fragment_children() {
        let body = parse_body("<p>hello</p><span>x</span>");
        let names: Vec<String> = body.children().filter_map(|c| element_name(&c)).collect();
        assert_eq!(names, vec!["p", "span"]);
    }

    #[test]
    fn serialize_children_round_trips_fragment() {
        let body = parse_body("<p>hello <b>world</b></p>");
        let markup = serialize_children(&body).unwrap();
        assert_eq!(markup, "<p>hello <b>world</b></p>");
    }

    #[test]
    fn blank_detection_ignores_whitespace_and_comments() {
        let body = parse_body("<p>  \n </p><p><!-- note --></p><p><img src=\"x\"></p><p>text</p>");
        let flags: Vec<bool> = body.children().map(|c| is_blank(&c)).collect();
        assert_eq!(flags, vec![true, true, false, false]);
    }

    #[test]
    fn unwrap_children_hoists_content() {
        let body = parse_body("<div><p>a</p><p>b</p></div>");
        let div = body.select_first("div").unwrap().as_node().clone();
        unwrap_children(&div);
        div.detach();
        assert_eq!(serialize_children(&body).unwrap(), "<p>a</p><p>b</p>");
    }
}
