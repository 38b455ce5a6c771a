//! Table normalization for pasted HTML.
//!
//! Two mutually exclusive modes, selected by whether `table` is in the
//! allow-list:
//!
//! - **Header promotion** (table allowed): the first `thead` row moves to the
//!   front of the `tbody` and every header cell becomes a regular cell, so the
//!   result is plain table markup with no header-row semantics.
//! - **Flatten to paragraphs** (table disallowed): every row becomes one
//!   paragraph whose content is the space-joined content of its cells; orphan
//!   cells and the row-group containers are then unwrapped. A table with R
//!   rows yields exactly R paragraphs.
//!
//! Input and output are raw HTML text; absence of tables is a no-op.

use html5ever::{LocalName, QualName, namespace_url, ns};
use kuchiki::NodeRef;

use crate::allowlist::AllowList;
use crate::dom;
use crate::error::PasteError;

/// Rewrite table markup into a form the allow-list can accept.
pub fn normalize(html: &str, allow: &AllowList) -> Result<String, PasteError> {
    if !html.to_ascii_lowercase().contains("<table") {
        return Ok(html.to_string());
    }

    let body = dom::parse_body(html);
    if allow.allows_tag("table") {
        promote_headers(&body);
    } else {
        log::debug!("tables disallowed, flattening to paragraphs");
        flatten_tables(&body);
    }
    dom::serialize_children(&body)
}

/// Move each table's first `thead` row into its `tbody` and demote every
/// header cell to a regular cell.
fn promote_headers(body: &NodeRef) {
    let tables: Vec<NodeRef> = match body.select("table") {
        Ok(matches) => matches.map(|m| m.as_node().clone()).collect(),
        Err(()) => return,
    };

    for table in tables {
        if let Ok(thead) = table.select_first("thead") {
            let thead = thead.as_node().clone();
            if let Ok(first_row) = thead.select_first("tr") {
                let row = first_row.as_node().clone();
                row.detach();
                match table.select_first("tbody") {
                    Ok(tbody) => tbody.as_node().prepend(row),
                    // No tbody: leave the row as a direct table child where
                    // the thead used to be.
                    Err(()) => thead.insert_after(row),
                }
            }
            if thead.select_first("tr").is_err() {
                thead.detach();
            }
        }

        // Collect before detaching; renaming replaces nodes in place.
        let header_cells: Vec<NodeRef> = match table.select("th") {
            Ok(matches) => matches.map(|m| m.as_node().clone()).collect(),
            Err(()) => continue,
        };
        for cell in header_cells {
            rename_to_td(&cell);
        }
    }
}

/// Replace a `th` with a `td` carrying the same attributes and children.
fn rename_to_td(cell: &NodeRef) {
    let attributes = match cell.as_element() {
        Some(el) => el.attributes.borrow().map.clone(),
        None => return,
    };
    let replacement = NodeRef::new_element(
        QualName::new(None, ns!(html), LocalName::from("td")),
        attributes,
    );
    dom::move_children(cell, &replacement);
    cell.insert_before(replacement);
    cell.detach();
}

/// Degrade all tables into one paragraph per row.
fn flatten_tables(body: &NodeRef) {
    // Rows first: each becomes a paragraph of its cells' content.
    let rows: Vec<NodeRef> = match body.select("tr") {
        Ok(matches) => matches.map(|m| m.as_node().clone()).collect(),
        Err(()) => return,
    };
    for row in rows {
        let paragraph = dom::new_element("p");
        let cells: Vec<NodeRef> = row
            .children()
            .filter(|child| {
                matches!(dom::element_name(child).as_deref(), Some("td" | "th"))
            })
            .collect();
        for (index, cell) in cells.iter().enumerate() {
            if index > 0 {
                paragraph.append(NodeRef::new_text(" "));
            }
            dom::move_children(cell, &paragraph);
        }
        row.insert_before(paragraph);
        row.detach();
    }

    // Orphan cells (not reachable through a row any more): unwrap with a
    // trailing space.
    if let Ok(matches) = body.select("td, th") {
        let orphans: Vec<NodeRef> = matches.map(|m| m.as_node().clone()).collect();
        for cell in orphans {
            dom::unwrap_children(&cell);
            cell.insert_before(NodeRef::new_text(" "));
            cell.detach();
        }
    }

    // Finally unwrap the row groups and the table itself.
    if let Ok(matches) = body.select("thead, tbody, tfoot, table") {
        let containers: Vec<NodeRef> = matches.map(|m| m.as_node().clone()).collect();
        for container in containers {
            dom::unwrap_children(&container);
            container.detach();
        }
    }
}
