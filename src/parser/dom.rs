//! Raw-node navigation over a parsed page.
//!
//! Offsets here count every node, whitespace text included, because the
//! portal's markup is only positionally stable at that level.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;

pub type Raw<'a> = NodeRef<'a, Node>;

/// The page did not have the shape a lookup navigates through.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("required marker {0} not found")]
    MissingMarker(&'static str),
    #[error("{node} has no sibling {offset} positions after it")]
    MissingSibling { node: String, offset: usize },
    #[error("{node} has no child at index {index}")]
    MissingChild { node: String, index: usize },
    #[error("{0} has no parent")]
    MissingParent(String),
}

/// First element matching `selector`.
pub fn find_first<'a>(doc: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    doc.select(selector).next()
}

/// Text-scan fallback: the first candidate matching `selector` whose string
/// value equals `text` exactly. Used where the marker can't be written as a
/// selector (text content, attribute values the portal mangles).
pub fn scan_by_text<'a>(doc: &'a Html, selector: &Selector, text: &str) -> Option<ElementRef<'a>> {
    doc.select(selector)
        .find(|el| string_of(**el).as_deref() == Some(text))
}

/// The raw sibling `offset` positions after `node`.
pub fn sibling_after(node: Raw<'_>, offset: usize) -> Result<Raw<'_>, StructureError> {
    let mut current = node;
    for _ in 0..offset {
        current = current
            .next_sibling()
            .ok_or_else(|| StructureError::MissingSibling {
                node: describe(node),
                offset,
            })?;
    }
    Ok(current)
}

/// Raw child at `index`, text nodes included.
pub fn child_at(node: Raw<'_>, index: usize) -> Result<Raw<'_>, StructureError> {
    node.children()
        .nth(index)
        .ok_or_else(|| StructureError::MissingChild {
            node: describe(node),
            index,
        })
}

pub fn parent_of(node: Raw<'_>) -> Result<Raw<'_>, StructureError> {
    node.parent()
        .ok_or_else(|| StructureError::MissingParent(describe(node)))
}

/// The value cell of a label/value table row: two raw siblings on from the
/// label, skipping the whitespace between the cells.
pub fn value_cell(label: ElementRef<'_>) -> Result<Raw<'_>, StructureError> {
    sibling_after(*label, 2)
}

/// Single string value of a node: a text node's text, or the string value of
/// an element's only child. Anything with zero or several children has none.
pub fn string_of(node: Raw<'_>) -> Option<String> {
    match node.value() {
        Node::Text(text) => Some(text.text.to_string()),
        Node::Element(_) => {
            let mut children = node.children();
            let only = children.next()?;
            if children.next().is_some() {
                return None;
            }
            string_of(only)
        }
        _ => None,
    }
}

/// Concatenated text of a node and all its descendants.
pub fn rendered_text(node: Raw<'_>) -> String {
    match ElementRef::wrap(node) {
        Some(el) => el.text().collect(),
        None => node
            .value()
            .as_text()
            .map(|t| t.text.to_string())
            .unwrap_or_default(),
    }
}

/// Serialized contents of a node: inner HTML for elements, the text itself
/// for text nodes.
pub fn inner_markup_of(node: Raw<'_>) -> String {
    match ElementRef::wrap(node) {
        Some(el) => el.inner_html(),
        None => rendered_text(node),
    }
}

fn describe(node: Raw<'_>) -> String {
    match node.value() {
        Node::Element(el) => match el.id() {
            Some(id) => format!("<{} id={}>", el.name(), id),
            None => format!("<{}>", el.name()),
        },
        Node::Text(_) => "text node".to_string(),
        _ => "node".to_string(),
    }
}

// ── Tests ──
