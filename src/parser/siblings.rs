//! Paired-sibling scanning.
//!
//! Some lists on the detail page lack their grouping element, so items can't
//! be reached with selectors. Each item is preceded by a whitespace text
//! node, which makes the items recoverable by position parity alone.

use ego_tree::iter::Children;
use scraper::Node;

use super::dom::Raw;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Even 0-based position: the gap before an item.
    Separator,
    /// Odd 0-based position.
    Item,
}

impl Slot {
    fn at(index: usize) -> Slot {
        if index % 2 == 0 {
            Slot::Separator
        } else {
            Slot::Item
        }
    }
}

/// Raw children of a node, each tagged with its slot.
pub struct PairedSiblings<'a> {
    children: Children<'a, Node>,
    index: usize,
}

impl<'a> Iterator for PairedSiblings<'a> {
    type Item = (Slot, Raw<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.children.next()?;
        let slot = Slot::at(self.index);
        self.index += 1;
        Some((slot, node))
    }
}

pub fn paired_children(parent: Raw<'_>) -> PairedSiblings<'_> {
    PairedSiblings {
        children: parent.children(),
        index: 0,
    }
}

/// Only the item slots of `parent`.
pub fn items(parent: Raw<'_>) -> impl Iterator<Item = Raw<'_>> {
    paired_children(parent).filter_map(|(slot, node)| match slot {
        Slot::Item => Some(node),
        Slot::Separator => None,
    })
}

// ── Tests ──
