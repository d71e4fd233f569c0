use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::join_nonempty;
use crate::parser::dom::{child_at, find_first, inner_markup_of, parent_of, StructureError};
use crate::parser::siblings::items;

static LOC: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td#LOC").unwrap());

const JURISDICTION_PREFIXES: [&str; 2] = ["City of ", "Town of "];

/// Towns ("Jurisdiction(s) for this Project").
///
/// The value cell holds bare `<li>` items with no enclosing `<ul>`, so each
/// town is pulled out of its item's markup by text search instead of through
/// the tree.
pub fn towns(doc: &Html) -> Result<Option<String>, StructureError> {
    let Some(label) = find_first(doc, &LOC) else {
        return Ok(None);
    };
    let row = parent_of(*label)?;
    let cell = child_at(row, 3)?;
    let names = items(cell).map(|item| town_name(&inner_markup_of(item)));
    Ok(join_nonempty(names))
}

/// Visible link text between the first `">` and the following `</a`, with the
/// jurisdiction type dropped.
fn town_name(markup: &str) -> String {
    let start = markup.find("\">").map(|i| i + 2).unwrap_or(0);
    let rest = &markup[start..];
    let end = rest.find("</a").unwrap_or(rest.len());
    let mut name = rest[..end].to_string();
    for prefix in JURISDICTION_PREFIXES {
        name = name.replace(prefix, "");
    }
    name.trim().to_string()
}
