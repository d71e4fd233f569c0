use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::join_nonempty;
use crate::parser::dom::{child_at, rendered_text, scan_by_text, sibling_after, StructureError};
use crate::parser::siblings::items;

static H4: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h4").unwrap());

/// Bridge numbers listed under the "Bridges" heading. A project can have none.
///
/// The heading is matched on its text rather than taken as the only `<h4>`
/// on the page.
pub fn bridges(doc: &Html) -> Result<Option<String>, StructureError> {
    let Some(heading) = scan_by_text(doc, &H4, "Bridges") else {
        return Ok(None);
    };
    let list = sibling_after(*heading, 2)?;

    let mut numbers = Vec::new();
    for item in items(list) {
        let raw = rendered_text(child_at(item, 0)?);
        numbers.push(raw.replace(['\r', '\n'], "").trim().to_string());
    }
    Ok(join_nonempty(numbers))
}
