use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use super::plain;
use crate::parser::dom::{child_at, parent_of, scan_by_text, sibling_after, string_of, StructureError};

static SECTION_HEADER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th.sectionHeader2").unwrap());

/// Date the right-of-way certification was issued.
///
/// The "Right of Way" section header is almost always present but its value
/// row often is not, so navigation failures here are absorbed and never reach
/// the record-level failure boundary.
pub fn certification_issued(doc: &Html) -> Result<Option<String>, StructureError> {
    match certification_date(doc) {
        Ok(date) => Ok(date),
        Err(e) => {
            debug!("no ROW certification date: {}", e);
            Ok(None)
        }
    }
}

/// The value row is the second raw sibling of the header's row; the date is
/// its third cell.
fn certification_date(doc: &Html) -> Result<Option<String>, StructureError> {
    let Some(header) = scan_by_text(doc, &SECTION_HEADER, "Right of Way") else {
        return Ok(None);
    };
    let header_row = parent_of(*header)?;
    let value_row = sibling_after(header_row, 2)?;
    let cell = child_at(value_row, 5)?;
    Ok(plain(string_of(cell)))
}
