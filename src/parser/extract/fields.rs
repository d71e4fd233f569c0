//! Label/value fields: a marker cell followed, two raw siblings later, by the
//! cell holding the value.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::plain;
use crate::parser::dom::{child_at, find_first, scan_by_text, string_of, value_cell, StructureError};
use crate::record::cleanup_text;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static PROJ_DESC: LazyLock<Selector> = LazyLock::new(|| selector("td#PROJ_DESC"));
static CON_BEGINS: LazyLock<Selector> = LazyLock::new(|| selector("td#CON_BEGINS"));
static CON_ENDS: LazyLock<Selector> = LazyLock::new(|| selector("td#CON_ENDS"));
static RES_ENGR: LazyLock<Selector> = LazyLock::new(|| selector("td#RES_ENGR"));
static MHD_DIST: LazyLock<Selector> = LazyLock::new(|| selector("td#MHD_DIST"));
static CUR_STATUS: LazyLock<Selector> = LazyLock::new(|| selector("td#CUR_STATUS"));
static DES_RESP: LazyLock<Selector> = LazyLock::new(|| selector("td#DES_RESP"));
static RIGHT_OF_WAY: LazyLock<Selector> = LazyLock::new(|| selector("td#RIGHT_OF_WAY"));
static EST_CON_COST: LazyLock<Selector> = LazyLock::new(|| selector("td#EST_CON_COST"));
static PRC_APPROVED: LazyLock<Selector> = LazyLock::new(|| selector(r#"td[title="Approved"]"#));
static SUBMITTED_25: LazyLock<Selector> = LazyLock::new(|| {
    selector(r#"td[title="The 25% project plan has been submitted to MassHighway for review and comment."]"#)
});
static SUBMITTED_75: LazyLock<Selector> = LazyLock::new(|| {
    selector(r#"td[title="The 75% project plan has been submitted to MassHighway for review and comment."]"#)
});
static SUBMITTED_100: LazyLock<Selector> = LazyLock::new(|| {
    selector(r#"td[title="The final project plan has been submitted to MassHighway for review and comment."]"#)
});
static ATTR_NAME: LazyLock<Selector> = LazyLock::new(|| selector("td.attrName"));

/// Label text of the PS&E row. The portal sometimes escapes the ampersand
/// twice, which survives parsing as a literal `&amp;`.
const PSE_LABELS: [&str; 2] = ["PS&E Received", "PS&amp;E Received"];

/// String value of the cell after the marker, trimmed.
fn cell_string(doc: &Html, marker: &Selector) -> Result<Option<String>, StructureError> {
    let Some(label) = find_first(doc, marker) else {
        return Ok(None);
    };
    Ok(plain(string_of(value_cell(label)?)))
}

/// Long project description. Every detail page carries this row, so a page
/// without it is treated as broken rather than as a missing value.
pub fn long_description(doc: &Html) -> Result<Option<String>, StructureError> {
    let label = find_first(doc, &PROJ_DESC).ok_or(StructureError::MissingMarker("td#PROJ_DESC"))?;
    let cell = value_cell(label)?;
    if cell.children().next().is_none() {
        return Ok(None);
    }
    Ok(string_of(child_at(cell, 1)?).map(|t| cleanup_text(&t)))
}

pub fn construction_begins(doc: &Html) -> Result<Option<String>, StructureError> {
    cell_string(doc, &CON_BEGINS)
}

pub fn construction_ends(doc: &Html) -> Result<Option<String>, StructureError> {
    cell_string(doc, &CON_ENDS)
}

/// Resident engineer. The name sits inside a link and may carry a suffix
/// ("Doe, III"); commas become spaces to keep the dump's columns intact.
pub fn resident_engineer(doc: &Html) -> Result<Option<String>, StructureError> {
    let Some(label) = find_first(doc, &RES_ENGR) else {
        return Ok(None);
    };
    let name = string_of(child_at(value_cell(label)?, 0)?);
    Ok(plain(name.map(|n| n.replace(',', " "))))
}

pub fn district(doc: &Html) -> Result<Option<String>, StructureError> {
    cell_string(doc, &MHD_DIST)
}

pub fn current_status(doc: &Html) -> Result<Option<String>, StructureError> {
    let Some(label) = find_first(doc, &CUR_STATUS) else {
        return Ok(None);
    };
    Ok(string_of(value_cell(label)?)
        .filter(|s| !s.is_empty())
        .map(|s| cleanup_text(&s)))
}

pub fn design_responsibility(doc: &Html) -> Result<Option<String>, StructureError> {
    cell_string(doc, &DES_RESP)
}

pub fn row_responsibility(doc: &Html) -> Result<Option<String>, StructureError> {
    cell_string(doc, &RIGHT_OF_WAY)
}

/// Estimated construction cost as bare digits: "$12,345" becomes "12345".
pub fn construction_cost(doc: &Html) -> Result<Option<String>, StructureError> {
    let Some(label) = find_first(doc, &EST_CON_COST) else {
        return Ok(None);
    };
    let amount = child_at(child_at(value_cell(label)?, 0)?, 0)?;
    Ok(plain(string_of(amount).map(|a| a.replace(['$', ','], ""))))
}

pub fn prc_approved(doc: &Html) -> Result<Option<String>, StructureError> {
    cell_string(doc, &PRC_APPROVED)
}

pub fn submitted_25(doc: &Html) -> Result<Option<String>, StructureError> {
    cell_string(doc, &SUBMITTED_25)
}

pub fn submitted_75(doc: &Html) -> Result<Option<String>, StructureError> {
    cell_string(doc, &SUBMITTED_75)
}

pub fn submitted_100(doc: &Html) -> Result<Option<String>, StructureError> {
    cell_string(doc, &SUBMITTED_100)
}

/// PS&E submission date. Its title attribute contains a comma, so the row is
/// found by scanning every label cell's text instead of by attribute.
pub fn pse_submitted(doc: &Html) -> Result<Option<String>, StructureError> {
    let Some(label) = PSE_LABELS
        .iter()
        .find_map(|text| scan_by_text(doc, &ATTR_NAME, text))
    else {
        return Ok(None);
    };
    Ok(plain(string_of(value_cell(label)?)))
}
