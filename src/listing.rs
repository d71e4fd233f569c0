use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::record::{cleanup_text, Column, ProjectRecord};

static NUMBER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.prjProjectNumber").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// One project row of the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Six digits, zero-padded. When the cell held no usable number this is
    /// the cell's raw text instead, possibly empty.
    pub number: String,
    /// False when `number` could not be parsed. Such entries have no detail
    /// page to fetch.
    pub numbered: bool,
    pub description: Option<String>,
    pub project_type: Option<String>,
    pub status: Option<String>,
    pub tip_year: Option<String>,
    /// Detail page link as written in the listing.
    pub href: Option<String>,
}

impl ListingEntry {
    pub fn fill_summary(&self, record: &mut ProjectRecord) {
        record.set_or_blank(
            Column::ProjNum,
            Some(self.number.clone()).filter(|n| !n.is_empty()),
        );
        record.set_or_blank(
            Column::ProjDesc,
            self.description.as_deref().map(cleanup_text),
        );
        record.set_or_blank(Column::ProjType, self.project_type.clone());
        record.set_or_blank(Column::ProjStatus, self.status.clone());
        record.set_or_blank(Column::ProjTipYear, self.tip_year.clone());
    }
}

/// Every project in the listing, in page order, including rows whose number
/// cell doesn't hold a number.
pub fn parse_listing(html: &str) -> Vec<ListingEntry> {
    let doc = Html::parse_document(html);
    let entries: Vec<ListingEntry> = doc.select(&NUMBER_CELL).map(parse_entry).collect();
    info!("Projects in listing: {}", entries.len());
    entries
}

/// The number cell carries the detail link; description, type, status and TIP
/// year follow it in that order.
fn parse_entry(number_cell: ElementRef<'_>) -> ListingEntry {
    let link = number_cell.select(&LINK).next();
    let raw_number: String = match link {
        Some(a) => a.text().collect(),
        None => number_cell.text().collect(),
    };
    let (number, numbered) = match raw_number.trim().parse::<u32>() {
        Ok(n) => (format!("{:06}", n), true),
        Err(_) => {
            debug!("Listing row with project number {:?}", raw_number.trim());
            (raw_number.replace(',', " ").trim().to_string(), false)
        }
    };

    let cells: Vec<ElementRef<'_>> = number_cell
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .collect();
    let cell_text = |i: usize| -> Option<String> {
        cells
            .get(i)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    };

    ListingEntry {
        number,
        numbered,
        description: cell_text(0),
        project_type: cell_text(1),
        status: cell_text(2),
        tip_year: cell_text(3),
        href: link
            .and_then(|a| a.value().attr("href"))
            .map(|h| h.to_string()),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BLANK;

    fn fixture() -> Vec<ListingEntry> {
        let html = std::fs::read_to_string("tests/fixtures/listing.html").unwrap();
        parse_listing(&html)
    }

    #[test]
    fn entries_in_page_order() {
        let entries = fixture();
        let numbers: Vec<&str> = entries.iter().map(|e| e.number.as_str()).collect();
        assert_eq!(numbers, vec!["604123", "605310", "606001", "TBD", "000098"]);
        let numbered: Vec<bool> = entries.iter().map(|e| e.numbered).collect();
        assert_eq!(numbered, vec![true, true, true, false, true]);
    }

    #[test]
    fn unnumbered_row_kept_with_raw_text() {
        let e = &fixture()[3];
        assert_eq!(e.description.as_deref(), Some("Placeholder row"));
        assert_eq!(e.tip_year.as_deref(), Some("0"));
        assert_eq!(e.href, None);

        let mut r = ProjectRecord::new();
        e.fill_summary(&mut r);
        assert_eq!(r.get(Column::ProjNum), Some("TBD"));
    }

    #[test]
    fn empty_number_cell_is_blank() {
        let entries = parse_listing(
            "<table><tr><td class=\"prjProjectNumber\"></td><td>Somewhere</td></tr></table>",
        );
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].numbered);
        let mut r = ProjectRecord::new();
        entries[0].fill_summary(&mut r);
        assert_eq!(r.get(Column::ProjNum), Some(BLANK));
    }

    #[test]
    fn summary_cells() {
        let e = &fixture()[0];
        assert_eq!(e.description.as_deref(), Some("Arlington- Route 2 resurfacing"));
        assert_eq!(e.project_type.as_deref(), Some("Resurfacing"));
        assert_eq!(e.status.as_deref(), Some("Under Construction"));
        assert_eq!(e.tip_year.as_deref(), Some("2010"));
        assert_eq!(
            e.href.as_deref(),
            Some("http://www.mhd.state.ma.us/ProjectInfo/Main.asp?ACTION=ViewProject&PROJECT_NO=604123")
        );
    }

    #[test]
    fn relative_and_missing_links() {
        let entries = fixture();
        assert_eq!(
            entries[2].href.as_deref(),
            Some("Main.asp?ACTION=ViewProject&PROJECT_NO=606001")
        );
        assert_eq!(entries[4].href, None);
        assert_eq!(entries[4].tip_year, None);
    }

    #[test]
    fn fill_summary_quotes_description() {
        let mut r = ProjectRecord::new();
        fixture()[1].fill_summary(&mut r);
        assert_eq!(r.get(Column::ProjNum), Some("605310"));
        assert_eq!(
            r.get(Column::ProjDesc),
            Some("\"Boston- Traffic signal upgrades & timing\"")
        );
        assert_eq!(r.get(Column::Towns), None);
    }

    #[test]
    fn missing_cells_are_blank() {
        let mut r = ProjectRecord::new();
        fixture()[4].fill_summary(&mut r);
        assert_eq!(r.get(Column::ProjNum), Some("000098"));
        assert_eq!(r.get(Column::ProjTipYear), Some(BLANK));
    }
}
