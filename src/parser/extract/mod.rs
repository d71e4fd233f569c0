pub mod bridges;
pub mod fields;
pub mod right_of_way;
pub mod towns;

use scraper::Html;
use tracing::debug;

use super::dom::StructureError;
use crate::record::{Column, ProjectRecord};

type Lookup = fn(&Html) -> Result<Option<String>, StructureError>;

/// Detail lookups in the order they run. A failure is reported against the
/// first column whose lookup breaks.
const LOOKUPS: [(Column, Lookup); 17] = [
    (Column::Towns, towns::towns),
    (Column::LongDesc, fields::long_description),
    (Column::ConBegins, fields::construction_begins),
    (Column::ConEnds, fields::construction_ends),
    (Column::ResEngr, fields::resident_engineer),
    (Column::MhdDist, fields::district),
    (Column::CurStatus, fields::current_status),
    (Column::Bridges, bridges::bridges),
    (Column::DesResp, fields::design_responsibility),
    (Column::RowResp, fields::row_responsibility),
    (Column::RowCertIssued, right_of_way::certification_issued),
    (Column::EstConCost, fields::construction_cost),
    (Column::DatePrcApproved, fields::prc_approved),
    (Column::Date25Submitted, fields::submitted_25),
    (Column::Date75Submitted, fields::submitted_75),
    (Column::Date100Submitted, fields::submitted_100),
    (Column::DatePseSubmitted, fields::pse_submitted),
];

/// What happens to the rest of a record when one lookup hits a page it
/// can't navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    /// Stop at the first structural error and blank every detail field,
    /// including ones already extracted. Matches the historical dumps.
    #[default]
    WholeRecord,
    /// Blank only the field whose lookup failed.
    Isolated,
}

#[derive(Debug)]
pub struct FieldFailure {
    pub column: Column,
    pub error: StructureError,
}

/// Result of one extraction pass. Failures are empty when every lookup
/// either found its value or cleanly found nothing.
#[derive(Debug, Default)]
pub struct Extraction {
    pub failures: Vec<FieldFailure>,
}

impl Extraction {
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Fill every detail column of `record` from the project's detail page.
///
/// Never fails outward: structural errors are applied to the record according
/// to `policy` and reported in the returned [`Extraction`].
pub fn extract_detail_fields(
    doc: &Html,
    record: &mut ProjectRecord,
    policy: FieldPolicy,
) -> Extraction {
    let mut extraction = Extraction::default();

    for (column, lookup) in LOOKUPS {
        match lookup(doc) {
            Ok(value) => record.set_or_blank(column, value),
            Err(error) => {
                debug!(
                    "Structure error while extracting {}: {}",
                    column.label(),
                    error
                );
                extraction.failures.push(FieldFailure { column, error });
                match policy {
                    FieldPolicy::WholeRecord => {
                        record.blank_detail();
                        return extraction;
                    }
                    FieldPolicy::Isolated => record.set_or_blank(column, None),
                }
            }
        }
    }

    extraction
}

/// Trimmed value, or `None` if nothing is left.
pub(crate) fn plain(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Space-joined non-empty entries, or `None` if there are none.
pub(crate) fn join_nonempty<I, S>(entries: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let kept: Vec<String> = entries
        .into_iter()
        .filter(|e| !e.as_ref().is_empty())
        .map(|e| e.as_ref().to_string())
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(" "))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BLANK;

    fn fixture(name: &str) -> Html {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap();
        Html::parse_document(&html)
    }

    fn listing_record() -> ProjectRecord {
        let mut r = ProjectRecord::new();
        r.set(Column::ProjNum, "604123");
        r.set(Column::ProjDesc, "\"Arlington- Route 2 resurfacing\"");
        r.set(Column::ProjType, "Resurfacing");
        r.set(Column::ProjStatus, "Under Construction");
        r.set(Column::ProjTipYear, "2010");
        r
    }

    fn extract(name: &str, policy: FieldPolicy) -> (ProjectRecord, Extraction) {
        let doc = fixture(name);
        let mut record = listing_record();
        let extraction = extract_detail_fields(&doc, &mut record, policy);
        (record, extraction)
    }

    #[test]
    fn full_detail_page() {
        let (r, x) = extract("detail_604123", FieldPolicy::WholeRecord);
        assert!(!x.failed());
        assert!(r.is_complete());
        assert_eq!(r.get(Column::Towns), Some("Arlington Belmont Cambridge"));
        assert_eq!(
            r.get(Column::LongDesc),
            Some("\"Resurfacing & related work on Route 2 from the Belmont line to Alewife Brook Parkway.\"")
        );
        assert_eq!(r.get(Column::ConBegins), Some("10/01/2010"));
        assert_eq!(r.get(Column::ConEnds), Some("06/30/2012"));
        assert_eq!(r.get(Column::ResEngr), Some("Doe  John"));
        assert_eq!(r.get(Column::MhdDist), Some("4"));
        assert_eq!(r.get(Column::CurStatus), Some("\"Contract awarded 5/2010. Work under way.\""));
        assert_eq!(r.get(Column::DesResp), Some("MassHighway"));
        assert_eq!(r.get(Column::RowResp), Some("Not Required"));
        assert_eq!(r.get(Column::RowCertIssued), Some("05/12/2010"));
        assert_eq!(r.get(Column::EstConCost), Some("4512000"));
        assert_eq!(r.get(Column::DatePrcApproved), Some("11/15/2007"));
        assert_eq!(r.get(Column::Date25Submitted), Some("03/03/2008"));
        assert_eq!(r.get(Column::Date75Submitted), Some("09/19/2008"));
        assert_eq!(r.get(Column::Date100Submitted), Some("01/30/2009"));
        assert_eq!(r.get(Column::DatePseSubmitted), Some("04/02/2009"));
        assert_eq!(r.get(Column::Bridges), Some("A-15-012 C-01-004"));
    }

    #[test]
    fn missing_row_cert_value_blanks_only_that_field() {
        let (r, x) = extract("detail_no_row_cert", FieldPolicy::WholeRecord);
        assert!(!x.failed());
        assert_eq!(r.get(Column::RowCertIssued), Some(BLANK));
        assert_eq!(r.get(Column::Towns), Some("Boston"));
        assert_eq!(r.get(Column::EstConCost), Some("250000"));
        assert_eq!(r.get(Column::DatePseSubmitted), Some(BLANK));
        assert_eq!(r.get(Column::Bridges), Some(BLANK));
        assert_eq!(r.get(Column::ConBegins), Some("Not Determined"));
    }

    #[test]
    fn empty_page_blanks_every_detail_field() {
        let doc = Html::parse_document("");
        let mut r = listing_record();
        let x = extract_detail_fields(&doc, &mut r, FieldPolicy::WholeRecord);
        assert_eq!(x.failures.len(), 1);
        assert_eq!(x.failures[0].column, Column::LongDesc);
        for column in Column::ALL {
            if column.is_detail() {
                assert_eq!(r.get(column), Some(BLANK), "{}", column.name());
            }
        }
        assert_eq!(r.get(Column::ProjNum), Some("604123"));
        assert_eq!(r.get(Column::ProjTipYear), Some("2010"));
    }

    #[test]
    fn broken_field_blanks_earlier_fields_too() {
        let (r, x) = extract("detail_broken_cost", FieldPolicy::WholeRecord);
        assert_eq!(x.failures.len(), 1);
        assert_eq!(x.failures[0].column, Column::EstConCost);
        assert_eq!(r.get(Column::Towns), Some(BLANK));
        assert_eq!(r.get(Column::ConBegins), Some(BLANK));
        assert_eq!(r.get(Column::DatePseSubmitted), Some(BLANK));
        assert_eq!(r.get(Column::ProjType), Some("Resurfacing"));
        assert!(r.is_complete());
    }

    #[test]
    fn isolated_policy_keeps_other_fields() {
        let (r, x) = extract("detail_broken_cost", FieldPolicy::Isolated);
        assert_eq!(x.failures.len(), 1);
        assert_eq!(r.get(Column::EstConCost), Some(BLANK));
        assert_eq!(r.get(Column::Towns), Some("Quincy"));
        assert_eq!(r.get(Column::ConBegins), Some("04/01/2011"));
        assert_eq!(r.get(Column::DatePrcApproved), Some("08/08/2008"));
        assert!(r.is_complete());
    }

    #[test]
    fn join_skips_empty_entries() {
        assert_eq!(join_nonempty(["a", "", "b"]).as_deref(), Some("a b"));
        assert_eq!(join_nonempty(Vec::<String>::new()), None);
    }
}
