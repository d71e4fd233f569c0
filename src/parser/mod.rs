pub mod dom;
pub mod extract;
pub mod siblings;

use scraper::Html;

use crate::record::ProjectRecord;
use extract::{Extraction, FieldPolicy};

/// Parse a detail page and fill the record's detail columns from it.
pub fn process_detail_page(body: &str, record: &mut ProjectRecord, policy: FieldPolicy) -> Extraction {
    let doc = Html::parse_document(body);
    extract::extract_detail_fields(&doc, record, policy)
}
