use std::io::Write;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::fetcher::DetailSource;
use crate::listing::{parse_listing, ListingEntry};
use crate::output::DumpWriter;
use crate::parser::{self, extract::FieldPolicy};
use crate::record::ProjectRecord;

/// Totals reported once the dump is written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub projects: usize,
    /// Projects whose detail fields could not be extracted.
    pub failures: usize,
}

impl RunSummary {
    pub fn print(&self) {
        println!(
            "Processing of {} projects completed. Whole-record extraction failures: {}.",
            self.projects, self.failures
        );
    }
}

/// Dump every project of the listing page, one row each, in listing order.
/// Detail pages are fetched one at a time.
pub async fn run<W: Write>(
    listing_html: &str,
    source: &DetailSource,
    out: &mut DumpWriter<W>,
    policy: FieldPolicy,
) -> Result<RunSummary> {
    let entries = parse_listing(listing_html);
    out.write_header()?;

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut summary = RunSummary::default();
    for entry in &entries {
        pb.suspend(|| println!("Processing project: {}", entry.number));
        let (record, failed) = process_project(entry, source, policy).await;
        out.write_project(&record)?;
        summary.projects += 1;
        if failed {
            summary.failures += 1;
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Dumped {} projects ({} failures)",
        summary.projects, summary.failures
    );
    Ok(summary)
}

/// Build one project's record. The second value is true when the detail
/// page could not be fetched or navigated, or the entry has no project number
/// to fetch it by.
pub async fn process_project(
    entry: &ListingEntry,
    source: &DetailSource,
    policy: FieldPolicy,
) -> (ProjectRecord, bool) {
    let mut record = ProjectRecord::new();
    entry.fill_summary(&mut record);

    if !entry.numbered {
        warn!("Project {:?}: no usable project number", entry.number);
        record.blank_detail();
        return (record, true);
    }

    match source.fetch(entry).await {
        Ok(body) => {
            let extraction = parser::process_detail_page(&body, &mut record, policy);
            if let Some(first) = extraction.failures.first() {
                warn!(
                    "Project {}: detail extraction failed at {} ({})",
                    entry.number,
                    first.column.label(),
                    first.error
                );
            }
            (record, extraction.failed())
        }
        Err(e) => {
            warn!("Project {}: {}", entry.number, e);
            record.blank_detail();
            (record, true)
        }
    }
}

// ── Tests ──
