use std::sync::LazyLock;

use regex::Regex;

/// Written for any field that was searched for but not found.
pub const BLANK: &str = " ";

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Output columns, declared in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ProjNum,
    ProjDesc,
    Towns,
    ProjType,
    ProjStatus,
    ProjTipYear,
    LongDesc,
    ConBegins,
    ConEnds,
    ResEngr,
    MhdDist,
    CurStatus,
    DesResp,
    RowResp,
    RowCertIssued,
    EstConCost,
    DatePrcApproved,
    Date25Submitted,
    Date75Submitted,
    Date100Submitted,
    DatePseSubmitted,
    Bridges,
}

pub const COLUMN_COUNT: usize = 22;

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::ProjNum,
        Column::ProjDesc,
        Column::Towns,
        Column::ProjType,
        Column::ProjStatus,
        Column::ProjTipYear,
        Column::LongDesc,
        Column::ConBegins,
        Column::ConEnds,
        Column::ResEngr,
        Column::MhdDist,
        Column::CurStatus,
        Column::DesResp,
        Column::RowResp,
        Column::RowCertIssued,
        Column::EstConCost,
        Column::DatePrcApproved,
        Column::Date25Submitted,
        Column::Date75Submitted,
        Column::Date100Submitted,
        Column::DatePseSubmitted,
        Column::Bridges,
    ];

    /// Header name as written to the dump.
    pub fn name(self) -> &'static str {
        match self {
            Column::ProjNum => "PROJ_NUM",
            Column::ProjDesc => "PROJ_DESC",
            Column::Towns => "TOWNS",
            Column::ProjType => "PROJ_TYPE",
            Column::ProjStatus => "PROJ_STATUS",
            Column::ProjTipYear => "PROJ_TIP_YEAR",
            Column::LongDesc => "LONG_DESC",
            Column::ConBegins => "CON_BEGINS",
            Column::ConEnds => "CON_ENDS",
            Column::ResEngr => "RES_ENGR",
            Column::MhdDist => "MHD_DIST",
            Column::CurStatus => "CUR_STATUS",
            Column::DesResp => "DES_RESP",
            Column::RowResp => "ROW_RESP",
            Column::RowCertIssued => "ROW_CERT_ISSUED",
            Column::EstConCost => "EST_CON_COST",
            Column::DatePrcApproved => "DATE_PRC_APPROVED",
            Column::Date25Submitted => "DATE_25_SUBMITTED",
            Column::Date75Submitted => "DATE_75_SUBMITTED",
            Column::Date100Submitted => "DATE_100_SUBMITTED",
            Column::DatePseSubmitted => "DATE_PSE_SUBMITTED",
            Column::Bridges => "BRIDGES",
        }
    }

    /// Human-readable attribute name, used when reporting extraction failures.
    pub fn label(self) -> &'static str {
        match self {
            Column::ProjNum => "Project Number",
            Column::ProjDesc => "Project Description",
            Column::Towns => "Towns",
            Column::ProjType => "Project Type",
            Column::ProjStatus => "Project Status",
            Column::ProjTipYear => "TIP Year",
            Column::LongDesc => "Long Project Description",
            Column::ConBegins => "Construction Begins",
            Column::ConEnds => "Construction Ends",
            Column::ResEngr => "Resident Engineer",
            Column::MhdDist => "MHD District",
            Column::CurStatus => "Current Status",
            Column::DesResp => "Design Responsibility",
            Column::RowResp => "ROW Responsibility",
            Column::RowCertIssued => "ROW Certification Issued Date",
            Column::EstConCost => "Estimated Construction Cost",
            Column::DatePrcApproved => "PRC Approved Date",
            Column::Date25Submitted => "Date 25% Submitted",
            Column::Date75Submitted => "Date 75% Submitted",
            Column::Date100Submitted => "Date 100% Submitted",
            Column::DatePseSubmitted => "Date PSE Submitted",
            Column::Bridges => "Bridges",
        }
    }

    /// True for columns filled from the project's detail page.
    pub fn is_detail(self) -> bool {
        !matches!(
            self,
            Column::ProjNum
                | Column::ProjDesc
                | Column::ProjType
                | Column::ProjStatus
                | Column::ProjTipYear
        )
    }
}

/// One project's attributes. A `None` slot has not been populated yet and is
/// never expected to reach the writer.
#[derive(Debug, Clone, Default)]
pub struct ProjectRecord {
    values: [Option<String>; COLUMN_COUNT],
}

impl ProjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.values[column as usize] = Some(value.into());
    }

    /// Store `value`, or the blank sentinel when the lookup came back empty.
    pub fn set_or_blank(&mut self, column: Column, value: Option<String>) {
        self.set(column, value.unwrap_or_else(|| BLANK.to_string()));
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.values[column as usize].as_deref()
    }

    /// Reset every detail-page column to the blank sentinel. Listing columns
    /// keep whatever they hold.
    pub fn blank_detail(&mut self) {
        for column in Column::ALL.into_iter().filter(|c| c.is_detail()) {
            self.set(column, BLANK);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Field values in output order. Unpopulated slots are written blank.
    pub fn row(&self) -> Vec<&str> {
        self.values
            .iter()
            .map(|v| v.as_deref().unwrap_or(BLANK))
            .collect()
    }
}

/// Clean up free text for the dump and wrap it in double quotes.
///
/// `&amp;` left over from the portal's double-escaping is decoded, commas and
/// CR/LF become spaces, embedded double quotes are dropped, and whitespace
/// runs collapse to a single space. The dump's columns are split on bare
/// commas, so none may survive inside the quotes.
pub fn cleanup_text(raw: &str) -> String {
    let decoded = raw
        .replace("&amp;", "&")
        .replace([',', '\r', '\n'], " ")
        .replace('"', "");
    let merged = WHITESPACE_RE.replace_all(decoded.trim(), " ");
    format!("\"{}\"", merged)
}

// ── Tests ──
