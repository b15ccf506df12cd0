//! Report engine: data aggregation, row formatting, the recipient/sender
//! registry, the paginating layout engine, and the PDF/Excel exporters.

pub mod aggregator;
pub mod excel;
pub mod fonts;
pub mod formatter;
pub mod layout;
pub mod pdf;
pub mod recipients;

use crate::models::{RecipientId, TournamentId};
use chrono::NaiveDate;

/// Errors a report request can end in. Lookup failures abort before any
/// page is drawn; generation failures are terminal and never retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReportError {
    /// Referenced tournament does not exist.
    TournamentNotFound(TournamentId),
    /// Referenced recipient does not exist (delete path).
    RecipientNotFound(RecipientId),
    /// Standings scope resolved to zero rows where a standings table is required.
    StandingsNotFound,
    /// No final-day matches exist on the requested date.
    FinalDayNotFound(NaiveDate),
    /// No completed knockout matches to build a final-result report from.
    FinalsNotFound,
    /// The rendering library failed mid-draw; no partial document is returned.
    Generation(String),
}

impl ReportError {
    /// True for the caller-error variants surfaced as HTTP 404.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, ReportError::Generation(_))
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::TournamentNotFound(id) => {
                write!(f, "大会が見つかりません (ID: {})", id)
            }
            ReportError::RecipientNotFound(id) => {
                write!(f, "送信先が見つかりません (ID: {})", id)
            }
            ReportError::StandingsNotFound => write!(f, "順位データが見つかりません"),
            ReportError::FinalDayNotFound(date) => {
                write!(f, "最終日の試合が見つかりません ({})", date)
            }
            ReportError::FinalsNotFound => {
                write!(f, "決勝トーナメントの試合結果が見つかりません")
            }
            ReportError::Generation(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<printpdf::Error> for ReportError {
    fn from(e: printpdf::Error) -> Self {
        ReportError::Generation(format!("PDF生成に失敗しました: {}", e))
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::Generation(format!("Excel生成に失敗しました: {}", e))
    }
}
