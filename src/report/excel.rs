//! Excel export of the daily match report.
//!
//! The workbook carries two sheets: `Matches` with one row per completed
//! match and `Goals` with one row per scoring event. Cell values come from
//! the same formatted rows the PDF renders, so the two exports never
//! disagree on content.

use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::models::{TournamentId, VenueId};
use crate::report::aggregator;
use crate::report::ReportError;
use crate::store::TournamentStore;

const MATCH_HEADERS: [&str; 9] = [
    "会場",
    "No",
    "キックオフ",
    "ホーム",
    "アウェイ",
    "前半",
    "後半",
    "合計",
    "PK",
];

const GOAL_HEADERS: [&str; 3] = ["会場", "試合No", "得点"];

/// Cell values for both sheets, header rows included.
#[derive(Clone, Debug)]
pub struct DailyReportSheets {
    pub matches: Vec<Vec<String>>,
    pub goals: Vec<Vec<String>>,
}

fn header_row(titles: &[&str]) -> Vec<String> {
    titles.iter().map(|t| t.to_string()).collect()
}

/// The sheet contents for a report scope. Empty scopes produce header rows
/// only.
pub fn daily_report_rows(
    store: &TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
) -> Result<DailyReportSheets, ReportError> {
    let sections = aggregator::venue_sections(store, tournament_id, target_date, venue_id)?;

    let mut matches = vec![header_row(&MATCH_HEADERS)];
    let mut goals = vec![header_row(&GOAL_HEADERS)];
    for section in &sections {
        for row in &section.rows {
            matches.push(vec![
                section.venue_name.clone(),
                row.match_number.to_string(),
                row.kickoff_time.clone(),
                row.home_team_name.clone(),
                row.away_team_name.clone(),
                row.score_half1.clone(),
                row.score_half2.clone(),
                row.score_total.clone(),
                row.score_pk.clone().unwrap_or_default(),
            ]);
            for goal in &row.goals {
                goals.push(vec![
                    section.venue_name.clone(),
                    row.match_number.to_string(),
                    goal.display_text.clone(),
                ]);
            }
        }
    }
    Ok(DailyReportSheets { matches, goals })
}

pub fn daily_report_excel(
    store: &TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
) -> Result<Vec<u8>, ReportError> {
    let sheets = daily_report_rows(store, tournament_id, target_date, venue_id)?;

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Matches")?;
        write_rows(sheet, &sheets.matches)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Goals")?;
        write_rows(sheet, &sheets.goals)?;
    }
    log::info!(
        "daily report excel: tournament {} date {} ({} match rows)",
        tournament_id,
        target_date,
        sheets.matches.len() - 1
    );
    Ok(workbook.save_to_buffer()?)
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<(), XlsxError> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet.write_string(row_idx as u32, col_idx as u16, value)?;
        }
    }
    Ok(())
}
