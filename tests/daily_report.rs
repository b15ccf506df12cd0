//! Tests for the daily report exports: PDF page content, Excel sheet
//! content, and the parity between the two.

use chrono::{NaiveDate, NaiveTime};
use tournament_reports_web::report::excel::{daily_report_excel, daily_report_rows};
use tournament_reports_web::report::fonts::resolve_from_candidates;
use tournament_reports_web::report::layout::ReportPage;
use tournament_reports_web::report::pdf::{daily_report_pages, daily_report_pdf};
use tournament_reports_web::{
    Goal, Match, MatchStage, MatchStatus, Team, Tournament, TournamentStore, Venue,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn time(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, min, 0).unwrap()
}

fn any_text_contains(pages: &[ReportPage], needle: &str) -> bool {
    pages
        .iter()
        .flat_map(|p| p.texts())
        .any(|t| t.contains(needle))
}

fn seeded() -> (TournamentStore, i64, i64) {
    let mut store = TournamentStore::new();
    let tid = store.add_tournament(Tournament::new("浦和カップ2026"));
    let v1 = store.add_venue(Venue::new(tid, "駒場スタジアム", false));
    let v2 = store.add_venue(Venue::new(tid, "レッズランド", true));
    let home = store.add_team(Team::new(tid, "浦和レッズジュニア", "浦和R"));
    let away = store.add_team(Team::new(tid, "大宮アルディージャ", "大宮"));

    // Completed qualifier with goals at the first venue.
    let mut m = Match::new(tid, v1, home, away, day(27), time(10, 30), 1, MatchStage::Qualifying);
    m.status = MatchStatus::Completed;
    m.home_score_half1 = Some(2);
    m.home_score_half2 = Some(1);
    m.away_score_half1 = Some(0);
    m.away_score_half2 = Some(1);
    let mid = store.add_match(m);
    store.add_goal(Goal::new(mid, home, 1, 12, "田中太郎"));

    // Still scheduled: must not show up in results.
    let m = Match::new(tid, v1, away, home, day(27), time(11, 30), 2, MatchStage::Qualifying);
    store.add_match(m);

    // Completed shootout match at the second venue.
    let mut m = Match::new(tid, v2, away, home, day(27), time(9, 0), 1, MatchStage::Semifinal);
    m.status = MatchStatus::Completed;
    m.home_score_half1 = Some(1);
    m.home_score_half2 = Some(0);
    m.away_score_half1 = Some(0);
    m.away_score_half2 = Some(1);
    m.has_penalty_shootout = true;
    m.home_pk = Some(4);
    m.away_pk = Some(3);
    store.add_match(m);

    // Training matches stay out of every report.
    let mut m = Match::new(tid, v1, home, away, day(27), time(13, 0), 3, MatchStage::Training);
    m.status = MatchStatus::Completed;
    m.home_score_half1 = Some(9);
    m.home_score_half2 = Some(0);
    m.away_score_half1 = Some(0);
    m.away_score_half2 = Some(0);
    store.add_match(m);

    store.add_recipient(tid, "埼玉新聞", "スポーツ部");
    (store, tid, v1)
}

#[test]
fn pdf_pages_carry_cover_results_and_goal_lines() {
    let (store, tid, _) = seeded();
    let pages = daily_report_pages(&store, tid, day(27), None).unwrap();

    assert!(any_text_contains(&pages, "浦和カップ2026 試合結果報告書"));
    assert!(any_text_contains(&pages, "開催日: 2026年03月27日"));
    assert!(any_text_contains(&pages, "送付先: 埼玉新聞 スポーツ部"));
    assert!(any_text_contains(&pages, "【駒場スタジアム】"));
    assert!(any_text_contains(&pages, "【レッズランド】"));

    // Scores of the completed qualifier.
    assert!(any_text_contains(&pages, "10:30"));
    assert!(any_text_contains(&pages, "浦和R"));
    assert!(any_text_contains(&pages, "2-0"));
    assert!(any_text_contains(&pages, "3-1"));
    assert!(any_text_contains(&pages, "前半12分 浦和レッズジュニア 田中太郎"));
    // Shootout score of the semifinal.
    assert!(any_text_contains(&pages, "4-3"));
    // Footer from the sender identity default.
    assert!(any_text_contains(&pages, "浦和カップ運営事務局"));

    // Scheduled and training matches leave no trace.
    assert!(!any_text_contains(&pages, "11:30"));
    assert!(!any_text_contains(&pages, "9-0"));
}

#[test]
fn pdf_venue_filter_limits_sections_and_names_the_venue() {
    let (store, tid, v1) = seeded();
    let pages = daily_report_pages(&store, tid, day(27), Some(v1)).unwrap();

    assert!(any_text_contains(&pages, "会場: 駒場スタジアム"));
    assert!(any_text_contains(&pages, "【駒場スタジアム】"));
    assert!(!any_text_contains(&pages, "【レッズランド】"));
}

#[test]
fn empty_scope_still_renders_the_cover_page() {
    let (store, tid, _) = seeded();
    let pages = daily_report_pages(&store, tid, day(20), None).unwrap();

    assert_eq!(pages.len(), 1);
    assert!(any_text_contains(&pages, "試合結果報告書"));
    assert!(any_text_contains(&pages, "浦和カップ運営事務局"));
    assert!(!any_text_contains(&pages, "【"));
}

#[test]
fn excel_rows_mirror_the_report_scope() {
    let (store, tid, _) = seeded();
    let sheets = daily_report_rows(&store, tid, day(27), None).unwrap();

    // Header plus the two completed matches.
    assert_eq!(sheets.matches.len(), 3);
    assert_eq!(sheets.matches[0][0], "会場");
    assert_eq!(
        sheets.matches[1],
        vec!["駒場スタジアム", "1", "10:30", "浦和R", "大宮", "2-0", "1-1", "3-1", ""]
    );
    assert_eq!(sheets.matches[2][0], "レッズランド");
    assert_eq!(sheets.matches[2][8], "4-3");

    assert_eq!(sheets.goals.len(), 2);
    assert_eq!(
        sheets.goals[1],
        vec!["駒場スタジアム", "1", "前半12分 浦和レッズジュニア 田中太郎"]
    );
}

#[test]
fn excel_of_empty_scope_is_headers_only() {
    let (store, tid, _) = seeded();
    let sheets = daily_report_rows(&store, tid, day(20), None).unwrap();
    assert_eq!(sheets.matches.len(), 1);
    assert_eq!(sheets.goals.len(), 1);
}

#[test]
fn pdf_and_excel_agree_on_every_cell() {
    let (store, tid, _) = seeded();
    let pages = daily_report_pages(&store, tid, day(27), None).unwrap();
    let sheets = daily_report_rows(&store, tid, day(27), None).unwrap();

    let cells = sheets
        .matches
        .iter()
        .skip(1)
        .chain(sheets.goals.iter().skip(1))
        .flatten()
        .filter(|cell| !cell.is_empty());
    for cell in cells {
        assert!(
            any_text_contains(&pages, cell),
            "cell {:?} missing from the PDF pages",
            cell
        );
    }
}

#[test]
fn pdf_bytes_start_with_the_pdf_magic() {
    let (store, tid, _) = seeded();
    let bytes = daily_report_pdf(&store, tid, day(27), None).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn excel_bytes_are_a_zip_container() {
    let (store, tid, _) = seeded();
    let bytes = daily_report_excel(&store, tid, day(27), None).unwrap();
    assert!(bytes.starts_with(b"PK\x03\x04"));
}

#[test]
fn missing_font_candidates_fall_back_to_builtin() {
    let font = resolve_from_candidates(&["/no/such/directory/font.ttf"]);
    assert!(!font.is_embedded());
}

#[test]
fn unparsable_font_file_falls_back_to_builtin() {
    let path = std::env::temp_dir().join("reports-not-a-font.ttf");
    std::fs::write(&path, b"not a font at all").unwrap();
    let font = resolve_from_candidates(std::slice::from_ref(&path));
    let _ = std::fs::remove_file(&path);
    assert!(!font.is_embedded());
}
