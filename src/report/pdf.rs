//! The four PDF documents: daily match report, final-day schedule, final
//! result report, and group standings.
//!
//! Each builder produces layout pages first and a thin wrapper renders them
//! to bytes. Tests work against the pages; the HTTP layer serves the bytes.

use std::io::Cursor;

use chrono::NaiveDate;
use printpdf::{BuiltinFont, Line, Mm, PdfDocument, Point};

use crate::models::{Match, MatchSide, TeamId, Tournament, TournamentId, VenueId};
use crate::report::aggregator::{self, FinalsBracket};
use crate::report::fonts::{self, DocumentFont};
use crate::report::formatter::{self, MatchReportRow};
use crate::report::layout::{
    self, ColumnSpec, DrawOp, PageComposer, ReportPage, TableGroup, TableRow,
};
use crate::report::ReportError;
use crate::store::TournamentStore;

fn require_tournament<'a>(
    store: &'a TournamentStore,
    tournament_id: TournamentId,
) -> Result<&'a Tournament, ReportError> {
    store
        .tournament(tournament_id)
        .ok_or(ReportError::TournamentNotFound(tournament_id))
}

fn team_display(store: &TournamentStore, id: TeamId) -> String {
    store
        .team(id)
        .map(|t| t.display_name().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn date_jp(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}

fn daily_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("No", 30.0),
        ColumnSpec::new("時刻", 40.0),
        ColumnSpec::clipped("ホーム", 55.0, 10),
        ColumnSpec::clipped("アウェイ", 95.0, 10),
        ColumnSpec::new("前半", 135.0),
        ColumnSpec::new("後半", 150.0),
        ColumnSpec::new("合計", 165.0),
        ColumnSpec::new("PK", 180.0),
    ]
}

fn daily_row(row: &MatchReportRow) -> TableRow {
    TableRow {
        cells: vec![
            row.match_number.to_string(),
            row.kickoff_time.clone(),
            row.home_team_name.clone(),
            row.away_team_name.clone(),
            row.score_half1.clone(),
            row.score_half2.clone(),
            row.score_total.clone(),
            row.score_pk.clone().unwrap_or_default(),
        ],
        sub_lines: row.goals.iter().map(|g| g.display_text.clone()).collect(),
    }
}

/// Daily match report: cover lines, then one table group per venue with
/// completed results and goal detail lines. A scope with no completed
/// matches still yields the cover page.
pub fn daily_report_pages(
    store: &TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
) -> Result<Vec<ReportPage>, ReportError> {
    let tournament = require_tournament(store, tournament_id)?;
    let sections = aggregator::venue_sections(store, tournament_id, target_date, venue_id)?;

    let mut composer = PageComposer::new(tournament.footer_organization());
    composer.title(&format!("{} 試合結果報告書", tournament.name));
    composer.subtitle(&format!("開催日: {}", date_jp(target_date)));
    if let Some(venue) = venue_id.and_then(|id| store.venue(id)) {
        composer.subtitle(&format!("会場: {}", venue.name));
    }
    for recipient in store.recipients_for(tournament_id) {
        let line = if recipient.notes.is_empty() {
            format!("送付先: {}", recipient.name)
        } else {
            format!("送付先: {} {}", recipient.name, recipient.notes)
        };
        composer.subtitle(&line);
    }

    let groups: Vec<TableGroup> = sections
        .iter()
        .map(|section| TableGroup {
            title: format!("【{}】", section.venue_name),
            rows: section.rows.iter().map(daily_row).collect(),
        })
        .collect();
    layout::render_groups(&mut composer, &daily_columns(), &groups);
    Ok(composer.finish())
}

pub fn daily_report_pdf(
    store: &TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
) -> Result<Vec<u8>, ReportError> {
    let pages = daily_report_pages(store, tournament_id, target_date, venue_id)?;
    log::info!(
        "daily report pdf: tournament {} date {} ({} pages)",
        tournament_id,
        target_date,
        pages.len()
    );
    render_pdf("試合結果報告書", &pages)
}

fn schedule_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("No", 30.0),
        ColumnSpec::new("時刻", 45.0),
        ColumnSpec::new("ステージ", 65.0),
        ColumnSpec::clipped("ホーム", 100.0, 12),
        ColumnSpec::clipped("アウェイ", 145.0, 12),
    ]
}

/// Final-day fixture table, grouped per venue. Includes every knockout or
/// finals-venue match of the day regardless of status.
pub fn final_day_schedule_pages(
    store: &TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
) -> Result<Vec<ReportPage>, ReportError> {
    let tournament = require_tournament(store, tournament_id)?;
    let matches = aggregator::final_day_matches(store, tournament_id, target_date)?;

    let mut composer = PageComposer::new(tournament.footer_organization());
    composer.title(&format!("{} 最終日組み合わせ表", tournament.name));
    composer.subtitle(&format!("開催日: {}", date_jp(target_date)));

    let mut groups: Vec<TableGroup> = Vec::new();
    let mut current_venue = None;
    for m in matches {
        let row = TableRow {
            cells: vec![
                m.match_order.to_string(),
                m.match_time.format("%H:%M").to_string(),
                m.stage.label().to_string(),
                team_display(store, m.home_team_id),
                team_display(store, m.away_team_id),
            ],
            sub_lines: Vec::new(),
        };
        if current_venue != Some(m.venue_id) {
            current_venue = Some(m.venue_id);
            groups.push(TableGroup {
                title: format!("【{}】", aggregator::venue_name_or_key(store, m.venue_id)),
                rows: Vec::new(),
            });
        }
        if let Some(group) = groups.last_mut() {
            group.rows.push(row);
        }
    }
    layout::render_groups(&mut composer, &schedule_columns(), &groups);
    Ok(composer.finish())
}

pub fn final_day_schedule_pdf(
    store: &TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
) -> Result<Vec<u8>, ReportError> {
    let pages = final_day_schedule_pages(store, tournament_id, target_date)?;
    log::info!(
        "final day schedule pdf: tournament {} date {} ({} pages)",
        tournament_id,
        target_date,
        pages.len()
    );
    render_pdf("最終日組み合わせ表", &pages)
}

fn result_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("ステージ", 30.0),
        ColumnSpec::clipped("ホーム", 60.0, 10),
        ColumnSpec::new("スコア", 100.0),
        ColumnSpec::clipped("アウェイ", 120.0, 10),
        ColumnSpec::new("PK", 165.0),
    ]
}

fn podium_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("順位", 30.0),
        ColumnSpec::clipped("チーム名", 60.0, 15),
    ]
}

fn result_row(store: &TournamentStore, label: String, m: &Match) -> TableRow {
    let pk = if m.has_penalty_shootout {
        format!("{}-{}", m.home_pk.unwrap_or(0), m.away_pk.unwrap_or(0))
    } else {
        String::new()
    };
    TableRow {
        cells: vec![
            label,
            team_display(store, m.home_team_id),
            format!("{}-{}", m.home_total(), m.away_total()),
            team_display(store, m.away_team_id),
            pk,
        ],
        sub_lines: Vec::new(),
    }
}

fn winner_loser(m: &Match) -> Option<(TeamId, TeamId)> {
    formatter::winning_side(m).map(|side| match side {
        MatchSide::Home => (m.home_team_id, m.away_team_id),
        MatchSide::Away => (m.away_team_id, m.home_team_id),
    })
}

/// Final result report: knockout results followed by the podium. Placings
/// that no completed match decides are left out.
pub fn final_result_pages(
    store: &TournamentStore,
    tournament_id: TournamentId,
) -> Result<Vec<ReportPage>, ReportError> {
    let tournament = require_tournament(store, tournament_id)?;
    let bracket = aggregator::finals_bracket(store, tournament_id)?;

    let mut composer = PageComposer::new(tournament.footer_organization());
    composer.title(&format!("{} 最終結果報告書", tournament.name));
    composer.subtitle(&format!(
        "作成日: {}",
        chrono::Local::now().format("%Y年%m月%d日")
    ));

    let mut rows: Vec<TableRow> = Vec::new();
    let many_semis = bracket.semifinals.len() > 1;
    for (index, m) in bracket.semifinals.iter().enumerate() {
        let label = if many_semis {
            format!("準決勝{}", index + 1)
        } else {
            "準決勝".to_string()
        };
        rows.push(result_row(store, label, m));
    }
    if let Some(m) = bracket.third_place {
        rows.push(result_row(store, "3位決定戦".to_string(), m));
    }
    if let Some(m) = bracket.final_match {
        rows.push(result_row(store, "決勝".to_string(), m));
    }
    let results = TableGroup {
        title: "【決勝トーナメント結果】".to_string(),
        rows,
    };
    layout::render_groups(&mut composer, &result_columns(), &[results]);

    let podium = podium_rows(store, &bracket);
    if !podium.is_empty() {
        composer.gap(layout::GROUP_GAP);
        let standings = TableGroup {
            title: "【最終順位】".to_string(),
            rows: podium,
        };
        layout::render_groups(&mut composer, &podium_columns(), &[standings]);
    }
    Ok(composer.finish())
}

fn podium_rows(store: &TournamentStore, bracket: &FinalsBracket<'_>) -> Vec<TableRow> {
    let mut rows = Vec::new();
    let mut push = |place: &str, team: TeamId| {
        rows.push(TableRow {
            cells: vec![place.to_string(), team_display(store, team)],
            sub_lines: Vec::new(),
        });
    };
    if let Some((winner, loser)) = bracket.final_match.and_then(winner_loser) {
        push("優勝", winner);
        push("準優勝", loser);
    }
    if let Some((winner, loser)) = bracket.third_place.and_then(winner_loser) {
        push("第3位", winner);
        push("第4位", loser);
    }
    rows
}

pub fn final_result_pdf(
    store: &TournamentStore,
    tournament_id: TournamentId,
) -> Result<Vec<u8>, ReportError> {
    let pages = final_result_pages(store, tournament_id)?;
    log::info!(
        "final result pdf: tournament {} ({} pages)",
        tournament_id,
        pages.len()
    );
    render_pdf("最終結果報告書", &pages)
}

fn standings_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("順位", 30.0),
        ColumnSpec::clipped("チーム名", 45.0, 15),
        ColumnSpec::new("試合", 100.0),
        ColumnSpec::new("勝", 115.0),
        ColumnSpec::new("分", 125.0),
        ColumnSpec::new("負", 135.0),
        ColumnSpec::new("得点", 145.0),
        ColumnSpec::new("失点", 160.0),
        ColumnSpec::new("得失点差", 175.0),
    ]
}

/// Group standings table, one group per table section. Errors when the
/// scope holds no standings rows at all.
pub fn group_standings_pages(
    store: &TournamentStore,
    tournament_id: TournamentId,
    group_id: Option<&str>,
) -> Result<Vec<ReportPage>, ReportError> {
    let tournament = require_tournament(store, tournament_id)?;
    let standings = aggregator::standings_scope(store, tournament_id, group_id)?;
    if standings.is_empty() {
        return Err(ReportError::StandingsNotFound);
    }

    let mut composer = PageComposer::new(tournament.footer_organization());
    composer.title(&format!("{} グループ順位表", tournament.name));

    let mut groups: Vec<TableGroup> = Vec::new();
    let mut current_group: Option<&str> = None;
    for standing in standings {
        if current_group != Some(standing.group_id.as_str()) {
            current_group = Some(standing.group_id.as_str());
            let name = store
                .group(&standing.group_id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| standing.group_id.clone());
            groups.push(TableGroup {
                title: format!("【{}】", name),
                rows: Vec::new(),
            });
        }
        let row = TableRow {
            cells: vec![
                standing.rank.to_string(),
                team_display(store, standing.team_id),
                standing.played.to_string(),
                standing.won.to_string(),
                standing.drawn.to_string(),
                standing.lost.to_string(),
                standing.goals_for.to_string(),
                standing.goals_against.to_string(),
                standing.goal_difference.to_string(),
            ],
            sub_lines: Vec::new(),
        };
        if let Some(group) = groups.last_mut() {
            group.rows.push(row);
        }
    }
    layout::render_groups(&mut composer, &standings_columns(), &groups);
    Ok(composer.finish())
}

pub fn group_standings_pdf(
    store: &TournamentStore,
    tournament_id: TournamentId,
    group_id: Option<&str>,
) -> Result<Vec<u8>, ReportError> {
    let pages = group_standings_pages(store, tournament_id, group_id)?;
    log::info!(
        "group standings pdf: tournament {} ({} pages)",
        tournament_id,
        pages.len()
    );
    render_pdf("グループ順位表", &pages)
}

/// Replays layout pages into an A4 PDF with the process-wide report font.
fn render_pdf(doc_title: &str, pages: &[ReportPage]) -> Result<Vec<u8>, ReportError> {
    let page_width = Mm(layout::PAGE_WIDTH.into());
    let page_height = Mm(layout::PAGE_HEIGHT.into());
    let (doc, first_page, first_layer) =
        PdfDocument::new(doc_title, page_width, page_height, "content");
    let font = match fonts::document_font() {
        DocumentFont::Embedded { data, .. } => {
            doc.add_external_font(Cursor::new(data.as_slice()))?
        }
        DocumentFont::Builtin => doc.add_builtin_font(BuiltinFont::Helvetica)?,
    };

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            let (page_index, layer_index) = doc.add_page(page_width, page_height, "content");
            layer = doc.get_page(page_index).get_layer(layer_index);
        }
        for op in &page.ops {
            match op {
                DrawOp::Text { x, y, size, text } => {
                    layer.use_text(
                        text.as_str(),
                        (*size).into(),
                        Mm((*x).into()),
                        Mm((*y).into()),
                        &font,
                    );
                }
                DrawOp::Rule { x1, y1, x2, y2 } => {
                    layer.set_outline_thickness(0.3);
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(Mm((*x1).into()), Mm((*y1).into())), false),
                            (Point::new(Mm((*x2).into()), Mm((*y2).into())), false),
                        ],
                        is_closed: false,
                    });
                }
            }
        }
    }
    Ok(doc.save_to_bytes()?)
}
