//! Report data aggregation: scope filtering, canonical ordering, and the
//! report-shaped views handed to the formatters and renderers.
//!
//! Matches are always ordered by (venue_id, match_order): venue sections in
//! venue-creation order, matches within a venue in kickoff order. Training
//! matches never leave this module.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{
    Goal, Match, MatchId, MatchStage, MatchStatus, ReportRecipient, Standing, Team, TeamId,
    Tournament, TournamentId, Venue, VenueId,
};
use crate::report::formatter::{self, MatchReportRow};
use crate::report::ReportError;
use crate::store::TournamentStore;

/// Everything the daily report envelope carries.
#[derive(Clone, Debug, Serialize)]
pub struct ReportData {
    pub tournament: Tournament,
    pub date: String,
    pub venue: Option<Venue>,
    pub matches: Vec<MatchDetail>,
    pub recipients: Vec<ReportRecipient>,
    pub generated_at: String,
    pub generated_by: String,
}

/// One match with its display relations joined in.
#[derive(Clone, Debug, Serialize)]
pub struct MatchDetail {
    pub id: MatchId,
    pub venue_id: VenueId,
    pub venue_name: String,
    pub group_id: Option<String>,
    pub match_date: NaiveDate,
    pub match_time: chrono::NaiveTime,
    pub match_order: i32,
    pub stage: MatchStage,
    pub status: MatchStatus,
    pub home_team: TeamSummary,
    pub away_team: TeamSummary,
    pub home_score_half1: Option<i32>,
    pub home_score_half2: Option<i32>,
    pub away_score_half1: Option<i32>,
    pub away_score_half2: Option<i32>,
    pub has_penalty_shootout: bool,
    pub home_pk: Option<i32>,
    pub away_pk: Option<i32>,
    pub goals: Vec<Goal>,
}

/// Team fields needed by report consumers.
#[derive(Clone, Debug, Serialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
    pub short_name: String,
}

impl TeamSummary {
    fn from_team(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            short_name: team.short_name.clone(),
        }
    }
}

/// Completed matches of one venue, formatted, in kickoff order.
#[derive(Clone, Debug)]
pub struct VenueSection {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub rows: Vec<MatchReportRow>,
}

/// Completed knockout matches, split by bracket role.
#[derive(Clone, Debug)]
pub struct FinalsBracket<'a> {
    pub semifinals: Vec<&'a Match>,
    pub third_place: Option<&'a Match>,
    pub final_match: Option<&'a Match>,
}

/// Dashboard statistics for one tournament.
#[derive(Clone, Debug, Serialize)]
pub struct TournamentSummary {
    pub tournament_id: TournamentId,
    pub tournament_name: String,
    pub team_count: usize,
    pub total_matches: usize,
    pub completed_matches: usize,
    pub completion_rate: f64,
    pub stage_counts: BTreeMap<String, usize>,
    pub total_goals: usize,
}

fn require_tournament<'a>(
    store: &'a TournamentStore,
    tournament_id: TournamentId,
) -> Result<&'a Tournament, ReportError> {
    store
        .tournament(tournament_id)
        .ok_or(ReportError::TournamentNotFound(tournament_id))
}

/// Team record for a referenced id, with a placeholder when the reference
/// dangles so a report never aborts over one missing row.
fn team_or_placeholder(store: &TournamentStore, id: TeamId) -> Team {
    store.team(id).cloned().unwrap_or_else(|| Team {
        id,
        tournament_id: 0,
        name: "Unknown".to_string(),
        short_name: String::new(),
    })
}

pub(crate) fn venue_name_or_key(store: &TournamentStore, id: VenueId) -> String {
    store
        .venue(id)
        .map(|v| v.name.clone())
        .unwrap_or_else(|| format!("会場{}", id))
}

/// Matches in a report scope: tournament + date, training excluded, venue
/// filter applied when given, canonical order. Empty scopes come back as
/// empty vectors, not errors.
pub fn report_matches<'a>(
    store: &'a TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
) -> Result<Vec<&'a Match>, ReportError> {
    require_tournament(store, tournament_id)?;
    let mut matches: Vec<&Match> = store
        .matches()
        .iter()
        .filter(|m| {
            m.tournament_id == tournament_id
                && m.match_date == target_date
                && m.stage != MatchStage::Training
                && venue_id.map_or(true, |v| m.venue_id == v)
        })
        .collect();
    matches.sort_by_key(|m| (m.venue_id, m.match_order));
    Ok(matches)
}

/// Like [`report_matches`], restricted to completed matches — the scope of
/// every score report.
pub fn completed_report_matches<'a>(
    store: &'a TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
) -> Result<Vec<&'a Match>, ReportError> {
    let matches = report_matches(store, tournament_id, target_date, venue_id)?;
    Ok(matches.into_iter().filter(|m| m.is_completed()).collect())
}

/// Standings rows for a tournament, optionally narrowed to one group,
/// ordered by (group_id, rank). The caller decides whether an empty set is
/// an error (the standings PDF treats it as one).
pub fn standings_scope<'a>(
    store: &'a TournamentStore,
    tournament_id: TournamentId,
    group_id: Option<&str>,
) -> Result<Vec<&'a Standing>, ReportError> {
    require_tournament(store, tournament_id)?;
    let mut standings: Vec<&Standing> = store
        .standings()
        .iter()
        .filter(|s| {
            s.tournament_id == tournament_id && group_id.map_or(true, |g| s.group_id == g)
        })
        .collect();
    standings.sort_by(|a, b| (&a.group_id, a.rank).cmp(&(&b.group_id, b.rank)));
    Ok(standings)
}

fn goal_pairs<'a>(store: &'a TournamentStore, match_id: MatchId) -> Vec<(&'a Goal, Team)> {
    store
        .goals_for_match(match_id)
        .into_iter()
        .map(|g| (g, team_or_placeholder(store, g.team_id)))
        .collect()
}

fn row_for_match(store: &TournamentStore, m: &Match) -> MatchReportRow {
    let home = team_or_placeholder(store, m.home_team_id);
    let away = team_or_placeholder(store, m.away_team_id);
    let pairs = goal_pairs(store, m.id);
    let borrowed: Vec<(&Goal, &Team)> = pairs.iter().map(|(g, t)| (*g, t)).collect();
    formatter::match_report_row(m, &home, &away, &borrowed)
}

/// Formatted rows for `/match-reports`: completed, non-training matches of
/// the scope, flat, in canonical order.
pub fn match_reports(
    store: &TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
) -> Result<Vec<MatchReportRow>, ReportError> {
    let matches = completed_report_matches(store, tournament_id, target_date, venue_id)?;
    Ok(matches.iter().map(|m| row_for_match(store, m)).collect())
}

/// Formatted rows grouped per venue, ready for the document renderers.
/// Both exporters consume this, which is what keeps their content equal.
pub fn venue_sections(
    store: &TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
) -> Result<Vec<VenueSection>, ReportError> {
    let matches = completed_report_matches(store, tournament_id, target_date, venue_id)?;
    let mut sections: Vec<VenueSection> = Vec::new();
    for m in matches {
        let row = row_for_match(store, m);
        match sections.last_mut() {
            Some(section) if section.venue_id == m.venue_id => section.rows.push(row),
            _ => sections.push(VenueSection {
                venue_id: m.venue_id,
                venue_name: venue_name_or_key(store, m.venue_id),
                rows: vec![row],
            }),
        }
    }
    Ok(sections)
}

fn detail_for_match(store: &TournamentStore, m: &Match) -> MatchDetail {
    MatchDetail {
        id: m.id,
        venue_id: m.venue_id,
        venue_name: venue_name_or_key(store, m.venue_id),
        group_id: m.group_id.clone(),
        match_date: m.match_date,
        match_time: m.match_time,
        match_order: m.match_order,
        stage: m.stage,
        status: m.status,
        home_team: TeamSummary::from_team(&team_or_placeholder(store, m.home_team_id)),
        away_team: TeamSummary::from_team(&team_or_placeholder(store, m.away_team_id)),
        home_score_half1: m.home_score_half1,
        home_score_half2: m.home_score_half2,
        away_score_half1: m.away_score_half1,
        away_score_half2: m.away_score_half2,
        has_penalty_shootout: m.has_penalty_shootout,
        home_pk: m.home_pk,
        away_pk: m.away_pk,
        goals: store.goals_for_match(m.id).into_iter().cloned().collect(),
    }
}

/// The `/reports/data` envelope: scope matches with relations joined,
/// recipients, and the generation stamp.
pub fn report_data(
    store: &TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
) -> Result<ReportData, ReportError> {
    let tournament = require_tournament(store, tournament_id)?.clone();
    let matches = report_matches(store, tournament_id, target_date, venue_id)?;
    let details = matches.iter().map(|m| detail_for_match(store, m)).collect();
    let venue = venue_id.and_then(|id| store.venue(id)).cloned();
    let recipients = store
        .recipients_for(tournament_id)
        .into_iter()
        .cloned()
        .collect();
    let generated_by = tournament.footer_organization().to_string();
    Ok(ReportData {
        tournament,
        date: target_date.format("%Y-%m-%d").to_string(),
        venue,
        matches: details,
        recipients,
        generated_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        generated_by,
    })
}

/// Final-day scope: matches on the target date that are part of the
/// knockout bracket or played at a finals venue. Errors when the scope is
/// empty — there is no final day to print.
pub fn final_day_matches<'a>(
    store: &'a TournamentStore,
    tournament_id: TournamentId,
    target_date: NaiveDate,
) -> Result<Vec<&'a Match>, ReportError> {
    require_tournament(store, tournament_id)?;
    let mut matches: Vec<&Match> = store
        .matches()
        .iter()
        .filter(|m| {
            m.tournament_id == tournament_id
                && m.match_date == target_date
                && m.stage != MatchStage::Training
                && (m.stage.is_finals_stage()
                    || store.venue(m.venue_id).is_some_and(|v| v.is_finals_venue))
        })
        .collect();
    if matches.is_empty() {
        return Err(ReportError::FinalDayNotFound(target_date));
    }
    matches.sort_by_key(|m| (m.venue_id, m.match_order));
    Ok(matches)
}

/// Completed knockout matches split by bracket role; errors when there are
/// none to report on.
pub fn finals_bracket(
    store: &TournamentStore,
    tournament_id: TournamentId,
) -> Result<FinalsBracket<'_>, ReportError> {
    require_tournament(store, tournament_id)?;
    let mut semifinals: Vec<&Match> = Vec::new();
    let mut third_place: Option<&Match> = None;
    let mut final_match: Option<&Match> = None;
    for m in store.matches() {
        if m.tournament_id != tournament_id || !m.is_completed() {
            continue;
        }
        match m.stage {
            MatchStage::Semifinal => semifinals.push(m),
            MatchStage::ThirdPlace => third_place = Some(m),
            MatchStage::Final => final_match = Some(m),
            _ => {}
        }
    }
    if semifinals.is_empty() && third_place.is_none() && final_match.is_none() {
        return Err(ReportError::FinalsNotFound);
    }
    semifinals.sort_by_key(|m| m.match_order);
    Ok(FinalsBracket {
        semifinals,
        third_place,
        final_match,
    })
}

/// Dashboard statistics: team and match counts, per-stage breakdown (zero
/// counts omitted), completion rate as a percentage with one decimal.
pub fn tournament_summary(
    store: &TournamentStore,
    tournament_id: TournamentId,
) -> Result<TournamentSummary, ReportError> {
    let tournament = require_tournament(store, tournament_id)?;
    let team_count = store
        .teams()
        .iter()
        .filter(|t| t.tournament_id == tournament_id)
        .count();
    let matches: Vec<&Match> = store
        .matches()
        .iter()
        .filter(|m| m.tournament_id == tournament_id)
        .collect();
    let completed = matches.iter().filter(|m| m.is_completed()).count();
    let mut stage_counts: BTreeMap<String, usize> = BTreeMap::new();
    for m in &matches {
        *stage_counts.entry(m.stage.as_str().to_string()).or_insert(0) += 1;
    }
    let match_ids: Vec<MatchId> = matches.iter().map(|m| m.id).collect();
    let total_goals = store
        .goals()
        .iter()
        .filter(|g| match_ids.contains(&g.match_id))
        .count();
    let completion_rate = if matches.is_empty() {
        0.0
    } else {
        (completed as f64 / matches.len() as f64 * 1000.0).round() / 10.0
    };
    Ok(TournamentSummary {
        tournament_id,
        tournament_name: tournament.name.clone(),
        team_count,
        total_matches: matches.len(),
        completed_matches: completed,
        completion_rate,
        stage_counts,
        total_goals,
    })
}
