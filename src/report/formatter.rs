//! Match report formatting: pure mapping of match + goal records into the
//! display rows the documents are built from. No store access here, so the
//! whole module is testable on synthetic records.

use crate::models::{Goal, Match, MatchSide, Team};
use serde::Serialize;

/// One formatted scoring event, in display order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GoalLine {
    pub half: u8,
    pub minute: i32,
    pub team_name: String,
    pub player_name: String,
    /// Full line as rendered: `前半12分 浦和南ジュニア 田中(PK)`.
    pub display_text: String,
}

/// One match shaped for report output: score strings composed, team names
/// resolved, goals ordered.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchReportRow {
    pub match_number: i32,
    /// Kickoff as `HH:MM`.
    pub kickoff_time: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub score_half1: String,
    pub score_half2: String,
    pub score_total: String,
    /// Present exactly when the match went to a shootout.
    pub score_pk: Option<String>,
    pub goals: Vec<GoalLine>,
}

fn score_pair(home: i32, away: i32) -> String {
    format!("{}-{}", home, away)
}

fn half_label(half: u8) -> &'static str {
    if half == 1 {
        "前半"
    } else {
        "後半"
    }
}

/// Format one scoring event. Goal lines always carry the scoring team's
/// full name; the abbreviated display name is only used in match rows.
pub fn goal_line(goal: &Goal, team_name: &str) -> GoalLine {
    let mut display = format!(
        "{}{}分 {} {}",
        half_label(goal.half),
        goal.minute,
        team_name,
        goal.player_name
    );
    if goal.is_own_goal {
        display.push_str("(OG)");
    }
    if goal.is_penalty {
        display.push_str("(PK)");
    }
    GoalLine {
        half: goal.half,
        minute: goal.minute,
        team_name: team_name.to_string(),
        player_name: goal.player_name.clone(),
        display_text: display,
    }
}

/// Shape one match and its goals into a report row.
///
/// Half scores default to 0 before summation, so a half that was never
/// entered renders as 0 rather than poisoning the total. The goal slice
/// may arrive in any order; it is sorted by (half, minute) here.
pub fn match_report_row(
    m: &Match,
    home: &Team,
    away: &Team,
    goals: &[(&Goal, &Team)],
) -> MatchReportRow {
    let h1 = m.home_score_half1.unwrap_or(0);
    let h2 = m.home_score_half2.unwrap_or(0);
    let a1 = m.away_score_half1.unwrap_or(0);
    let a2 = m.away_score_half2.unwrap_or(0);

    let score_pk = if m.has_penalty_shootout {
        Some(score_pair(m.home_pk.unwrap_or(0), m.away_pk.unwrap_or(0)))
    } else {
        None
    };

    let mut ordered: Vec<&(&Goal, &Team)> = goals.iter().collect();
    ordered.sort_by_key(|(g, _)| (g.half, g.minute));
    let goal_lines = ordered
        .into_iter()
        .map(|(g, team)| goal_line(g, &team.name))
        .collect();

    MatchReportRow {
        match_number: m.match_order,
        kickoff_time: m.match_time.format("%H:%M").to_string(),
        home_team_name: home.display_name().to_string(),
        away_team_name: away.display_name().to_string(),
        score_half1: score_pair(h1, a1),
        score_half2: score_pair(h2, a2),
        score_total: score_pair(h1 + h2, a1 + a2),
        score_pk,
        goals: goal_lines,
    }
}

/// Winner of a knockout match: full-time totals first, shootout score as
/// the tie-breaker. None when the scores decide nothing.
pub fn winning_side(m: &Match) -> Option<MatchSide> {
    let (home, away) = (m.home_total(), m.away_total());
    if home != away {
        return Some(if home > away {
            MatchSide::Home
        } else {
            MatchSide::Away
        });
    }
    if m.has_penalty_shootout {
        let (hp, ap) = (m.home_pk.unwrap_or(0), m.away_pk.unwrap_or(0));
        if hp != ap {
            return Some(if hp > ap {
                MatchSide::Home
            } else {
                MatchSide::Away
            });
        }
    }
    None
}
