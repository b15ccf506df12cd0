//! Match data structures: stage, status, and the match record itself.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use crate::models::venue::VenueId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Unique identifier for a match.
pub type MatchId = i64;

/// Bracket role of a match. Training matches are exhibitions and never
/// appear in recipient-facing reports.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    Qualifying,
    Semifinal,
    ThirdPlace,
    Final,
    Training,
}

impl MatchStage {
    /// Wire value used as the key of per-stage count maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStage::Qualifying => "qualifying",
            MatchStage::Semifinal => "semifinal",
            MatchStage::ThirdPlace => "third_place",
            MatchStage::Final => "final",
            MatchStage::Training => "training",
        }
    }

    /// Heading text used in rendered documents.
    pub fn label(&self) -> &'static str {
        match self {
            MatchStage::Qualifying => "予選リーグ",
            MatchStage::Semifinal => "準決勝",
            MatchStage::ThirdPlace => "3位決定戦",
            MatchStage::Final => "決勝",
            MatchStage::Training => "研修試合",
        }
    }

    /// Whether the stage belongs to the final-day knockout bracket.
    pub fn is_finals_stage(&self) -> bool {
        matches!(
            self,
            MatchStage::Semifinal | MatchStage::ThirdPlace | MatchStage::Final
        )
    }
}

/// Whether a match has been played. Score reports only include completed matches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Completed,
}

/// Side of a match, used when deriving the winner of a knockout tie.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSide {
    Home,
    Away,
}

/// A single match with per-half scores and an optional penalty shootout.
/// Half scores are None until entered; score arithmetic treats missing
/// halves as 0.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub venue_id: VenueId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    /// Qualifying-group key; None for knockout and training matches.
    #[serde(default)]
    pub group_id: Option<String>,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    /// Position within the venue's daily schedule (kickoff order).
    pub match_order: i32,
    pub stage: MatchStage,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub home_score_half1: Option<i32>,
    #[serde(default)]
    pub home_score_half2: Option<i32>,
    #[serde(default)]
    pub away_score_half1: Option<i32>,
    #[serde(default)]
    pub away_score_half2: Option<i32>,
    #[serde(default)]
    pub has_penalty_shootout: bool,
    #[serde(default)]
    pub home_pk: Option<i32>,
    #[serde(default)]
    pub away_pk: Option<i32>,
}

impl Match {
    /// Create a scheduled match with no scores entered. The id is assigned
    /// by the store on insert.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tournament_id: TournamentId,
        venue_id: VenueId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        match_date: NaiveDate,
        match_time: NaiveTime,
        match_order: i32,
        stage: MatchStage,
    ) -> Self {
        Self {
            id: 0,
            tournament_id,
            venue_id,
            home_team_id,
            away_team_id,
            group_id: None,
            match_date,
            match_time,
            match_order,
            stage,
            status: MatchStatus::Scheduled,
            home_score_half1: None,
            home_score_half2: None,
            away_score_half1: None,
            away_score_half2: None,
            has_penalty_shootout: false,
            home_pk: None,
            away_pk: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Full-time home goals; missing half scores count as 0.
    pub fn home_total(&self) -> i32 {
        self.home_score_half1.unwrap_or(0) + self.home_score_half2.unwrap_or(0)
    }

    /// Full-time away goals; missing half scores count as 0.
    pub fn away_total(&self) -> i32 {
        self.away_score_half1.unwrap_or(0) + self.away_score_half2.unwrap_or(0)
    }
}
