//! Qualifying-group standings and the group records they hang off.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// A qualifying group. The id is a short string key ("A", "B", ...);
/// standings reference it and fall back to the raw key when no Group row
/// exists for it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub tournament_id: TournamentId,
    pub name: String,
}

/// One team's computed rank within its group. Computed elsewhere; this
/// engine renders standings rows as-is.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub tournament_id: TournamentId,
    pub group_id: String,
    pub team_id: TeamId,
    pub rank: i32,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
}
