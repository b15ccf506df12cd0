//! Goal data structure.

use crate::models::matches::MatchId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a goal.
pub type GoalId = i64;

/// A scoring event. `half` is 1 or 2; `minute` counts within the half.
/// Display order is (half, minute) ascending.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub match_id: MatchId,
    /// Team credited with the goal (for an own goal, the team that benefits).
    pub team_id: TeamId,
    pub half: u8,
    pub minute: i32,
    pub player_name: String,
    #[serde(default)]
    pub is_own_goal: bool,
    #[serde(default)]
    pub is_penalty: bool,
}

impl Goal {
    pub fn new(
        match_id: MatchId,
        team_id: TeamId,
        half: u8,
        minute: i32,
        player_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            match_id,
            team_id,
            half,
            minute,
            player_name: player_name.into(),
            is_own_goal: false,
            is_penalty: false,
        }
    }
}
