//! Team data structure.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a team.
pub type TeamId = i64;

/// A participating team. `short_name` is the abbreviated form used where
/// column space is tight; it may be empty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

impl Team {
    pub fn new(
        tournament_id: TournamentId,
        name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            tournament_id,
            name: name.into(),
            short_name: short_name.into(),
        }
    }

    /// Name used in report rows: the short name when present, else the full name.
    pub fn display_name(&self) -> &str {
        if self.short_name.is_empty() {
            &self.name
        } else {
            &self.short_name
        }
    }
}
