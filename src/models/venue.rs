//! Venue data structure.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a venue. Ids ascend in creation order, which is
/// what puts venue sections of a report in the order venues were created.
pub type VenueId = i64;

/// A match venue. `is_finals_venue` marks the ground hosting the final day.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub tournament_id: TournamentId,
    pub name: String,
    #[serde(default)]
    pub is_finals_venue: bool,
}

impl Venue {
    pub fn new(tournament_id: TournamentId, name: impl Into<String>, is_finals_venue: bool) -> Self {
        Self {
            id: 0,
            tournament_id,
            name: name.into(),
            is_finals_venue,
        }
    }
}
