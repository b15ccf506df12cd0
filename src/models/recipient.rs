//! Report recipient data structure.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a report recipient.
pub type RecipientId = i64;

/// A destination the daily report is sent to (newspaper, TV station,
/// federation). Independent of match data; rendered on document covers.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReportRecipient {
    pub id: RecipientId,
    pub tournament_id: TournamentId,
    pub name: String,
    #[serde(default)]
    pub notes: String,
}
