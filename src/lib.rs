//! Tournament report engine: library with models, the in-memory store, and
//! the report generation modules.

pub mod models;
pub mod report;
pub mod store;

pub use models::{
    Goal, GoalId, Group, Match, MatchId, MatchSide, MatchStage, MatchStatus, RecipientId,
    ReportRecipient, SenderSettings, SenderSettingsUpdate, Standing, Team, TeamId, Tournament,
    TournamentId, Venue, VenueId, DEFAULT_SENDER_ORGANIZATION,
};
pub use report::ReportError;
pub use store::{StoreSnapshot, TournamentStore};
