//! Data structures for the tournament: venues, teams, matches, goals, standings, report recipients.

mod goal;
mod matches;
mod recipient;
mod standing;
mod team;
mod tournament;
mod venue;

pub use goal::{Goal, GoalId};
pub use matches::{Match, MatchId, MatchSide, MatchStage, MatchStatus};
pub use recipient::{RecipientId, ReportRecipient};
pub use standing::{Group, Standing};
pub use team::{Team, TeamId};
pub use tournament::{
    SenderSettings, SenderSettingsUpdate, Tournament, TournamentId, DEFAULT_SENDER_ORGANIZATION,
};
pub use venue::{Venue, VenueId};
