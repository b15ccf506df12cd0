//! In-memory tournament data store.
//!
//! Stands in for the persistence layer, which is owned elsewhere: match,
//! venue, team, goal and standing records are read-only inputs to the report
//! engine. The only rows mutated through this crate are report recipients
//! and the tournament sender identity. A whole store can be loaded from a
//! JSON snapshot (see `DATA_FILE` in the web binary).

use crate::models::{
    Goal, GoalId, Group, Match, MatchId, RecipientId, ReportRecipient, Standing, Team, TeamId,
    Tournament, TournamentId, Venue, VenueId,
};
use serde::{Deserialize, Serialize};

/// Serialized form of a complete store. Every section is optional so a
/// snapshot can carry only the record types it has.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub standings: Vec<Standing>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub recipients: Vec<ReportRecipient>,
}

/// All tournament records, held in memory for the lifetime of the process.
#[derive(Clone, Debug, Default)]
pub struct TournamentStore {
    tournaments: Vec<Tournament>,
    venues: Vec<Venue>,
    teams: Vec<Team>,
    matches: Vec<Match>,
    goals: Vec<Goal>,
    standings: Vec<Standing>,
    groups: Vec<Group>,
    recipients: Vec<ReportRecipient>,
}

fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

impl TournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            tournaments: snapshot.tournaments,
            venues: snapshot.venues,
            teams: snapshot.teams,
            matches: snapshot.matches,
            goals: snapshot.goals,
            standings: snapshot.standings,
            groups: snapshot.groups,
            recipients: snapshot.recipients,
        }
    }

    /// Parse a JSON snapshot into a store.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<StoreSnapshot>(json).map(Self::from_snapshot)
    }

    // ----- lookups -----

    pub fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    pub fn tournament_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.tournaments.iter_mut().find(|t| t.id == id)
    }

    pub fn venue(&self, id: VenueId) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Goals of one match in display order (half, then minute).
    pub fn goals_for_match(&self, match_id: MatchId) -> Vec<&Goal> {
        let mut goals: Vec<&Goal> = self
            .goals
            .iter()
            .filter(|g| g.match_id == match_id)
            .collect();
        goals.sort_by_key(|g| (g.half, g.minute));
        goals
    }

    pub fn recipients_for(&self, tournament_id: TournamentId) -> Vec<&ReportRecipient> {
        self.recipients
            .iter()
            .filter(|r| r.tournament_id == tournament_id)
            .collect()
    }

    pub fn recipient_exists(&self, tournament_id: TournamentId, name: &str) -> bool {
        self.recipients
            .iter()
            .any(|r| r.tournament_id == tournament_id && r.name == name)
    }

    // ----- inserts (ids assigned here, ascending in creation order) -----

    pub fn add_tournament(&mut self, mut tournament: Tournament) -> TournamentId {
        tournament.id = next_id(&self.tournaments, |t| t.id);
        let id = tournament.id;
        self.tournaments.push(tournament);
        id
    }

    pub fn add_venue(&mut self, mut venue: Venue) -> VenueId {
        venue.id = next_id(&self.venues, |v| v.id);
        let id = venue.id;
        self.venues.push(venue);
        id
    }

    pub fn add_team(&mut self, mut team: Team) -> TeamId {
        team.id = next_id(&self.teams, |t| t.id);
        let id = team.id;
        self.teams.push(team);
        id
    }

    pub fn add_match(&mut self, mut m: Match) -> MatchId {
        m.id = next_id(&self.matches, |m| m.id);
        let id = m.id;
        self.matches.push(m);
        id
    }

    pub fn add_goal(&mut self, mut goal: Goal) -> GoalId {
        goal.id = next_id(&self.goals, |g| g.id);
        let id = goal.id;
        self.goals.push(goal);
        id
    }

    pub fn add_standing(&mut self, standing: Standing) {
        self.standings.push(standing);
    }

    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    // ----- recipient mutations (the registry's write path) -----

    pub fn add_recipient(
        &mut self,
        tournament_id: TournamentId,
        name: impl Into<String>,
        notes: impl Into<String>,
    ) -> ReportRecipient {
        let recipient = ReportRecipient {
            id: next_id(&self.recipients, |r| r.id),
            tournament_id,
            name: name.into(),
            notes: notes.into(),
        };
        self.recipients.push(recipient.clone());
        recipient
    }

    /// Remove a recipient by id. Returns false when no such row exists.
    pub fn remove_recipient(&mut self, id: RecipientId) -> bool {
        let before = self.recipients.len();
        self.recipients.retain(|r| r.id != id);
        self.recipients.len() != before
    }
}
