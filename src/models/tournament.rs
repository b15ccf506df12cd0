//! Tournament and its report-sender identity.

use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for a tournament (store-assigned, ascending).
pub type TournamentId = i64;

/// Sender line stamped onto documents when a tournament has no explicit
/// sender organization configured.
pub const DEFAULT_SENDER_ORGANIZATION: &str = "浦和カップ運営事務局";

/// A tournament. The sender_* fields form the identity block printed on
/// outgoing report documents; all three are optional.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub sender_organization: Option<String>,
    pub sender_name: Option<String>,
    pub sender_contact: Option<String>,
}

impl Tournament {
    /// Create a tournament with no sender identity configured. The id is
    /// assigned by the store on insert.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            sender_organization: None,
            sender_name: None,
            sender_contact: None,
        }
    }

    /// Organization line for page footers: configured sender organization,
    /// falling back to the tournament office default.
    pub fn footer_organization(&self) -> &str {
        self.sender_organization
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SENDER_ORGANIZATION)
    }

    /// Current sender identity as a separate struct (for API responses).
    pub fn sender_settings(&self) -> SenderSettings {
        SenderSettings {
            sender_organization: self.sender_organization.clone(),
            sender_name: self.sender_name.clone(),
            sender_contact: self.sender_contact.clone(),
        }
    }

    /// Apply a partial sender-identity update: only fields present in the
    /// request are written; a present-but-null field clears the stored value.
    pub fn apply_sender_update(&mut self, update: SenderSettingsUpdate) {
        if let Some(v) = update.sender_organization {
            self.sender_organization = v;
        }
        if let Some(v) = update.sender_name {
            self.sender_name = v;
        }
        if let Some(v) = update.sender_contact {
            self.sender_contact = v;
        }
    }
}

/// Sender identity view (report cover / settings endpoint).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SenderSettings {
    pub sender_organization: Option<String>,
    pub sender_name: Option<String>,
    pub sender_contact: Option<String>,
}

/// Partial update for the sender identity. The outer Option tracks whether
/// the field appeared in the request body at all, the inner one holds the
/// new value (None clears the field).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SenderSettingsUpdate {
    #[serde(default, deserialize_with = "some_field")]
    pub sender_organization: Option<Option<String>>,
    #[serde(default, deserialize_with = "some_field")]
    pub sender_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "some_field")]
    pub sender_contact: Option<Option<String>>,
}

/// Marks a field as supplied even when its value is null, so PATCH can tell
/// "clear this field" apart from "leave this field alone".
fn some_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
