//! Recipient registry and sender identity.
//!
//! Recipients are the addresses printed in the cover block of the daily
//! report. The sender identity is stamped into the footer of every page and
//! into `generated_by`.

use crate::models::{
    RecipientId, ReportRecipient, SenderSettings, SenderSettingsUpdate, TournamentId,
};
use crate::report::ReportError;
use crate::store::TournamentStore;

/// Names seeded by the setup-default operation, with their section notes.
pub const DEFAULT_RECIPIENTS: [(&str, &str); 4] = [
    ("埼玉新聞", "スポーツ部"),
    ("テレビ埼玉", "報道部"),
    ("イシクラ", ""),
    ("埼玉県サッカー協会", ""),
];

fn require_tournament(store: &TournamentStore, tournament_id: TournamentId) -> Result<(), ReportError> {
    if store.tournament(tournament_id).is_none() {
        return Err(ReportError::TournamentNotFound(tournament_id));
    }
    Ok(())
}

pub fn list_recipients(
    store: &TournamentStore,
    tournament_id: TournamentId,
) -> Result<Vec<ReportRecipient>, ReportError> {
    require_tournament(store, tournament_id)?;
    Ok(store
        .recipients_for(tournament_id)
        .into_iter()
        .cloned()
        .collect())
}

pub fn create_recipient(
    store: &mut TournamentStore,
    tournament_id: TournamentId,
    name: &str,
    notes: &str,
) -> Result<ReportRecipient, ReportError> {
    require_tournament(store, tournament_id)?;
    Ok(store.add_recipient(tournament_id, name, notes))
}

pub fn delete_recipient(
    store: &mut TournamentStore,
    recipient_id: RecipientId,
) -> Result<(), ReportError> {
    if store.remove_recipient(recipient_id) {
        Ok(())
    } else {
        Err(ReportError::RecipientNotFound(recipient_id))
    }
}

/// Seeds the standard recipient set for a tournament. Names already present
/// are left alone, so repeated calls do not grow the list. Returns the full
/// recipient list after seeding.
pub fn setup_default_recipients(
    store: &mut TournamentStore,
    tournament_id: TournamentId,
) -> Result<Vec<ReportRecipient>, ReportError> {
    require_tournament(store, tournament_id)?;
    for (name, notes) in DEFAULT_RECIPIENTS {
        if !store.recipient_exists(tournament_id, name) {
            store.add_recipient(tournament_id, name, notes);
        }
    }
    list_recipients(store, tournament_id)
}

pub fn sender_settings(
    store: &TournamentStore,
    tournament_id: TournamentId,
) -> Result<SenderSettings, ReportError> {
    store
        .tournament(tournament_id)
        .map(|t| t.sender_settings())
        .ok_or(ReportError::TournamentNotFound(tournament_id))
}

/// Applies a partial update to the sender identity. Only fields present in
/// the request change; an explicit null clears its field.
pub fn update_sender_settings(
    store: &mut TournamentStore,
    tournament_id: TournamentId,
    update: SenderSettingsUpdate,
) -> Result<SenderSettings, ReportError> {
    let tournament = store
        .tournament_mut(tournament_id)
        .ok_or(ReportError::TournamentNotFound(tournament_id))?;
    tournament.apply_sender_update(update);
    Ok(tournament.sender_settings())
}
