use desk_domain::SyncStatus;

use crate::dtos::DeadLetterList;
use crate::AppState;

pub fn sync_status(state: &AppState) -> SyncStatus {
    state.dispatcher.status()
}

pub fn list_dead_letters(state: &AppState) -> DeadLetterList {
    let items = state.outbox.dead_letters();
    DeadLetterList {
        total: items.len(),
        items,
    }
}
