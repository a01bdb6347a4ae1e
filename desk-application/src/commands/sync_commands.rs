use tracing::info;

use crate::dtos::RequeueSummary;
use crate::{AppError, AppState, DrainOutcome};

/// Runs a drain pass now instead of waiting for the next tick.
pub async fn drain_outbox(state: &AppState) -> DrainOutcome {
    state.dispatcher.drain().await
}

pub fn requeue_dead_letters(state: &AppState) -> Result<RequeueSummary, AppError> {
    let requeued = state.outbox.requeue_dead_letters()?;
    if requeued > 0 {
        info!("re-queued {} dead-lettered sync entries", requeued);
    }
    Ok(RequeueSummary { requeued })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_state_with_gateway, walk_in, ScriptedGateway};
    use std::sync::Arc;

    #[tokio::test]
    async fn requeued_letters_are_delivered_on_next_drain() {
        let gateway = Arc::new(ScriptedGateway::scripted(&[false; 6], true));
        let state = app_state_with_gateway(gateway.clone());
        state.ledger.put_walk_in(walk_in("W7K2M9P", 2)).expect("put");

        for _ in 0..6 {
            drain_outbox(&state).await;
        }
        assert_eq!(state.outbox.dead_letter_count(), 1);

        let summary = requeue_dead_letters(&state).expect("requeue");
        assert_eq!(summary.requeued, 1);
        match drain_outbox(&state).await {
            DrainOutcome::Completed(report) => assert_eq!(report.delivered, 1),
            DrainOutcome::AlreadyRunning => panic!("no other pass should be running"),
        }
        assert_eq!(state.outbox.pending_count(), 0);
        assert_eq!(state.outbox.dead_letter_count(), 0);
        assert_eq!(gateway.call_count(), 7);
    }
}
