use desk_domain::{activity_feed, ledger_stats, normalize_optional_text, ActivityItem};

use crate::dtos::{ActivityQuery, DashboardSummary};
use crate::AppState;

const DEFAULT_ACTIVITY_LIMIT: usize = 50;
const MAX_ACTIVITY_LIMIT: usize = 500;

pub fn dashboard_summary(state: &AppState) -> DashboardSummary {
    DashboardSummary {
        stats: ledger_stats(&state.ledger.snapshot()),
        sync: state.dispatcher.status(),
    }
}

pub fn recent_activity(state: &AppState, query: ActivityQuery) -> Vec<ActivityItem> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .clamp(1, MAX_ACTIVITY_LIMIT);
    let volunteer = normalize_optional_text(query.volunteer);
    let mut items = activity_feed(&state.ledger.snapshot(), volunteer.as_deref());
    items.truncate(limit);
    items
}
