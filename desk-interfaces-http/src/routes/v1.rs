use axum::routing::{get, post};
use axum::Router;

use desk_application::AppState;

use crate::handlers::{
    check_in_handlers, dashboard_handlers, ops_handlers, session_handlers, sync_handlers,
    ticket_handlers, walk_in_handlers,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/session", post(session_handlers::login))
        .route(
            "/v1/tickets",
            get(ticket_handlers::search_tickets).post(ticket_handlers::issue_ticket),
        )
        .route("/v1/tickets/:id", get(ticket_handlers::get_ticket))
        .route(
            "/v1/tickets/:id/reference",
            get(ticket_handlers::get_ticket_reference),
        )
        .route(
            "/v1/references/resolve",
            post(ticket_handlers::resolve_reference),
        )
        .route("/v1/check-ins", post(check_in_handlers::check_in_guest))
        .route(
            "/v1/check-ins/:ticket_id",
            get(check_in_handlers::get_check_in),
        )
        .route(
            "/v1/walk-ins",
            get(walk_in_handlers::list_walk_ins).post(walk_in_handlers::register_walk_in),
        )
        .route("/v1/stats", get(dashboard_handlers::get_stats))
        .route("/v1/activity", get(dashboard_handlers::list_activity))
        .route("/v1/sync/status", get(sync_handlers::get_sync_status))
        .route("/v1/sync/drain", post(sync_handlers::drain_now))
        .route(
            "/v1/sync/dead-letters",
            get(sync_handlers::list_dead_letters),
        )
        .route(
            "/v1/sync/dead-letters/requeue",
            post(sync_handlers::requeue_dead_letters),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
