use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use desk_application::{spawn_sync_worker, AppState, SyncEvent};
use desk_interfaces_http::build_router;

use crate::context::AppContext;

pub fn build_router_with_layers(state: AppState) -> Router {
    build_router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_standalone(config_path: Option<&Path>) -> Result<()> {
    let context = AppContext::new(config_path).await?;
    let state = context.state;

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let worker = spawn_sync_worker(
        state.dispatcher.clone(),
        context.sync_triggers,
        Duration::from_secs(state.config.sync_interval_seconds),
        async move {
            let _ = stop_rx.wait_for(|stopped| *stopped).await;
        },
    );
    tokio::spawn(log_lost_syncs(state.clone()));

    let app = build_router_with_layers(state.clone());
    let addr: std::net::SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = stop_tx.send(true);
    if let Err(err) = worker.await {
        error!("sync worker terminated abnormally: {}", err);
    }
    let pending = state.outbox.pending_count();
    if pending > 0 {
        info!("{} sync entries pending; they will be retried on next start", pending);
    }
    Ok(())
}

async fn log_lost_syncs(state: AppState) {
    let mut events = state.dispatcher.subscribe();
    loop {
        match events.recv().await {
            Ok(SyncEvent::Dropped(dead)) => warn!(
                "lost sync for {} {} (entry {}); kept in dead letters",
                dead.entry.entity_kind,
                dead.entry.payload.entity_id(),
                dead.entry.id
            ),
            Ok(_) => {}
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("sync event listener lagged by {} events", skipped)
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
