use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use desk_application::{AppState, EntityStore, Metrics, OutboxQueue, SyncDispatcher, SyncTrigger};
use desk_domain::RuntimeConfig;
use desk_infrastructure::{ConfiguredPinVerifier, MemoryStore, SheetsGateway};
use desk_interfaces_http::build_router;

const TOKEN: &str = "desk-secret";

fn app() -> Router {
    let config = RuntimeConfig {
        api_token: Some(TOKEN.to_string()),
        volunteer_pin: Some("2468".to_string()),
        ..RuntimeConfig::default()
    };
    let store = Arc::new(MemoryStore::new());
    let outbox = Arc::new(OutboxQueue::open(store.clone(), SyncTrigger::disabled()).expect("outbox"));
    let ledger = Arc::new(EntityStore::open(store, outbox.clone()).expect("ledger"));
    let metrics = Arc::new(Metrics::default());
    let gateway = Arc::new(SheetsGateway::new(None, Duration::from_secs(1)).expect("gateway"));
    let dispatcher = Arc::new(SyncDispatcher::new(
        outbox.clone(),
        gateway,
        metrics.clone(),
        config.sync_retry_cap,
    ));
    build_router(AppState {
        pin_verifier: Arc::new(ConfiguredPinVerifier::from_config(&config)),
        config,
        ledger,
        outbox,
        dispatcher,
        metrics,
    })
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", TOKEN))
        .header("X-Volunteer-Name", "Ana");
    let body = match body {
        Some(value) => {
            request = request.header("Content-Type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn issue_body() -> Value {
    json!({
        "recipient_name": "Maria Lopez",
        "phone_number": "(555) 010-2000",
        "email": "maria@example.org",
        "adult_count": 2,
        "child_count": 1,
        "children": [{ "age": 5, "gender": "boy" }]
    })
}

#[tokio::test]
async fn missing_token_is_rejected() {
    let app = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/stats")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_open() {
    let app = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/ops/health/live")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn issue_scan_and_check_in_flow() {
    let app = app();

    let (status, issued) = call(&app, "POST", "/v1/tickets", Some(issue_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = issued["ticket"]["id"].as_str().expect("id").to_string();
    assert_eq!(issued["ticket"]["group_size"], 3);
    assert_eq!(issued["ticket"]["created_by"], "Ana");

    let raw = issued["reference"].as_str().expect("reference").to_string();
    let (status, resolved) =
        call(&app, "POST", "/v1/references/resolve", Some(json!({ "raw": raw }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["ticket"]["id"], id.as_str());
    assert_eq!(resolved["check_in"], Value::Null);

    let check_in = json!({ "ticket_id": id.to_lowercase(), "actual_adults": 2, "actual_children": 0 });
    let (status, receipt) = call(&app, "POST", "/v1/check-ins", Some(check_in.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["check_in"]["actual_total"], 2);
    assert_eq!(receipt["ticket"]["status"], "checked-in");

    let (status, conflict) = call(&app, "POST", "/v1/check-ins", Some(check_in)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["checked_in_by"], "Ana");
    assert!(conflict["checked_in_at"].is_string());

    let (status, stats) = call(&app, "GET", "/v1/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["stats"]["checked_in"], 1);
    assert_eq!(stats["sync"]["pending_count"], 3);
    assert_eq!(stats["sync"]["is_gateway_configured"], false);

    let (status, activity) = call(&app, "GET", "/v1/activity?volunteer=Ana&limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(activity.as_array().map(Vec::len), Some(1));
    assert_eq!(activity[0]["type"], "checkin");
}

#[tokio::test]
async fn error_statuses() {
    let app = app();

    let (status, _) = call(&app, "GET", "/v1/tickets/ZZZZZZZZ", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        "POST",
        "/v1/references/resolve",
        Some(json!({ "raw": "{\"id\":\"AB3X7Q9K\",\"g\":0,\"v\":1}" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "not a valid ticket reference");

    let mut empty_party = issue_body();
    empty_party["adult_count"] = json!(0);
    empty_party["child_count"] = json!(0);
    empty_party["children"] = json!([]);
    let (status, _) = call(&app, "POST", "/v1/tickets", Some(empty_party)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        "POST",
        "/v1/session",
        Some(json!({ "volunteer_name": "Ana", "pin": "0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn walk_ins_and_sync_endpoints() {
    let app = app();

    let (status, session) = call(
        &app,
        "POST",
        "/v1/session",
        Some(json!({ "volunteer_name": " Ben ", "pin": "2468" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["volunteer_name"], "Ben");

    let (status, walk_in) = call(
        &app,
        "POST",
        "/v1/walk-ins",
        Some(json!({ "name": "Sam Rivera", "phone_number": "555-0100", "adult_count": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(walk_in["id"].as_str().expect("id").starts_with('W'));

    let (_, listed) = call(&app, "GET", "/v1/walk-ins", None).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    for _ in 0..6 {
        let (status, drained) = call(&app, "POST", "/v1/sync/drain", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(drained["status"], "completed");
    }

    let (_, sync) = call(&app, "GET", "/v1/sync/status", None).await;
    assert_eq!(sync["pending_count"], 0);
    assert_eq!(sync["dead_letter_count"], 1);

    let (_, dead) = call(&app, "GET", "/v1/sync/dead-letters", None).await;
    assert_eq!(dead["total"], 1);
    assert_eq!(dead["items"][0]["last_error"], "gateway destination not configured");

    let (status, requeued) = call(&app, "POST", "/v1/sync/dead-letters/requeue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(requeued["requeued"], 1);

    let (_, walk_ins) = call(&app, "GET", "/v1/walk-ins", None).await;
    assert_eq!(walk_ins.as_array().map(Vec::len), Some(1));

    let (status, _) = call(&app, "GET", "/v1/ops/metrics/prometheus", None).await;
    assert_eq!(status, StatusCode::OK);
}
