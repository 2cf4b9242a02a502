use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::{mpsc, watch};
use tower::ServiceExt;

use teatime::{
    api::create_router,
    clock::{Clock, SystemClock},
    controller::{Controller, Timing},
    entries::EntryStore,
    services::RecordingNotifier,
    state::AppState,
    tasks::driver_task,
    timer::TimerDefinition,
};

fn app() -> Router {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let entries = EntryStore::in_memory(vec![
        TimerDefinition::new("Earl Grey", 210),
        TimerDefinition::new("Nothing", 0),
    ]);
    let controller = Controller::new(
        Arc::clone(&clock),
        entries,
        Box::new(RecordingNotifier::default()),
        Timing::default(),
    );

    let (command_tx, command_rx) = mpsc::channel(8);
    let (timer_tx, timer_rx) = watch::channel(controller.snapshot());
    tokio::spawn(driver_task(controller, clock, command_rx, timer_tx));

    create_router(Arc::new(AppState::new(
        command_tx,
        timer_rx,
        20554,
        "127.0.0.1".to_string(),
    )))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_start_and_stop() {
    let app = app();

    let (status, body) = call(&app, Method::POST, "/timers/0/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["name"], "Earl Grey");
    assert_eq!(body["timer"]["launcher"]["progress_visible"], true);

    let (_, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["last_action"], "start");

    // Nothing has finished yet, so focusing the window changes nothing
    let (_, body) = call(&app, Method::POST, "/focus", None).await;
    assert_eq!(body["status"], "ignored");

    let (status, body) = call(&app, Method::POST, "/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["message"], "Timer stopped");
    assert_eq!(body["timer"]["status"], "empty");

    let (_, body) = call(&app, Method::POST, "/stop", None).await;
    assert_eq!(body["message"], "No timer was active");
}

#[tokio::test]
async fn test_zero_duration_start_is_ignored() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/timers/1/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["timer"]["status"], "empty");
}

#[tokio::test]
async fn test_unknown_entry_is_not_found() {
    let app = app();
    let (status, _) = call(&app, Method::POST, "/timers/9/start", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::DELETE, "/entries/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_duration_is_rejected() {
    let app = app();

    let (status, _) = call(
        &app,
        Method::POST,
        "/entries",
        Some(json!({ "name": "Forever", "duration": i64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::PATCH,
        "/entries/0",
        Some(json!({ "duration": i64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, Method::GET, "/entries", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["duration"], 210);

    let (status, body) = call(&app, Method::POST, "/timers/0/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn test_entry_editing() {
    let app = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/entries",
        Some(json!({ "name": "Sencha", "duration": 90 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["index"], 2);

    let (status, body) = call(
        &app,
        Method::PATCH,
        "/entries/2",
        Some(json!({ "duration": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sencha");
    assert_eq!(body["duration"], 100);

    let (status, _) = call(&app, Method::PATCH, "/entries/2", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, Method::GET, "/entries", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(3));
    assert_eq!(body[2]["duration"], 100);

    let (status, body) = call(&app, Method::DELETE, "/entries/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Earl Grey");

    let (_, body) = call(&app, Method::GET, "/entries", None).await;
    assert_eq!(body[0]["name"], "Nothing");
    assert_eq!(body[0]["index"], 0);
}
