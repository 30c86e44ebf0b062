//! Tests against a stub EcoWatcher backend served by axum on an ephemeral port

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use ecowatcher::client::{ClientError, EcoApi, HttpEcoClient, HttpEcoClientConfig};
use ecowatcher::dashboard::{
    Dashboard, DashboardConfig, PollError, PollStatus, RenderError, RenderOutcome, TextChart,
    ViewEffect, NO_DATA_TEXT,
};
use ecowatcher::model::{Latest, Severity, TrendKind};

/// What the stub answers on `/api/ultimo`
#[derive(Clone)]
enum LatestReply {
    Json(Value),
    Status(StatusCode),
    Garbage,
}

#[derive(Clone)]
struct Backend {
    latest: LatestReply,
    /// History scores, newest first
    scores: Vec<f64>,
    limits: Arc<Mutex<Vec<usize>>>,
    /// Answer `/api/historico` with an error body instead of readings
    history_broken: Arc<AtomicBool>,
}

impl Backend {
    fn new(latest: LatestReply, scores: &[f64]) -> Self {
        Self {
            latest,
            scores: scores.to_vec(),
            limits: Arc::new(Mutex::new(Vec::new())),
            history_broken: Arc::new(AtomicBool::new(false)),
        }
    }
}

async fn ultimo(State(backend): State<Backend>) -> Response {
    match backend.latest {
        LatestReply::Json(body) => Json(body).into_response(),
        LatestReply::Status(status) => (status, "backend exploded").into_response(),
        LatestReply::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
    }
}

async fn historico(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let limit = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(30);
    backend.limits.lock().unwrap().push(limit);

    if backend.history_broken.load(Ordering::SeqCst) {
        return Json(json!({ "error": "db down" }));
    }

    let historico: Vec<Value> = backend
        .scores
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, score)| {
            json!({
                "id": 100 - i as i64,
                "ecoscore": score,
                "timestamp": format!("2024-05-01 10:{:02}:00", 59 - i),
            })
        })
        .collect();

    Json(json!({ "historico": historico }))
}

/// Serve `backend` and return its base URL
async fn spawn(backend: Backend) -> String {
    let app = Router::new()
        .route("/api/ultimo", get(ultimo))
        .route("/api/historico", get(historico))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client(base_url: String) -> HttpEcoClient {
    HttpEcoClient::new(HttpEcoClientConfig {
        base_url,
        request_timeout_ms: 2_000,
    })
    .unwrap()
}

fn reading(score: f64) -> LatestReply {
    LatestReply::Json(json!({
        "id": 100,
        "ecoscore": score,
        "timestamp": "2024-05-01 10:59:00",
    }))
}

#[tokio::test]
async fn test_latest_reading() {
    let base = spawn(Backend::new(reading(412.5), &[])).await;

    match client(base).latest().await.unwrap() {
        Latest::Reading(r) => {
            assert_eq!(r.id, Some(100));
            assert_eq!(r.ecoscore, 412.5);
            assert_eq!(r.timestamp, "2024-05-01 10:59:00");
        }
        other => panic!("expected a reading, got {:?}", other),
    }
}

#[tokio::test]
async fn test_latest_without_data() {
    let base = spawn(Backend::new(
        LatestReply::Json(json!({ "status": "sin_datos" })),
        &[],
    ))
    .await;

    assert_eq!(client(base).latest().await.unwrap(), Latest::NoData);
}

#[tokio::test]
async fn test_latest_unknown_status() {
    let base = spawn(Backend::new(
        LatestReply::Json(json!({ "status": "mantenimiento" })),
        &[],
    ))
    .await;

    assert!(matches!(
        client(base).latest().await,
        Err(ClientError::UnexpectedStatus(_))
    ));
}

#[tokio::test]
async fn test_server_error_and_bad_body() {
    let base = spawn(Backend::new(
        LatestReply::Status(StatusCode::INTERNAL_SERVER_ERROR),
        &[],
    ))
    .await;
    assert_eq!(
        client(base).latest().await,
        Err(ClientError::ApiError {
            status: 500,
            message: "backend exploded".to_string(),
        })
    );

    let base = spawn(Backend::new(LatestReply::Garbage, &[])).await;
    assert!(matches!(client(base).latest().await, Err(ClientError::Decode(_))));
}

#[tokio::test]
async fn test_history_is_chronological() {
    let backend = Backend::new(reading(300.0), &[300.0, 250.0, 200.0, 150.0]);
    let limits = Arc::clone(&backend.limits);
    let base = spawn(backend).await;

    let readings = client(base).history(3).await.unwrap().chronological();

    assert_eq!(*limits.lock().unwrap(), vec![3]);
    let scores: Vec<f64> = readings.iter().map(|r| r.ecoscore).collect();
    assert_eq!(scores, vec![200.0, 250.0, 300.0]);
    assert_eq!(readings[2].timestamp, "2024-05-01 10:59:00");
}

#[tokio::test]
async fn test_dashboard_tick_against_backend() {
    let backend = Backend::new(reading(150.0), &[150.0, 180.0, 240.0]);
    let limits = Arc::clone(&backend.limits);
    let base = spawn(backend).await;

    let dashboard: Dashboard<_, TextChart> = Dashboard::new(client(base), DashboardConfig::default());
    let surface = TextChart::new(6);
    let mut view: Vec<ViewEffect> = Vec::new();

    let report = dashboard.tick(&mut view, Some(&surface)).await;

    assert!(report.is_ok());
    match report.poll {
        PollStatus::Updated {
            severity, trend, ..
        } => {
            assert_eq!(severity, Severity::Critical);
            // 150 against 180: a drop of 30
            assert_eq!(trend.kind, TrendKind::Declining);
        }
        other => panic!("expected an update, got {:?}", other),
    }
    assert!(matches!(report.render, RenderOutcome::Drawn { points: 3 }));

    assert_eq!(view[0], ViewEffect::ScoreText("150.00 (2024-05-01 10:59:00)".to_string()));
    assert!(view.contains(&ViewEffect::AlertBanner { visible: true }));
    assert!(view.contains(&ViewEffect::PlayAlertSound));

    // Trend asks for two readings, the chart for thirty
    assert_eq!(*limits.lock().unwrap(), vec![2, 30]);

    let chart = surface.rendered().unwrap();
    assert!(chart.starts_with("EcoScore"));

    // A second cycle replaces the chart rather than stacking another one
    let report = dashboard.tick(&mut view, Some(&surface)).await;
    assert!(report.is_ok());
    assert!(dashboard.renderer().has_chart());
}

#[tokio::test]
async fn test_dashboard_tick_without_data() {
    let base = spawn(Backend::new(
        LatestReply::Json(json!({ "status": "sin_datos" })),
        &[],
    ))
    .await;

    let dashboard: Dashboard<_, TextChart> = Dashboard::new(client(base), DashboardConfig::default());
    let surface = TextChart::default();
    let mut view: Vec<ViewEffect> = Vec::new();

    let report = dashboard.tick(&mut view, Some(&surface)).await;

    assert!(matches!(report.poll, PollStatus::NoData));
    assert_eq!(view, vec![ViewEffect::ScoreText(NO_DATA_TEXT.to_string())]);
    assert!(matches!(report.render, RenderOutcome::Drawn { points: 0 }));
    assert!(surface.rendered().unwrap().contains("(sin lecturas)"));
}

#[tokio::test]
async fn test_history_error_body_keeps_previous_chart() {
    let backend = Backend::new(reading(300.0), &[300.0, 280.0]);
    let broken = Arc::clone(&backend.history_broken);
    let base = spawn(backend).await;

    let dashboard: Dashboard<_, TextChart> = Dashboard::new(client(base), DashboardConfig::default());
    let surface = TextChart::new(6);
    let mut view: Vec<ViewEffect> = Vec::new();

    let report = dashboard.tick(&mut view, Some(&surface)).await;
    assert!(matches!(report.render, RenderOutcome::Drawn { points: 2 }));
    let before = surface.rendered().unwrap();

    // A body without `historico` is a decode failure, not an empty window
    broken.store(true, Ordering::SeqCst);
    let report = dashboard.tick(&mut view, Some(&surface)).await;

    assert!(matches!(
        report.poll,
        PollStatus::Failed(PollError::Trend(ClientError::Decode(_)))
    ));
    assert!(matches!(
        report.render,
        RenderOutcome::Failed(RenderError::History(ClientError::Decode(_)))
    ));
    assert_eq!(surface.rendered().unwrap(), before);
    assert!(dashboard.renderer().has_chart());
}
