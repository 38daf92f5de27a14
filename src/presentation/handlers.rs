// HTTP request handlers for the widget surface
use crate::domain::chart::Chart;
use crate::domain::control::ControlElement;
use crate::domain::error::DashboardError;
use crate::presentation::app_state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Debug, Deserialize, Serialize)]
pub struct HoursBody {
    pub hours: u32,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/chart", get(get_chart))
        .route("/hours", get(get_hours).put(set_hours))
        .route("/controls", get(list_controls))
        .route("/click/:element_id", post(click))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current chart display state
pub async fn get_chart(State(state): State<Arc<AppState>>) -> Json<Chart> {
    Json(state.chart.read().await.clone())
}

pub async fn get_hours(State(state): State<Arc<AppState>>) -> Json<HoursBody> {
    Json(HoursBody {
        hours: state.hours.get(),
    })
}

/// Change the selected window. Takes effect on the next poll.
pub async fn set_hours(
    State(state): State<Arc<AppState>>,
    Json(body): Json<HoursBody>,
) -> Json<HoursBody> {
    state.hours.set(body.hours);
    tracing::info!(hours = body.hours, "hours selection changed");
    Json(body)
}

pub async fn list_controls(State(state): State<Arc<AppState>>) -> Json<Vec<ControlElement>> {
    Json(state.clicks.controls().to_vec())
}

/// Forward a click. The control endpoint's answer is never waited for.
pub async fn click(
    Path(element_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.clicks.click(&element_id) {
        Ok(_) => StatusCode::ACCEPTED.into_response(),
        Err(e @ DashboardError::UnknownElement(_)) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "click forwarding failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::click_service::ClickForwarder;
    use crate::application::control_sink::ControlSink;
    use crate::application::refresh_service::HoursSelector;
    use crate::domain::control::ControlPanel;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ControlSink for RecordingSink {
        async fn send(&self, markup: &str) -> Result<(), DashboardError> {
            self.sent.lock().unwrap().push(markup.to_string());
            Err(DashboardError::ControlForward("rejected".into()))
        }
    }

    async fn serve() -> (String, Arc<AppState>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let panel = ControlPanel::new(vec![ControlElement {
            id: "heat-on".into(),
            markup: "<span>ON</span>".into(),
        }]);
        let state = Arc::new(AppState {
            chart: Arc::new(RwLock::new(Chart::default())),
            hours: HoursSelector::new(1),
            clicks: ClickForwarder::new(sink.clone(), panel),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        (format!("http://{}", addr), state, sink)
    }

    #[tokio::test]
    async fn test_chart_endpoint_reflects_display_state() {
        let (url, state, _) = serve().await;
        {
            let mut chart = state.chart.write().await;
            chart.replace_series(vec!["12:00".into()], vec![20.5]);
            chart.update();
        }

        let chart: serde_json::Value = reqwest::get(format!("{}/chart", url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(chart["labels"], serde_json::json!(["12:00"]));
        assert_eq!(chart["datasets"][0]["values"], serde_json::json!([20.5]));
        assert_eq!(chart["revision"], 1);
    }

    #[tokio::test]
    async fn test_hours_selector_round_trip() {
        let (url, state, _) = serve().await;
        let client = reqwest::Client::new();

        let response = client
            .put(format!("{}/hours", url))
            .json(&HoursBody { hours: 12 })
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(state.hours.get(), 12);

        let body: HoursBody = client
            .get(format!("{}/hours", url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body.hours, 12);
    }

    #[tokio::test]
    async fn test_click_forwards_allow_listed_element_only() {
        let (url, state, sink) = serve().await;
        let client = reqwest::Client::new();
        let before = state.chart.read().await.clone();

        let accepted = client
            .post(format!("{}/click/heat-on", url))
            .send()
            .await
            .unwrap();
        assert_eq!(accepted.status(), reqwest::StatusCode::ACCEPTED);

        let rejected = client
            .post(format!("{}/click/chart", url))
            .send()
            .await
            .unwrap();
        assert_eq!(rejected.status(), reqwest::StatusCode::NOT_FOUND);

        // Delivery happens on a detached task
        for _ in 0..50 {
            if !sink.sent.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(*sink.sent.lock().unwrap(), vec!["<span>ON</span>"]);

        // A failed control action leaves the page untouched
        assert_eq!(*state.chart.read().await, before);
        assert_eq!(state.hours.get(), 1);
    }

    #[tokio::test]
    async fn test_controls_listing() {
        let (url, _, _) = serve().await;
        let controls: Vec<ControlElement> = reqwest::get(format!("{}/controls", url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].id, "heat-on");
    }
}
