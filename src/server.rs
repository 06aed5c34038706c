//! HTTP surface: the axum router and handlers.
//!
//! Two routes only:
//!
//! * `GET /health` — unconditional liveness probe, no dependency checks.
//! * `GET /api/data` — the whole service: query params in, one page of
//!   spreadsheet rows out.
//!
//! Handlers are thin: extraction and response shaping live here, everything
//! else is [`crate::process::process_request`]. The shared state is an
//! immutable [`ServiceConfig`] plus one pooled [`reqwest::Client`]; no
//! mutable state crosses requests.

use crate::config::ServiceConfig;
use crate::error::SheetError;
use crate::pipeline::fetch;
use crate::process::process_request;
use crate::request::RawDataQuery;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Immutable per-process state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub client: reqwest::Client,
}

/// JSON error body: `{"error": "...", "details": "..."}` with `details`
/// present only for internal faults.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for SheetError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Request failed ({}): {}", status.as_u16(), self);
        let body = ErrorBody {
            error: self.to_string(),
            details: self.details().map(String::from),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router around the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/data", get(get_data))
        .with_state(state)
}

/// Liveness probe. Always 200; checks nothing.
async fn health() -> Response {
    Json(json!({ "status": "ok", "message": "Service is running" })).into_response()
}

/// `GET /api/data?url=&page=&rows_per_page=`
async fn get_data(
    State(state): State<AppState>,
    Query(raw): Query<RawDataQuery>,
) -> Result<Response, SheetError> {
    let page = process_request(&state.client, &state.config, raw).await?;
    // Serialize by hand so a failure surfaces as the documented 500 body
    // instead of a framework-shaped error.
    let body = page.to_body()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Bind and run the server until shutdown.
pub async fn serve(config: ServiceConfig) -> std::io::Result<()> {
    let client = fetch::build_client(config.fetch_timeout_secs).map_err(std::io::Error::other)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState { config, client };

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("sheet2json listening on {}", addr);
    axum::serve(listener, router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_details_when_absent() {
        let body = ErrorBody {
            error: "URL parameter is required".into(),
            details: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"URL parameter is required"}"#
        );
    }

    #[test]
    fn error_body_includes_details_for_internal_faults() {
        let body = ErrorBody {
            error: "Could not serialize response data".into(),
            details: Some("cause".into()),
        };
        let v: serde_json::Value = serde_json::from_str(&serde_json::to_string(&body).unwrap())
            .unwrap();
        assert_eq!(v["details"], "cause");
    }
}
