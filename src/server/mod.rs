//! HTTP surface: the JSON endpoint and the HTML dashboard.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | liveness text |
//! | `GET /analyze_company?company=NAME` | [`AnalysisResponse`] JSON, or 400 when `company` is missing or blank |
//! | `GET /dashboard?company=NAME` | HTML report (see [`dashboard`]) |

pub mod dashboard;

use crate::error::InputError;
use crate::models::AnalysisResponse;
use crate::pipeline::Pipeline;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct AppState {
    pub pipeline: Pipeline,
}

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub company: Option<String>,
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/analyze_company", get(analyze_company))
        .route("/dashboard", get(dashboard::dashboard))
        .with_state(state)
        .layer(
            // Path only; company names stay out of request spans.
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: &str, pipeline: Pipeline) -> std::io::Result<()> {
    let app = router(Arc::new(AppState { pipeline }));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Company news server listening");
    axum::serve(listener, app).await
}

async fn home() -> &'static str {
    "Company News Summarizer API is running."
}

async fn analyze_company(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<AnalysisResponse>, InputError> {
    let company = query.company.as_deref().unwrap_or_default();
    let report = state.pipeline.run(company).await?;
    Ok(Json(AnalysisResponse::from(&report)))
}
