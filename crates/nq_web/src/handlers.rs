use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use nq_core::{Dashboard, Quote};
use tracing::error;
use crate::{html, AppState};

pub struct ApiError(nq_core::Error);

impl From<nq_core::Error> for ApiError {
    fn from(e: nq_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        let status = match self.0 {
            nq_core::Error::Config(_) | nq_core::Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let dashboard = state.manager.build_dashboard().await?;
    Ok(Html(html::render_dashboard(&dashboard)))
}

pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, ApiError> {
    Ok(Json(state.manager.build_dashboard().await?))
}

pub async fn get_quotes(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Quote>> {
    Json(state.manager.collect_quotes().await)
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let summary = state.manager.summarize_text(&request.text).await?;
    Ok(Json(SummarizeResponse { summary }))
}
