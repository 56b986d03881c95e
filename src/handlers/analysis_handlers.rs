use std::sync::Arc;
use axum::{
    extract::State,
    Json,
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    analysis::request::AnalysisRequest,
    handlers::review_dtos::AnalyzeRequest,
    scoring::scorer::AnalysisResult,
};

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, (StatusCode, Json<serde_json::Value>)> {
    let request = AnalysisRequest::new(request.text).map_err(|e| {
        tracing::debug!("Rejected analysis request: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": e.to_string()}))
        )
    })?;

    let result = state.scorer.score(request.text()).ok_or_else(|| (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Text must not be empty"}))
    ))?;

    tracing::info!(
        sentiment = %result.sentiment,
        score = result.score,
        confidence = result.confidence,
        keywords = result.keywords.len(),
        "Analyzed text"
    );
    Ok(Json(result))
}
