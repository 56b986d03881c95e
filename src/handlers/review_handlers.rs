use std::sync::Arc;
use axum::{
    extract::{Query, State},
    Json,
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    analysis::request::AnalysisRequest,
    handlers::review_dtos::{
        DashboardStats, ReviewListQuery, ReviewSubmission, ReviewSummary,
        SubmitReviewResponse,
    },
    models::review_models::NewReview,
    repositories::review_repository::SentimentTotals,
};

const DEFAULT_REVIEW_LIMIT: i64 = 20;
const MAX_REVIEW_LIMIT: i64 = 100;

pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<Vec<ReviewSummary>>, (StatusCode, Json<serde_json::Value>)> {
    let limit = query.limit.unwrap_or(DEFAULT_REVIEW_LIMIT).clamp(1, MAX_REVIEW_LIMIT);

    let reviews = state.review_repository.get_recent_reviews(limit)
        .map_err(|e| {
            tracing::error!("Failed to fetch reviews: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Database error: {}", e)}))
            )
        })?;

    let summaries = reviews
        .into_iter()
        .map(|review| ReviewSummary {
            id: review.id.to_string(),
            text: review.text,
            sentiment: review.sentiment,
            score: review.score,
        })
        .collect();

    Ok(Json(summaries))
}

pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<ReviewSubmission>,
) -> Result<Json<SubmitReviewResponse>, (StatusCode, Json<serde_json::Value>)> {
    let request = AnalysisRequest::new(submission.text).map_err(|e| (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": e.to_string()}))
    ))?;
    if !(0..=100).contains(&submission.score) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Score must be between 0 and 100"}))
        ));
    }
    if !submission.confidence.is_finite() || !(0.0..=100.0).contains(&submission.confidence) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Confidence must be between 0 and 100"}))
        ));
    }

    let new_review = NewReview {
        text: request.into_text(),
        sentiment: submission.sentiment.to_string(),
        score: submission.score,
        confidence: submission.confidence,
        created_at: chrono::Utc::now().timestamp(),
    };

    match state.review_repository.create_review(&new_review) {
        Ok(id) => {
            tracing::info!("Stored {} review {}", new_review.sentiment, id);
            Ok(Json(SubmitReviewResponse {
                message: "Review stored".to_string(),
                id: id.to_string(),
            }))
        },
        Err(e) => {
            tracing::error!("Failed to store review: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Database error: {}", e)}))
            ))
        },
    }
}

pub async fn get_dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, (StatusCode, Json<serde_json::Value>)> {
    let totals = state.review_repository.get_sentiment_totals()
        .map_err(|e| {
            tracing::error!("Failed to compute dashboard stats: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Database error: {}", e)}))
            )
        })?;

    Ok(Json(dashboard_stats(&totals)))
}

fn dashboard_stats(totals: &SentimentTotals) -> DashboardStats {
    let total = totals.total();
    let share = |count: i64| {
        if total == 0 {
            0.0
        } else {
            round_tenth(count as f64 * 100.0 / total as f64)
        }
    };
    DashboardStats {
        total,
        positive: totals.positive,
        neutral: totals.neutral,
        negative: totals.negative,
        positive_pct: share(totals.positive),
        neutral_pct: share(totals.neutral),
        negative_pct: share(totals.negative),
        average_score: if total == 0 {
            0.0
        } else {
            round_tenth(totals.score_sum as f64 / total as f64)
        },
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
