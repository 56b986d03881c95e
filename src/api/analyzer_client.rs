use std::future::Future;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{
    analysis::{analyzer::Analyzer, request::AnalysisRequest},
    handlers::review_dtos::{ReviewSubmission, ReviewSummary, SubmitReviewResponse},
    scoring::scorer::AnalysisResult,
};

/// Every remote failure collapses into one kind: the request did not succeed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// HTTP client for a running sentiment backend.
#[derive(Clone)]
pub struct AnalyzerClient {
    base_url: String,
    http: Client,
}

impl AnalyzerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, ClientError> {
        let response = self.http
            .post(format!("{}/analyze", self.base_url))
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(format!("Failed to send request: {}", e)))?;
        read_json(response).await
    }

    pub async fn get_reviews(&self, limit: Option<u32>) -> Result<Vec<ReviewSummary>, ClientError> {
        let mut request = self.http.get(format!("{}/get-reviews", self.base_url));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(format!("Failed to send request: {}", e)))?;
        read_json(response).await
    }

    pub async fn submit_review(&self, submission: &ReviewSubmission) -> Result<SubmitReviewResponse, ClientError> {
        let response = self.http
            .post(format!("{}/api/submit-review", self.base_url))
            .json(submission)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(format!("Failed to send request: {}", e)))?;
        read_json(response).await
    }

    /// Stores a completed analysis without waiting on the outcome; failures
    /// are only logged.
    pub fn submit_review_detached(&self, submission: ReviewSubmission) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            match client.submit_review(&submission).await {
                Ok(stored) => tracing::debug!("Review stored with id {}", stored.id),
                Err(e) => tracing::error!("Failed to store review: {}", e),
            }
        })
    }
}

impl Analyzer for AnalyzerClient {
    type Error = ClientError;

    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisResult, Self::Error>> + Send {
        self.analyze_text(request.text())
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::RequestFailed(format!("{}: {}", status, error_text)));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::RequestFailed(format!("Invalid response body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = AnalyzerClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_failure() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let client = AnalyzerClient::new("http://127.0.0.1:9");
        let err = client.analyze_text("great").await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(_)));
    }

    fn canned(status: u16, body: &'static str) -> reqwest::Response {
        let response = axum::http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        reqwest::Response::from(response)
    }

    #[tokio::test]
    async fn error_status_carries_code_and_body() {
        let err = read_json::<AnalysisResult>(canned(500, r#"{"error":"boom"}"#))
            .await
            .unwrap_err();
        let ClientError::RequestFailed(message) = err;
        assert!(message.starts_with("500"));
        assert!(message.contains("boom"));
    }

    #[tokio::test]
    async fn fractional_confidence_is_accepted() {
        let body = r#"{"sentiment":"Positive","score":62,"confidence":87.31,"keywords":["great"]}"#;
        let result = read_json::<AnalysisResult>(canned(200, body)).await.unwrap();
        assert_eq!(result.score, 62.0);
        assert!((result.confidence - 87.31).abs() < 1e-4);
        assert_eq!(result.keywords, vec!["great".to_string()]);
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_request_failure() {
        let err = read_json::<AnalysisResult>(canned(200, r#"{"sentiment":"Elated"}"#))
            .await
            .unwrap_err();
        let ClientError::RequestFailed(message) = err;
        assert!(message.starts_with("Invalid response body"));
    }
}
