//! One submission at a time: `Idle -> Analyzing -> Result`, falling back to
//! `Idle` with a notice when the input is blank or the analyzer fails.

use thiserror::Error;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::request::{AnalysisRequest, RequestError};
use crate::scoring::scorer::AnalysisResult;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPhase {
    Idle,
    Analyzing,
    Result(AnalysisResult),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifecycleError {
    #[error("An analysis is already in progress")]
    AlreadyAnalyzing,
    #[error(transparent)]
    InvalidInput(#[from] RequestError),
    #[error("Analysis request failed: {0}")]
    Failed(String),
    #[error("No analysis is in progress")]
    NotAnalyzing,
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    phase: AnalysisPhase,
    notice: Option<String>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            phase: AnalysisPhase::Idle,
            notice: None,
        }
    }

    pub fn phase(&self) -> &AnalysisPhase {
        &self.phase
    }

    /// User-facing message left by the last rejected or failed submission.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            AnalysisPhase::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, AnalysisPhase::Analyzing)
    }

    /// Whether the submit trigger should be enabled for `input`.
    pub fn can_submit(&self, input: &str) -> bool {
        !self.is_analyzing() && !input.trim().is_empty()
    }

    /// Moves into `Analyzing` and hands back the validated request.
    pub fn begin(&mut self, input: &str) -> Result<AnalysisRequest, LifecycleError> {
        if self.is_analyzing() {
            return Err(LifecycleError::AlreadyAnalyzing);
        }
        match AnalysisRequest::new(input) {
            Ok(request) => {
                self.phase = AnalysisPhase::Analyzing;
                self.notice = None;
                Ok(request)
            }
            Err(e) => {
                self.phase = AnalysisPhase::Idle;
                self.notice = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn complete(&mut self, result: AnalysisResult) -> Result<&AnalysisResult, LifecycleError> {
        if !self.is_analyzing() {
            return Err(LifecycleError::NotAnalyzing);
        }
        self.phase = AnalysisPhase::Result(result);
        self.result().ok_or(LifecycleError::NotAnalyzing)
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> LifecycleError {
        let reason = reason.into();
        tracing::warn!("Analysis failed: {}", reason);
        self.phase = AnalysisPhase::Idle;
        self.notice = Some(format!("Analysis request failed: {}", reason));
        LifecycleError::Failed(reason)
    }

    /// Runs a whole submission against `analyzer`.
    pub async fn submit<A: Analyzer>(
        &mut self,
        analyzer: &A,
        input: &str,
    ) -> Result<&AnalysisResult, LifecycleError> {
        let request = self.begin(input)?;
        match analyzer.analyze(&request).await {
            Ok(result) => self.complete(result),
            Err(e) => Err(self.fail(e.to_string())),
        }
    }

    pub fn reset(&mut self) {
        self.phase = AnalysisPhase::Idle;
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::LocalAnalyzer;
    use crate::scoring::scorer::Sentiment;
    use std::future::{self, Future};

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    struct DownAnalyzer;

    impl Analyzer for DownAnalyzer {
        type Error = Refused;

        fn analyze(
            &self,
            _request: &AnalysisRequest,
        ) -> impl Future<Output = Result<AnalysisResult, Self::Error>> + Send {
            future::ready(Err(Refused))
        }
    }

    #[tokio::test]
    async fn successful_submission_ends_in_result() {
        let mut session = AnalysisSession::new();
        let analyzer = LocalAnalyzer::default();
        let result = session
            .submit(&analyzer, "Great value, love it")
            .await
            .unwrap()
            .clone();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(session.result(), Some(&result));
        assert!(session.notice().is_none());
    }

    #[tokio::test]
    async fn blank_submission_stays_idle_with_notice() {
        let mut session = AnalysisSession::new();
        let err = session.submit(&LocalAnalyzer::default(), "   ").await.unwrap_err();
        assert_eq!(err, LifecycleError::InvalidInput(RequestError::Empty));
        assert_eq!(session.phase(), &AnalysisPhase::Idle);
        assert!(session.notice().is_some());
    }

    #[tokio::test]
    async fn failed_analyzer_returns_to_idle() {
        let mut session = AnalysisSession::new();
        let err = session.submit(&DownAnalyzer, "terrible").await.unwrap_err();
        assert_eq!(err, LifecycleError::Failed("connection refused".into()));
        assert_eq!(session.phase(), &AnalysisPhase::Idle);
        assert_eq!(session.notice(), Some("Analysis request failed: connection refused"));
    }

    #[test]
    fn second_submission_while_analyzing_is_refused() {
        let mut session = AnalysisSession::new();
        session.begin("good").unwrap();
        assert!(!session.can_submit("good"));
        assert_eq!(session.begin("good"), Err(LifecycleError::AlreadyAnalyzing));
        assert!(session.is_analyzing());
    }

    #[tokio::test]
    async fn new_submission_restarts_from_result() {
        let mut session = AnalysisSession::new();
        let analyzer = LocalAnalyzer::default();
        session.submit(&analyzer, "awful").await.unwrap();
        assert!(session.can_submit("wonderful"));
        let result = session.submit(&analyzer, "wonderful").await.unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn completing_without_begin_is_rejected() {
        let mut session = AnalysisSession::new();
        let result = AnalysisResult {
            sentiment: Sentiment::Neutral,
            score: 50.0,
            confidence: 80.0,
            keywords: vec![],
        };
        assert_eq!(session.complete(result).unwrap_err(), LifecycleError::NotAnalyzing);
    }
}
