use std::convert::Infallible;
use std::future::{self, Future};

use crate::analysis::request::AnalysisRequest;
use crate::scoring::scorer::{AnalysisResult, SentimentScorer};

/// Anything that can turn a validated request into a result: the in-process
/// scorer or the HTTP service.
pub trait Analyzer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisResult, Self::Error>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct LocalAnalyzer {
    scorer: SentimentScorer,
}

impl LocalAnalyzer {
    pub fn new(scorer: SentimentScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }
}

impl Analyzer for LocalAnalyzer {
    type Error = Infallible;

    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisResult, Self::Error>> + Send {
        let result = self.scorer.evaluate(request.text(), &mut rand::thread_rng());
        future::ready(Ok(result))
    }
}
