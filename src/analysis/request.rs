use serde::Serialize;
use thiserror::Error;

pub const MAX_TEXT_CHARS: usize = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Text must not be empty")]
    Empty,
    #[error("Text is {0} characters, the limit is 1000")]
    TooLong(usize),
}

/// A validated submission: non-blank and at most [`MAX_TEXT_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    text: String,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Result<Self, RequestError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RequestError::Empty);
        }
        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(RequestError::TooLong(chars));
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
