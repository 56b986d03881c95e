use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scoring::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sentiment: {0}")]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            _ => Err(UnknownSentiment(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// 0-100. Locally scored results are whole numbers; remote ones may not be.
    pub score: f32,
    pub confidence: f32,
    pub keywords: Vec<String>,
}

/// Linear rule `base + step * matches`, held at `bound`.
///
/// A non-negative step treats `bound` as a ceiling, a negative step as a
/// floor. The result always lands in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassRule {
    pub base: i32,
    pub step: i32,
    pub bound: i32,
}

impl ClassRule {
    pub const fn new(base: i32, step: i32, bound: i32) -> Self {
        Self { base, step, bound }
    }

    pub fn apply(&self, matches: usize) -> u8 {
        let matches = i32::try_from(matches).unwrap_or(i32::MAX);
        let raw = self.base.saturating_add(self.step.saturating_mul(matches));
        let held = if self.step >= 0 {
            raw.min(self.bound)
        } else {
            raw.max(self.bound)
        };
        held.clamp(0, 100) as u8
    }
}

/// Band the Neutral confidence is drawn from, `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeutralBand {
    min: u8,
    max: u8,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid neutral confidence band {min}..{max}")]
pub struct InvalidBand {
    pub min: u8,
    pub max: u8,
}

impl Default for NeutralBand {
    fn default() -> Self {
        Self { min: 70, max: 90 }
    }
}

impl NeutralBand {
    pub fn new(min: u8, max: u8) -> Result<Self, InvalidBand> {
        if min > max || max > 100 {
            return Err(InvalidBand { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }
}

#[derive(Debug, Clone)]
pub struct ScoringRules {
    pub positive_confidence: ClassRule,
    pub positive_score: ClassRule,
    pub negative_confidence: ClassRule,
    pub negative_score: ClassRule,
    pub neutral_score: u8,
    pub neutral_band: NeutralBand,
    pub neutral_keywords: Vec<String>,
    pub keyword_limit: usize,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            positive_confidence: ClassRule::new(85, 5, 95),
            positive_score: ClassRule::new(60, 10, 95),
            negative_confidence: ClassRule::new(80, 5, 95),
            negative_score: ClassRule::new(40, -10, 5),
            neutral_score: 50,
            neutral_band: NeutralBand::default(),
            neutral_keywords: vec!["neutral".into(), "average".into(), "okay".into()],
            keyword_limit: 5,
        }
    }
}

impl ScoringRules {
    pub fn with_neutral_band(mut self, band: NeutralBand) -> Self {
        self.neutral_band = band;
        self
    }
}

/// Word-list sentiment heuristic.
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    lexicon: Lexicon,
    rules: ScoringRules,
}

impl SentimentScorer {
    pub fn new(lexicon: Lexicon, rules: ScoringRules) -> Self {
        Self { lexicon, rules }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Scores `text`, returning `None` for blank input.
    pub fn score(&self, text: &str) -> Option<AnalysisResult> {
        self.score_with_rng(text, &mut rand::thread_rng())
    }

    /// Like [`score`](Self::score) with the randomness source supplied by the caller.
    pub fn score_with_rng<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Option<AnalysisResult> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.evaluate(text, rng))
    }

    /// Total over all strings; blank text falls through to Neutral.
    pub(crate) fn evaluate<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> AnalysisResult {
        let normalized = text.to_lowercase();
        let matches = self.lexicon.find_matches(&normalized);
        let positive_count = matches.positive.len();
        let negative_count = matches.negative.len();
        let limit = self.rules.keyword_limit;

        if positive_count > negative_count {
            AnalysisResult {
                sentiment: Sentiment::Positive,
                score: f32::from(self.rules.positive_score.apply(positive_count)),
                confidence: f32::from(self.rules.positive_confidence.apply(positive_count)),
                keywords: matches.positive.into_iter().take(limit).collect(),
            }
        } else if negative_count > positive_count {
            AnalysisResult {
                sentiment: Sentiment::Negative,
                score: f32::from(self.rules.negative_score.apply(negative_count)),
                confidence: f32::from(self.rules.negative_confidence.apply(negative_count)),
                keywords: matches.negative.into_iter().take(limit).collect(),
            }
        } else {
            AnalysisResult {
                sentiment: Sentiment::Neutral,
                score: f32::from(self.rules.neutral_score),
                confidence: f32::from(self.rules.neutral_band.sample(rng)),
                keywords: self.rules.neutral_keywords.iter().take(limit).cloned().collect(),
            }
        }
    }
}
