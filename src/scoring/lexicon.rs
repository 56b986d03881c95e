/// Default vocabulary that pulls a review towards `Positive`.
pub const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "best",
    "fantastic",
    "wonderful",
    "perfect",
    "awesome",
];

/// Default vocabulary that pulls a review towards `Negative`.
pub const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "worst",
    "horrible",
    "disgusting",
    "disappointing",
    "useless",
    "poor",
];

/// Splits lowercased text into word tokens.
///
/// A token is a run of alphanumeric characters; apostrophes are kept when
/// they sit inside a word ("don't") and stripped at the edges ("'great'").
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|token| token.trim_matches('\''))
        .filter(|token| !token.is_empty())
}

/// Distinct vocabulary hits, in the order they first occur in the text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LexiconMatches {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(POSITIVE_WORDS, NEGATIVE_WORDS)
    }
}

impl Lexicon {
    pub fn new(positive: &[&str], negative: &[&str]) -> Self {
        Self {
            positive: positive.iter().map(|w| w.to_lowercase()).collect(),
            negative: negative.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    pub fn negative(&self) -> &[String] {
        &self.negative
    }

    /// Matches already-normalised (lowercase) text against both vocabularies.
    pub fn find_matches(&self, normalized: &str) -> LexiconMatches {
        let mut matches = LexiconMatches::default();
        for token in tokenize(normalized) {
            if self.positive.iter().any(|w| w == token) {
                push_distinct(&mut matches.positive, token);
            } else if self.negative.iter().any(|w| w == token) {
                push_distinct(&mut matches.negative, token);
            }
        }
        matches
    }
}

fn push_distinct(found: &mut Vec<String>, token: &str) {
    if !found.iter().any(|w| w == token) {
        found.push(token.to_string());
    }
}
