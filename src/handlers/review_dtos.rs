use serde::{Deserialize, Deserializer, Serialize};

use crate::scoring::scorer::Sentiment;

#[derive(Deserialize, Serialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Row shape of `GET /get-reviews`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReviewSummary {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub text: String,
    pub sentiment: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReviewSubmission {
    pub text: String,
    pub sentiment: Sentiment,
    pub score: i32,
    pub confidence: f32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SubmitReviewResponse {
    pub message: String,
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
}

#[derive(Deserialize)]
pub struct ReviewListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardStats {
    pub total: i64,
    pub positive: i64,
    pub neutral: i64,
    pub negative: i64,
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
    pub average_score: f64,
}

/// Ids go out as strings; older backends sent bare integers.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
