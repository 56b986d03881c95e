use diesel::prelude::*;
use crate::schema::reviews;

#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Review {
    pub id: i32,
    pub text: String,
    pub sentiment: String, // "Positive", "Neutral" or "Negative"
    pub score: i32, // 0-100
    pub confidence: f32, // 0-100
    pub created_at: i64, // unix timestamp
}

#[derive(Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReview {
    pub text: String,
    pub sentiment: String,
    pub score: i32,
    pub confidence: f32,
    pub created_at: i64,
}
