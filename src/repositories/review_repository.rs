use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::Error as DieselError;
use diesel::dsl::{count_star, sum};
use thiserror::Error;

use crate::{
    models::review_models::{NewReview, Review},
    schema::reviews,
    DbPool,
};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Failed to get DB connection: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Database error: {0}")]
    Query(#[from] DieselError),
}

/// Per-sentiment totals over every stored review.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SentimentTotals {
    pub positive: i64,
    pub neutral: i64,
    pub negative: i64,
    pub score_sum: i64,
}

impl SentimentTotals {
    pub fn total(&self) -> i64 {
        self.positive + self.neutral + self.negative
    }
}

pub struct ReviewRepository {
    pool: DbPool,
}

impl ReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, RepositoryError> {
        Ok(self.pool.get()?)
    }

    /// Stores a review and returns its id.
    pub fn create_review(&self, new_review: &NewReview) -> Result<i32, RepositoryError> {
        let mut conn = self.conn()?;
        let id = conn.transaction::<_, DieselError, _>(|conn| {
            diesel::insert_into(reviews::table)
                .values(new_review)
                .execute(conn)?;
            reviews::table
                .select(reviews::id)
                .order(reviews::id.desc())
                .first::<i32>(conn)
        })?;
        Ok(id)
    }

    /// Newest first.
    pub fn get_recent_reviews(&self, limit: i64) -> Result<Vec<Review>, RepositoryError> {
        let mut conn = self.conn()?;
        let recent = reviews::table
            .select(Review::as_select())
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .limit(limit)
            .load::<Review>(&mut conn)?;
        Ok(recent)
    }

    pub fn get_sentiment_totals(&self) -> Result<SentimentTotals, RepositoryError> {
        let mut conn = self.conn()?;
        let counts = reviews::table
            .group_by(reviews::sentiment)
            .select((reviews::sentiment, count_star()))
            .load::<(String, i64)>(&mut conn)?;
        let score_sum = reviews::table
            .select(sum(reviews::score))
            .first::<Option<i64>>(&mut conn)?
            .unwrap_or(0);

        let mut totals = SentimentTotals {
            score_sum,
            ..Default::default()
        };
        for (sentiment, count) in counts {
            match sentiment.as_str() {
                "Positive" => totals.positive += count,
                "Negative" => totals.negative += count,
                "Neutral" => totals.neutral += count,
                other => tracing::warn!("Skipping reviews with unknown sentiment {}", other),
            }
        }
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(text: &str, sentiment: &str, created_at: i64) -> NewReview {
        NewReview {
            text: text.to_string(),
            sentiment: sentiment.to_string(),
            score: 50,
            confidence: 80.0,
            created_at,
        }
    }

    #[test]
    fn timestamps_past_2038_round_trip() {
        let repository = ReviewRepository::new(crate::init_pool(":memory:").unwrap());
        // 2100-01-01T00:00:00Z, beyond i32::MAX seconds.
        let far_future = 4_102_444_800;
        repository.create_review(&review("now", "Neutral", 1_750_000_000)).unwrap();
        let id = repository.create_review(&review("later", "Positive", far_future)).unwrap();

        let recent = repository.get_recent_reviews(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, id);
        assert_eq!(recent[0].created_at, far_future);
        assert_eq!(recent[1].created_at, 1_750_000_000);
    }

    #[test]
    fn totals_group_by_sentiment() {
        let repository = ReviewRepository::new(crate::init_pool(":memory:").unwrap());
        for (sentiment, at) in [("Positive", 1), ("Positive", 2), ("Negative", 3)] {
            repository.create_review(&review("text", sentiment, at)).unwrap();
        }
        let totals = repository.get_sentiment_totals().unwrap();
        assert_eq!(totals.positive, 2);
        assert_eq!(totals.negative, 1);
        assert_eq!(totals.neutral, 0);
        assert_eq!(totals.score_sum, 150);
    }
}
