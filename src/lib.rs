use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod scoring {
    pub mod lexicon;
    pub mod scorer;
}
pub mod analysis {
    pub mod analyzer;
    pub mod lifecycle;
    pub mod request;
}
pub mod api {
    pub mod analyzer_client;
}
pub mod handlers {
    pub mod analysis_handlers;
    pub mod review_dtos;
    pub mod review_handlers;
}
pub mod models {
    pub mod review_models;
}
pub mod repositories {
    pub mod review_repository;
}
pub mod schema;

use handlers::{analysis_handlers, review_handlers};
use repositories::review_repository::ReviewRepository;
use scoring::scorer::SentimentScorer;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub struct AppState {
    pub review_repository: Arc<ReviewRepository>,
    pub scorer: SentimentScorer,
}

impl AppState {
    pub fn new(pool: DbPool, scorer: SentimentScorer) -> Self {
        Self {
            review_repository: Arc::new(ReviewRepository::new(pool)),
            scorer,
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}

/// Builds the connection pool and brings the schema up to date.
///
/// An in-memory database lives and dies with its connection, so it gets a
/// pool of exactly one.
pub fn init_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let mut builder = r2d2::Pool::builder();
    if database_url == ":memory:" {
        builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
    }
    let pool = builder.build(manager)?;
    let mut pooled = pool.get()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    if !applied.is_empty() {
        tracing::info!("Applied {} migration(s)", applied.len());
    }
    Ok(pool)
}

pub fn build_router(state: Arc<AppState>, frontend_url: &str) -> anyhow::Result<Router> {
    let origin: HeaderValue = frontend_url.parse()?;
    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/analyze", post(analysis_handlers::analyze))
        .route("/get-reviews", get(review_handlers::get_reviews))
        .route("/api/submit-review", post(review_handlers::submit_review))
        .route("/api/dashboard/stats", get(review_handlers::get_dashboard_stats))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_origin(AllowOrigin::exact(origin))
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    header::ORIGIN,
                ])
                .allow_credentials(true)
        )
        .with_state(state);
    Ok(app)
}
