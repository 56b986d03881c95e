use dotenvy::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use sentiment_backend::{
    build_router, init_pool,
    config::AppConfig,
    scoring::{lexicon::Lexicon, scorer::{ScoringRules, SentimentScorer}},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sentiment_backend=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = AppConfig::from_env()?;
    let _guard = sentry::init(sentry::ClientOptions {
        dsn: config.sentry_dsn.as_deref().and_then(|dsn| dsn.parse().ok()),
        release: sentry::release_name!(),
        ..Default::default()
    });

    let pool = init_pool(&config.database_url)?;
    let scorer = SentimentScorer::new(
        Lexicon::default(),
        ScoringRules::default().with_neutral_band(config.neutral_band),
    );
    let state = Arc::new(AppState::new(pool, scorer));
    let app = build_router(state, &config.frontend_url)?;

    tracing::info!("Starting server on port {}", config.port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
