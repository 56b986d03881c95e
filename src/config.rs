use thiserror::Error;

use crate::scoring::scorer::{InvalidBand, NeutralBand};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error(transparent)]
    NeutralBand(#[from] InvalidBand),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub frontend_url: String,
    pub neutral_band: NeutralBand,
    pub sentry_dsn: Option<String>,
}

impl AppConfig {
    /// Reads the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "sentiment.db".to_string());
        let frontend_url = lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:8080".to_string());

        let port = match lookup("ENVIRONMENT").as_deref() {
            Some("staging") => 3100,
            _ => parse_or(&lookup, "PORT", 3000)?,
        };

        let defaults = NeutralBand::default();
        let neutral_band = NeutralBand::new(
            parse_or(&lookup, "NEUTRAL_CONFIDENCE_MIN", defaults.min())?,
            parse_or(&lookup, "NEUTRAL_CONFIDENCE_MAX", defaults.max())?,
        )?;

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());

        Ok(Self {
            database_url,
            port,
            frontend_url,
            neutral_band,
            sentry_dsn,
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
