use crate::domain::ingestion::SchedulerConfig;
use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_SCRAPER_INTERVAL_SECONDS: u64 = 60;
const DEFAULT_SCRAPER_CONCURRENCY: usize = 10;
const DEFAULT_FEED_REFRESH_INTERVAL_SECONDS: u64 = 60;
const DEFAULT_FEED_FETCH_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Feed scraper
    pub scraper_interval_seconds: u64,
    pub scraper_concurrency: usize,
    pub feed_refresh_interval_seconds: u64,
    pub feed_fetch_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            scraper_interval_seconds: positive_or(
                env::var("SCRAPER_INTERVAL_SECONDS").ok(),
                DEFAULT_SCRAPER_INTERVAL_SECONDS,
            )?,
            scraper_concurrency: positive_or(
                env::var("SCRAPER_CONCURRENCY").ok(),
                DEFAULT_SCRAPER_CONCURRENCY,
            )?,
            feed_refresh_interval_seconds: positive_or(
                env::var("FEED_REFRESH_INTERVAL_SECONDS").ok(),
                DEFAULT_FEED_REFRESH_INTERVAL_SECONDS,
            )?,
            feed_fetch_timeout_seconds: positive_or(
                env::var("FEED_FETCH_TIMEOUT_SECONDS").ok(),
                DEFAULT_FEED_FETCH_TIMEOUT_SECONDS,
            )?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            interval: Duration::from_secs(self.scraper_interval_seconds),
            refresh_interval: Duration::from_secs(self.feed_refresh_interval_seconds),
            concurrency: self.scraper_concurrency,
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_fetch_timeout_seconds)
    }
}

/// Parse an optional setting; missing or zero falls back to `default`
fn positive_or<T>(value: Option<String>, default: T) -> Result<T, std::num::ParseIntError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError> + PartialEq + Default,
{
    match value {
        None => Ok(default),
        Some(raw) => {
            let parsed = raw.trim().parse::<T>()?;
            Ok(if parsed == T::default() { default } else { parsed })
        }
    }
}
