use std::{env, fmt::Display, str::FromStr, time::Duration};

use pulse_engine::FetchSettings;
use pulse_logging::pulse_info;
use thiserror::Error;

/// Origins the dashboard frontend is served from.
const DEFAULT_ORIGINS: &str = "https://git-pulse.vercel.app,https://localhost:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Ceiling on one whole lookup, across all of its upstream calls.
    pub overall_deadline: Duration,
    pub max_body_bytes: u64,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let origins: String = try_load("PULSE_ALLOWED_ORIGINS", DEFAULT_ORIGINS)?;
        let allowed_origins = origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            port: try_load("PULSE_PORT", "5000")?,
            connect_timeout: Duration::from_millis(try_load("PULSE_CONNECT_TIMEOUT_MS", "10000")?),
            request_timeout: Duration::from_millis(try_load("PULSE_REQUEST_TIMEOUT_MS", "30000")?),
            overall_deadline: Duration::from_millis(try_load("PULSE_DEADLINE_MS", "45000")?),
            max_body_bytes: try_load("PULSE_MAX_BODY_BYTES", "2097152")?,
            allowed_origins,
        })
    }

    /// The engine settings this configuration selects. Redirect policy and
    /// User-Agent keep their built-in defaults.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            overall_deadline: self.overall_deadline,
            max_bytes: self.max_body_bytes,
            ..FetchSettings::default()
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = match env::var(key) {
        Ok(value) => value,
        Err(_) => {
            pulse_info!("{} not set, using default: {}", key, default);
            default.to_string()
        }
    };
    raw.parse().map_err(|err: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        message: err.to_string(),
    })
}
