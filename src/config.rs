use crate::dashboard::DEFAULT_REFRESH_INTERVAL;
use reqwest::Url;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PRODUCTS_URL: &str = "https://dummyjson.com/products";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid product url {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidSeconds { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub products_url: Url,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let raw_url = lookup("PRODUCTS_URL").unwrap_or_else(|| DEFAULT_PRODUCTS_URL.to_string());
        let products_url = Url::parse(&raw_url).map_err(|err| ConfigError::InvalidUrl {
            reason: err.to_string(),
            value: raw_url.clone(),
        })?;

        Ok(Self {
            port,
            products_url,
            refresh_interval: seconds(&lookup, "REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL)?,
            request_timeout: seconds(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT)?,
        })
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.products_url.as_str(), DEFAULT_PRODUCTS_URL);
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("PRODUCTS_URL", "http://127.0.0.1:4000/products"),
            ("REFRESH_INTERVAL_SECS", "5"),
            ("REQUEST_TIMEOUT_SECS", "2"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.products_url.port(), Some(4000));
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "not-a-port")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = config_from(&[("REFRESH_INTERVAL_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeconds { key: "REFRESH_INTERVAL_SECS", .. }));
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = config_from(&[("PRODUCTS_URL", "/products")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
