use std::env;
use std::time::Duration;

use dotenv::dotenv;
use thiserror::Error;

pub const DEFAULT_BATCH_ENDPOINT: &str = "https://api.tomtom.com/lbs/geocoding/geocode_batch";
pub const DEFAULT_SINGLE_ENDPOINT: &str = "https://api.tomtom.com/lbs/geocoding/geocode";

// The batch geocoder accepts at most 100 addresses per request
pub const DEFAULT_BATCH_SIZE: usize = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_VAR: &str = "GEOCODE_API_KEY";
const BATCH_ENDPOINT_VAR: &str = "GEOCODE_BATCH_URL";
const SINGLE_ENDPOINT_VAR: &str = "GEOCODE_URL";
const BATCH_SIZE_VAR: &str = "GEOCODE_BATCH_SIZE";
const TIMEOUT_VAR: &str = "GEOCODE_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} must be a positive integer, got {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub batch_endpoint: String,
    pub single_endpoint: String,
    pub batch_size: usize,
    pub timeout: Duration,
}

impl Config {
    /// Builds a configuration with the default TomTom endpoints and limits.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            batch_endpoint: DEFAULT_BATCH_ENDPOINT.into(),
            single_endpoint: DEFAULT_SINGLE_ENDPOINT.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Loads the configuration from the environment, reading a `.env` file first
    /// if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing(API_KEY_VAR))?;

        let mut config = Config::new(api_key);

        if let Some(url) = lookup(BATCH_ENDPOINT_VAR) {
            config.batch_endpoint = url;
        }
        if let Some(url) = lookup(SINGLE_ENDPOINT_VAR) {
            config.single_endpoint = url;
        }
        if let Some(size) = lookup(BATCH_SIZE_VAR) {
            config.batch_size = parse_positive(BATCH_SIZE_VAR, &size)? as usize;
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            config.timeout = Duration::from_secs(parse_positive(TIMEOUT_VAR, &secs)?);
        }

        Ok(config)
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::Invalid { var, value: value.to_owned() })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_only_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.batch_endpoint, DEFAULT_BATCH_ENDPOINT);
        assert_eq!(config.single_endpoint, DEFAULT_SINGLE_ENDPOINT);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(API_KEY_VAR));

        let err = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(API_KEY_VAR));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (BATCH_ENDPOINT_VAR, "http://localhost:8080/batch"),
            (SINGLE_ENDPOINT_VAR, "http://localhost:8080/single"),
            (BATCH_SIZE_VAR, "25"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.batch_endpoint, "http://localhost:8080/batch");
        assert_eq!(config.single_endpoint, "http://localhost:8080/single");
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_batch_size() {
        for value in ["0", "-3", "lots"] {
            let err = Config::from_lookup(lookup_from(&[
                (API_KEY_VAR, "secret"),
                (BATCH_SIZE_VAR, value),
            ]))
            .unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid { var: BATCH_SIZE_VAR, value: value.to_string() }
            );
        }
    }
}
