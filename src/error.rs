use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The batch input file does not exist. Aborts the whole run.
    #[error("The specified input file does not exist: {}", .0.display())]
    MissingInputFile(PathBuf),

    /// An address line had fewer than the six expected fields
    #[error("Malformed address record on line {line}: expected 6 fields, found {fields}")]
    MalformedRecord { line: u64, fields: usize },

    #[error("Address record on line {line} is not valid UTF-8")]
    NotUtf8 { line: u64 },

    #[error("Batch size must be positive")]
    InvalidBatchSize,

    #[error("Invalid endpoint URL {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Never carries the request URL, which holds the API key
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    #[error("Geocoder returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not parse the JSON response from the server: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// The response had no `geoResponse` node, usually an API error payload
    #[error("An invalid response was received: {0}")]
    InvalidResponseShape(String),

    #[error("Invalid address data: {0}")]
    InvalidData(#[from] csv::Error),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(error: reqwest::Error) -> Self {
        GeocodeError::Transport(error.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err = GeocodeError::from(ConfigError::Missing("GEOCODE_API_KEY"));
        assert_eq!(err.to_string(), "Configuration error: GEOCODE_API_KEY must be set");
    }
}
