use log::debug;
use reqwest::Url;

use crate::config::Config;
use crate::error::GeocodeError;
use crate::models::{BatchRequest, GeocodeResponse};
use crate::transport::{HttpRequest, HttpTransport, Transport};

/// Geocoding API client. Builds the request URLs from the configuration and
/// decodes responses; the actual HTTP exchange goes through `T`.
pub struct GeocodeClient<T: Transport> {
    transport: T,
    api_key: String,
    single_url: Url,
    batch_url: Url,
}

impl GeocodeClient<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self, GeocodeError> {
        let transport = HttpTransport::new(config.timeout)?;
        Self::new(config, transport)
    }

    /// Loads the configuration from the environment and builds an HTTP client
    /// from it.
    pub fn from_env() -> Result<(Config, Self), GeocodeError> {
        let config = Config::from_env()?;
        let client = Self::from_config(&config)?;
        Ok((config, client))
    }
}

impl<T: Transport> GeocodeClient<T> {
    pub fn new(config: &Config, transport: T) -> Result<Self, GeocodeError> {
        Ok(Self {
            transport,
            api_key: config.api_key.clone(),
            single_url: parse_endpoint(&config.single_endpoint)?,
            batch_url: parse_endpoint(&config.batch_endpoint)?,
        })
    }

    /// Looks up one free-form address with a GET request.
    pub fn geocode(&self, address: &str) -> Result<GeocodeResponse, GeocodeError> {
        let mut url = self.endpoint(&self.single_url);
        url.query_pairs_mut().append_pair("query", address);

        self.execute(HttpRequest::get(url))
    }

    /// Posts a batch of addresses to the batch geocoder.
    pub fn geocode_batch(&self, request: &BatchRequest) -> Result<GeocodeResponse, GeocodeError> {
        let body = serde_json::to_string(request)?;
        let url = self.endpoint(&self.batch_url);

        self.execute(HttpRequest::post_json(url, body))
    }

    fn endpoint(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("key", &self.api_key);
        url
    }

    fn execute(&self, request: HttpRequest) -> Result<GeocodeResponse, GeocodeError> {
        let body = self.transport.send(request)?;
        debug!("{}", body);

        Ok(serde_json::from_str(&body)?)
    }
}

fn parse_endpoint(url: &str) -> Result<Url, GeocodeError> {
    Url::parse(url).map_err(|err| GeocodeError::InvalidEndpoint {
        url: url.to_owned(),
        reason: err.to_string(),
    })
}
