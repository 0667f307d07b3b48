use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};

use crate::error::GeocodeError;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// JSON body, only set for POST requests
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self { method: Method::GET, url, body: None }
    }

    pub fn post_json(url: Url, body: String) -> Self {
        Self { method: Method::POST, url, body: Some(body) }
    }
}

/// Sends a request and hands back the raw response body.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<String, GeocodeError>;
}

/// Blocking HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, GeocodeError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(http))
    }

    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: HttpRequest) -> Result<String, GeocodeError> {
        debug!("{} {}", request.method, request.url.path());

        let mut builder = self.http.request(request.method, request.url);
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json; charset=UTF-8")
                .body(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(GeocodeError::Status { status: status.as_u16(), body });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use tokio::runtime::Runtime;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::GeocodeClient;
    use crate::config::Config;

    /// Transport that ignores any proxy settings of the test machine.
    fn local_transport() -> HttpTransport {
        let http = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpTransport::from_client(http)
    }

    /// Starts a mock geocoder; the blocking client is used outside the runtime.
    fn start_server(runtime: &Runtime, mock: Mock) -> MockServer {
        runtime.block_on(async {
            let server = MockServer::start().await;
            mock.mount(&server).await;
            server
        })
    }

    #[test]
    fn test_request_constructors() {
        let url = Url::parse("http://localhost/geocode").unwrap();

        let get = HttpRequest::get(url.clone());
        assert_eq!(get.method, Method::GET);
        assert!(get.body.is_none());

        let post = HttpRequest::post_json(url, "{}".into());
        assert_eq!(post.method, Method::POST);
        assert_eq!(post.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_post_sends_json_body() {
        let runtime = Runtime::new().unwrap();
        let server = start_server(
            &runtime,
            Mock::given(method("POST"))
                .and(path("/geocode_batch"))
                .and(header("content-type", "application/json; charset=UTF-8"))
                .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"geoResponse":{}}"#))
                .expect(1),
        );

        let url = Url::parse(&format!("{}/geocode_batch", server.uri())).unwrap();
        let body = local_transport()
            .send(HttpRequest::post_json(url, r#"{"locations":{"location":[]}}"#.into()))
            .unwrap();

        assert_eq!(body, r#"{"geoResponse":{}}"#);
    }

    #[test]
    fn test_error_status_keeps_body() {
        let runtime = Runtime::new().unwrap();
        let server = start_server(
            &runtime,
            Mock::given(method("GET"))
                .and(path("/geocode"))
                .respond_with(ResponseTemplate::new(403).set_body_string("Developer Inactive")),
        );

        let url = Url::parse(&format!("{}/geocode", server.uri())).unwrap();
        match local_transport().send(HttpRequest::get(url)) {
            Err(GeocodeError::Status { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "Developer Inactive");
            }
            other => panic!("Expected error status, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_error_hides_api_key() {
        let mut config = Config::new("SECRETKEY123");
        // Port 9 (discard) on localhost is not expected to accept HTTP
        config.single_endpoint = "http://127.0.0.1:9/geocode".into();
        let client = GeocodeClient::new(&config, local_transport()).unwrap();

        let err = client.geocode("x").unwrap_err();

        assert!(matches!(err, GeocodeError::Transport(_)));
        assert!(!err.to_string().contains("SECRETKEY123"));
        assert!(!format!("{:?}", err).contains("SECRETKEY123"));
    }
}
