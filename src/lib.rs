//! Client for the TomTom geocoding API: single address lookups and batched
//! lookups of pipe-delimited address files.

pub mod address;
pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod models;
pub mod response;
pub mod transport;

pub use address::{parse_address_line, read_address_file, AddressFile};
pub use batch::{BatchProgress, Batcher};
pub use client::GeocodeClient;
pub use config::{Config, ConfigError};
pub use error::GeocodeError;
pub use models::{AddressInput, BatchRequest, GeoResult, GeocodeRequestRecord, GeocodeResponse};
pub use response::{flatten, format_console, format_result};
pub use transport::{HttpRequest, HttpTransport, Transport};
