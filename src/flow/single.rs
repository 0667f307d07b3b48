use log::{error, info};

use crate::client::GeocodeClient;
use crate::response::{flatten, format_console};
use crate::transport::Transport;

pub const DEFAULT_ADDRESS: &str = "11 Lafayette St, Lebanon, NH";

/// Geocodes one address and logs every match. Returns the logged lines; a
/// failed call is logged and yields nothing.
pub fn run_single<T: Transport>(client: &GeocodeClient<T>, address: &str) -> Vec<String> {
    info!("Geocoding \"{}\"", address);

    let response = match client.geocode(address) {
        Ok(response) => response,
        Err(err) => {
            error!("An error occurred calling the Geocoding API: {}", err);
            return Vec::new();
        }
    };

    let lines: Vec<String> = flatten(response).iter().map(format_console).collect();
    for line in &lines {
        info!("{}", line);
    }
    lines
}
