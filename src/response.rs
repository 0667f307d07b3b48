use log::{debug, warn};
use serde_json::Value;

use crate::error::GeocodeError;
use crate::models::{GeoResult, GeoResults, GeocodeResponse};

impl GeocodeResponse {
    /// Every match in the response, in the order the server returned them.
    pub fn into_results(self) -> Result<Vec<GeoResult>, GeocodeError> {
        let geo_response = match self.geo_response {
            Some(geo_response) => geo_response,
            None => {
                return Err(GeocodeError::InvalidResponseShape(
                    Value::Object(self.other).to_string(),
                ))
            }
        };

        Ok(match geo_response.geo_result {
            Some(GeoResults::Many(entries)) => entries.into_iter().filter_map(decode_result).collect(),
            Some(GeoResults::One(entry)) => decode_result(entry).into_iter().collect(),
            None => {
                debug!("Response contained no geoResult");
                Vec::new()
            }
        })
    }
}

fn decode_result(entry: Value) -> Option<GeoResult> {
    if !entry.is_object() {
        warn!("Skipping geoResult entry that is not an object: {}", entry);
        return None;
    }

    match serde_json::from_value(entry) {
        Ok(result) => Some(result),
        Err(err) => {
            warn!("Skipping unreadable geoResult entry: {}", err);
            None
        }
    }
}

/// Like [`GeocodeResponse::into_results`], but logs an invalid response and
/// yields no results instead of failing.
pub fn flatten(response: GeocodeResponse) -> Vec<GeoResult> {
    match response.into_results() {
        Ok(results) => results,
        Err(err) => {
            warn!("{}", err);
            Vec::new()
        }
    }
}

/// Output file line: `formattedAddress|latitude, longitude`
pub fn format_result(result: &GeoResult) -> String {
    format!(
        "{}|{}, {}",
        result.formatted_address,
        format_coordinate(result.latitude),
        format_coordinate(result.longitude)
    )
}

/// Console line: `formattedAddress - latitude, longitude`
pub fn format_console(result: &GeoResult) -> String {
    format!(
        "{} - {}, {}",
        result.formatted_address,
        format_coordinate(result.latitude),
        format_coordinate(result.longitude)
    )
}

// Whole numbers keep one decimal place so 0 prints as "0.0"
fn format_coordinate(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
