use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One line of the address input file, fields in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressInput {
    pub street_number: String,
    pub street_name: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// An address in the batch geocoder's compact field schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeRequestRecord {
    #[serde(rename = "ST")]
    pub street_number: String,
    #[serde(rename = "T")]
    pub street_name: String,
    #[serde(rename = "L")]
    pub city: String,
    #[serde(rename = "AA")]
    pub state: String,
    #[serde(rename = "PC")]
    pub postal_code: String,
    #[serde(rename = "CN")]
    pub country: String,
}

#[derive(Debug, Default, Serialize)]
pub struct Locations {
    pub location: Vec<GeocodeRequestRecord>,
}

/// Body of a batch geocode POST: `{"locations":{"location":[...]}}`
#[derive(Debug, Default, Serialize)]
pub struct BatchRequest {
    pub locations: Locations,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(rename = "geoResponse")]
    pub geo_response: Option<GeoResponse>,
    /// Everything else the server sent, kept for error reporting
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeoResponse {
    #[serde(rename = "geoResult")]
    pub geo_result: Option<GeoResults>,
}

/// The geocoder returns a bare object when there is exactly one match and an
/// array otherwise. Entries stay raw so that one bad element can be skipped on
/// its own.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GeoResults {
    Many(Vec<Value>),
    One(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub formatted_address: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: f64,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()).unwrap_or(0.0))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
