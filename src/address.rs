use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{info, warn};

use crate::error::GeocodeError;
use crate::models::{AddressInput, GeocodeRequestRecord};

const FIELD_DELIMITER: u8 = b'|';
const FIELD_COUNT: usize = 6;

/// Addresses read from an input file, plus how many lines had to be dropped.
#[derive(Debug, Default)]
pub struct AddressFile {
    pub addresses: Vec<AddressInput>,
    pub skipped: usize,
}

impl AddressInput {
    /// Builds an address from its fields in file order. Fields past the sixth are
    /// ignored.
    pub fn from_fields<'a, I>(line: u64, fields: I) -> Result<Self, GeocodeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().take(FIELD_COUNT).collect();
        if fields.len() < FIELD_COUNT {
            return Err(GeocodeError::MalformedRecord { line, fields: fields.len() });
        }

        Ok(AddressInput {
            street_number: fields[0].to_owned(),
            street_name: fields[1].to_owned(),
            city: fields[2].to_owned(),
            state: fields[3].to_owned(),
            postal_code: fields[4].to_owned(),
            country: fields[5].to_owned(),
        })
    }

    pub fn to_request_record(&self) -> GeocodeRequestRecord {
        GeocodeRequestRecord {
            street_number: self.street_number.clone(),
            street_name: self.street_name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        }
    }
}

/// Parses one `street number|street name|city|state|postal code|country` line.
pub fn parse_address_line(line: &str) -> Result<AddressInput, GeocodeError> {
    AddressInput::from_fields(1, line.split(FIELD_DELIMITER as char))
}

pub fn read_address_file<P: AsRef<Path>>(path: P) -> Result<AddressFile, GeocodeError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(GeocodeError::MissingInputFile(path.to_path_buf()));
    }

    info!("Reading addresses from {}", path.display());
    read_addresses(File::open(path)?)
}

fn read_addresses<R: Read>(reader: R) -> Result<AddressFile, GeocodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut file = AddressFile::default();
    for record in reader.byte_records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let parsed = StringRecord::from_byte_record(record)
            .map_err(|_| GeocodeError::NotUtf8 { line })
            .and_then(|record| AddressInput::from_fields(line, record.iter()));
        match parsed {
            Ok(address) => file.addresses.push(address),
            Err(err) => {
                warn!("Skipping address: {}", err);
                file.skipped += 1;
            }
        }
    }

    info!("Read {} addresses ({} skipped)", file.addresses.len(), file.skipped);
    Ok(file)
}
