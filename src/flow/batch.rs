use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{error, info};

use crate::address::read_address_file;
use crate::batch::{BatchProgress, Batcher};
use crate::client::GeocodeClient;
use crate::error::GeocodeError;
use crate::models::{BatchRequest, GeocodeResponse};
use crate::response::{flatten, format_result};
use crate::transport::Transport;

pub const DEFAULT_INPUT_FILE: &str = "sample-addresses.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "address-output.txt";

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

#[derive(Debug, Default, PartialEq)]
pub struct BatchSummary {
    pub batches: usize,
    pub records: usize,
    /// Input lines dropped as malformed
    pub skipped: usize,
    /// Result lines written to the output file
    pub lines: usize,
}

/// Geocodes every address in `input` in batches of `batch_size` and writes one
/// line per match to `output`.
///
/// Only a zero batch size or a missing or unreadable input file fails the run.
/// A batch whose request fails contributes no lines; a failure writing the
/// output is logged.
pub fn run_batch<T: Transport>(
    client: &GeocodeClient<T>,
    batch_size: usize,
    input: &Path,
    output: &Path,
) -> Result<BatchSummary, GeocodeError> {
    let batcher = Batcher::new(batch_size)?;
    let address_file = read_address_file(input)?;
    let addresses = address_file.addresses;

    let mut progress = BatchProgress::new(addresses.len(), batcher.total_batches(addresses.len()));

    // One response per batch, failed batches hold an empty placeholder
    let mut responses = Vec::with_capacity(progress.total_batches);
    for chunk in batcher.split(&addresses) {
        progress.start_batch();
        let request = BatchRequest::from_chunk(chunk);
        responses.push(send_batch(client, &request));
        progress.record(chunk.len());
    }
    progress.finish();

    let lines: Vec<String> = responses
        .into_iter()
        .flat_map(flatten)
        .map(|result| format_result(&result))
        .collect();

    match write_results(&lines, output) {
        Ok(_) => info!("Results written to {}", output.display()),
        Err(err) => error!("An error occurred writing the output file: {}", err),
    }

    Ok(BatchSummary {
        batches: progress.batches_processed,
        records: progress.records_processed,
        skipped: address_file.skipped,
        lines: lines.len(),
    })
}

fn send_batch<T: Transport>(client: &GeocodeClient<T>, request: &BatchRequest) -> GeocodeResponse {
    match client.geocode_batch(request) {
        Ok(response) => response,
        Err(err) => {
            error!("An error occurred sending a batch to the geocoder: {}", err);
            GeocodeResponse::default()
        }
    }
}

fn write_results(lines: &[String], output: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(output)?);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(LINE_SEPARATOR.as_bytes())?;
    }
    writer.flush()
}
