use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use geocoding_sample::flow::{run_batch, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
use geocoding_sample::GeocodeClient;

/// Geocodes a pipe-delimited address file with the TomTom batch geocoding API.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Input file, one `number|street|city|state|postal code|country` per line
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Output file, one `address|latitude, longitude` per line
    #[arg(default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (config, client) = match GeocodeClient::from_env() {
        Ok(setup) => setup,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    match run_batch(&client, config.batch_size, &args.input, &args.output) {
        Ok(summary) => info!(
            "Done: {} batches, {} records, {} skipped lines, {} results",
            summary.batches, summary.records, summary.skipped, summary.lines
        ),
        // A missing input file ends the run without output, not with a failure status
        Err(err) => error!("{}", err),
    }
}
