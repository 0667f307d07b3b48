use std::process;

use clap::Parser;
use log::error;

use geocoding_sample::flow::{run_single, DEFAULT_ADDRESS};
use geocoding_sample::GeocodeClient;

/// Looks up a single address with the TomTom geocoding API.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Free-form address to geocode
    #[arg(default_value = DEFAULT_ADDRESS)]
    address: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (_config, client) = match GeocodeClient::from_env() {
        Ok(setup) => setup,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    run_single(&client, &args.address);
}
