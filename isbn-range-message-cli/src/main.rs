use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use isbn_range_message::{
    Config, DEFAULT_OUTPUT_DIRECTORY, OUTPUT_DIRECTORY_ENV, convert_in_directory,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Convert RangeMessage.xml into RangeMessage.csv.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding RangeMessage.xml; RangeMessage.csv is written next to it
    #[arg(long, env = OUTPUT_DIRECTORY_ENV, default_value = DEFAULT_OUTPUT_DIRECTORY)]
    output_directory: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = Config::new(args.output_directory);

    match convert_in_directory(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
