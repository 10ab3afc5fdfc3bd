use std::process::ExitCode;

use clap::Parser;
use fleet_control_aws::adapters::appstream::AppStreamClientFactory;
use fleet_control_aws::cli::{run, Args};
use fleet_control_core::{init_logging, LoggingConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(LoggingConfig::console(args.verbosity()));

    match run(&args, &AppStreamClientFactory) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => ExitCode::from(error.exit_code()),
    }
}
