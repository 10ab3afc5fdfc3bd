use std::path::PathBuf;

use clap::Parser;
use fleet_control_core::{
    run_fleet_action, FleetAction, FleetActionOutcome, FleetClientFactory, FleetControlError,
    FleetRequest, ModeSelectionError, Verbosity, DEFAULT_CONFIG_PATH,
};
use thiserror::Error;
use tracing::{error, info};

use crate::{load_fleet_config, CONFIG_PATH_ENV};

#[derive(Debug, Parser)]
#[command(name = "fleet_control")]
#[command(about = "Start or stop an AppStream fleet", long_about = None)]
pub struct Args {
    /// Start the fleet
    #[arg(long)]
    pub start: bool,

    /// Stop the fleet
    #[arg(long)]
    pub stop: bool,

    /// Use a named AWS profile instead of the default credential chain
    #[arg(long, short = 'p')]
    pub profile: Option<String>,

    /// Turn on debugging output
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Turn on program status output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Fleet configuration file
    #[arg(long, env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

impl Args {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.debug, self.verbose)
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    ModeSelection(#[from] ModeSelectionError),
    #[error(transparent)]
    Fleet(#[from] FleetControlError),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ModeSelection(_) => 1,
            Self::Fleet(_) => 2,
        }
    }
}

/// Console entry point. Mode flags are checked before the configuration is
/// read, so misuse never reaches the configuration file or the network.
pub fn run(args: &Args, factory: &dyn FleetClientFactory) -> Result<FleetActionOutcome, CliError> {
    info!("fleet_control start");

    let action = FleetAction::from_flags(args.start, args.stop).map_err(|error| {
        error!("{error} option when executing locally");
        error
    })?;

    let config = load_fleet_config(&args.config)?;
    let request = FleetRequest {
        action,
        fleet_name: &config.fleet_name,
        profile: args.profile.as_deref(),
        context: None,
    };
    let outcome = run_fleet_action(&request, factory)?;

    info!("fleet_control end");
    Ok(outcome)
}
