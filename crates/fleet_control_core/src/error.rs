use std::path::PathBuf;

use thiserror::Error;

use crate::action::FleetAction;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read configuration file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {message}")]
    Parse { message: String },
    #[error("configuration is missing section [{section}]")]
    MissingSection { section: String },
    #[error("configuration section [{section}] is missing key '{key}'")]
    MissingKey { section: String, key: String },
    #[error("fleet name cannot be empty")]
    EmptyFleetName,
}

/// Failures of a fleet control invocation. Each is logged where it is caught
/// and then handed back to the caller unchanged.
#[derive(Debug, Error)]
pub enum FleetControlError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("failed to create AppStream client{}: {message}", profile_suffix(.profile))]
    Authentication {
        profile: Option<String>,
        message: String,
    },
    #[error("failed to {action} fleet: {fleet_name}: {message}")]
    FleetOperation {
        action: FleetAction,
        fleet_name: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModeSelectionError {
    #[error("must choose start or stop")]
    NoneSelected,
    #[error("must choose only one of start or stop")]
    BothSelected,
}

fn profile_suffix(profile: &Option<String>) -> String {
    match profile {
        Some(name) => format!(" (profile '{name}')"),
        None => String::new(),
    }
}
