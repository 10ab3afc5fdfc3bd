//! AWS-oriented adapters and entry points for fleet control.
//!
//! This crate owns runtime integration details (AppStream client construction,
//! Lambda handlers and the console entry point). Configuration, the fleet
//! operation itself and its seams live in `fleet_control_core`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use fleet_control_core::{FleetConfig, FleetControlError, DEFAULT_CONFIG_PATH};
use tracing::error;

pub mod adapters;
pub mod cli;
pub mod handlers;

/// Environment variable naming the configuration file for every entry point.
pub const CONFIG_PATH_ENV: &str = "FLEET_CONTROL_CONFIG";
/// Environment variable that can raise hosted log verbosity.
pub const LOG_LEVEL_ENV: &str = "FLEET_CONTROL_LOG_LEVEL";

/// Configuration path for the hosted binaries: `FLEET_CONTROL_CONFIG` if set,
/// else `fleet.ini` in the Lambda task root, else `fleet.ini` in the working
/// directory.
pub fn hosted_config_path() -> PathBuf {
    resolve_config_path(
        std::env::var_os(CONFIG_PATH_ENV),
        std::env::var_os("LAMBDA_TASK_ROOT"),
    )
}

fn resolve_config_path(explicit: Option<OsString>, task_root: Option<OsString>) -> PathBuf {
    match (explicit, task_root) {
        (Some(path), _) if !path.is_empty() => PathBuf::from(path),
        (_, Some(root)) if !root.is_empty() => PathBuf::from(root).join(DEFAULT_CONFIG_PATH),
        _ => PathBuf::from(DEFAULT_CONFIG_PATH),
    }
}

/// Loads the fleet configuration, logging any failure before returning it.
pub fn load_fleet_config(path: &Path) -> Result<FleetConfig, FleetControlError> {
    FleetConfig::load(path).map_err(|error| {
        error!("failed to parse {} configuration file: {error}", path.display());
        FleetControlError::from(error)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_path_wins() {
        let path = resolve_config_path(
            Some(OsString::from("/etc/fleet/fleet.ini")),
            Some(OsString::from("/var/task")),
        );
        assert_eq!(path, PathBuf::from("/etc/fleet/fleet.ini"));
    }

    #[test]
    fn task_root_is_used_when_no_explicit_path() {
        let path = resolve_config_path(None, Some(OsString::from("/var/task")));
        assert_eq!(path, PathBuf::from("/var/task/fleet.ini"));
    }

    #[test]
    fn falls_back_to_working_directory() {
        assert_eq!(
            resolve_config_path(Some(OsString::new()), None),
            PathBuf::from("fleet.ini")
        );
    }

    #[test]
    fn load_failure_becomes_configuration_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = load_fleet_config(&dir.path().join("fleet.ini")).expect_err("should fail");
        assert!(matches!(error, FleetControlError::Configuration(_)));
    }
}
