//! Shared fleet control primitives.
//!
//! This crate owns configuration loading, the start/stop fleet operation and the
//! seams it calls through. It intentionally excludes AWS SDK and Lambda runtime
//! concerns, which live in `fleet_control_aws`.

pub mod action;
pub mod config;
pub mod context;
pub mod control;
pub mod error;
pub mod logging;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use action::FleetAction;
pub use config::{FleetConfig, FleetName, DEFAULT_CONFIG_PATH};
pub use context::InvocationContext;
pub use control::{
    run_fleet_action, FleetActionOutcome, FleetApi, FleetClientFactory, FleetRequest,
    FleetResponse,
};
pub use error::{ConfigurationError, FleetControlError, ModeSelectionError};
pub use logging::{init_logging, LoggingConfig, Verbosity};
