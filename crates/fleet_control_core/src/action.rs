use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModeSelectionError;

/// Which remote fleet transition an invocation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FleetAction {
    Start,
    Stop,
}

impl FleetAction {
    /// Resolves the console's `--start`/`--stop` flags. Exactly one must be set.
    pub fn from_flags(start: bool, stop: bool) -> Result<Self, ModeSelectionError> {
        match (start, stop) {
            (true, false) => Ok(Self::Start),
            (false, true) => Ok(Self::Stop),
            (false, false) => Err(ModeSelectionError::NoneSelected),
            (true, true) => Err(ModeSelectionError::BothSelected),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }

    /// Name of the hosted entry point bound to this action.
    pub fn handler_name(self) -> &'static str {
        match self {
            Self::Start => "start_fleet",
            Self::Stop => "stop_fleet",
        }
    }
}

impl fmt::Display for FleetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_flag_selects_action() {
        assert_eq!(FleetAction::from_flags(true, false), Ok(FleetAction::Start));
        assert_eq!(FleetAction::from_flags(false, true), Ok(FleetAction::Stop));
    }

    #[test]
    fn missing_or_conflicting_flags_are_rejected() {
        assert_eq!(
            FleetAction::from_flags(false, false),
            Err(ModeSelectionError::NoneSelected)
        );
        assert_eq!(
            FleetAction::from_flags(true, true),
            Err(ModeSelectionError::BothSelected)
        );
    }

    #[test]
    fn handler_names_stay_distinct() {
        assert_eq!(FleetAction::Start.handler_name(), "start_fleet");
        assert_eq!(FleetAction::Stop.handler_name(), "stop_fleet");
    }
}
