use std::fmt;
use std::fs;
use std::path::Path;

use ini::{Ini, ParseOption};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ConfigurationError;

pub const DEFAULT_CONFIG_PATH: &str = "fleet.ini";
pub const CONFIG_SECTION: &str = "global";
pub const FLEET_NAME_KEY: &str = "fleet_name";

/// Identifier of the AppStream fleet this process controls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FleetName(String);

impl FleetName {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigurationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ConfigurationError::EmptyFleetName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FleetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetConfig {
    pub fleet_name: FleetName,
}

impl FleetConfig {
    /// Reads and validates the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        info!("parsing configuration file {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigurationError> {
        // Values are taken literally: no quote stripping, no escape processing.
        let option = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, option).map_err(|error| {
            ConfigurationError::Parse {
                message: error.to_string(),
            }
        })?;

        let section =
            ini.section(Some(CONFIG_SECTION))
                .ok_or_else(|| ConfigurationError::MissingSection {
                    section: CONFIG_SECTION.to_string(),
                })?;
        // Option names are case-insensitive; the last occurrence wins.
        let fleet_name = section
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(FLEET_NAME_KEY))
            .map(|(_, value)| value)
            .last()
            .ok_or_else(|| ConfigurationError::MissingKey {
                section: CONFIG_SECTION.to_string(),
                key: FLEET_NAME_KEY.to_string(),
            })?;

        let fleet_name = FleetName::new(strip_inline_comment(fleet_name))?;
        debug!(fleet_name = %fleet_name, "configuration loaded");
        Ok(Self { fleet_name })
    }
}

/// Drops a trailing `;` or `#` comment, which only counts as one when it
/// follows whitespace.
fn strip_inline_comment(value: &str) -> &str {
    let mut previous = None;
    for (index, ch) in value.char_indices() {
        if matches!(ch, ';' | '#') && previous.is_some_and(char::is_whitespace) {
            return value[..index].trim_end();
        }
        previous = Some(ch);
    }
    value
}
