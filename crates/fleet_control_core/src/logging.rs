use std::str::FromStr;

use tracing::level_filters::LevelFilter;

/// Process log verbosity, fixed once at startup.
///
/// `Critical` is the quiet default. tracing has no level above ERROR, so it
/// filters at ERROR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    #[default]
    Critical,
    Info,
    Debug,
}

impl Verbosity {
    /// `--debug` wins over `--verbose`.
    pub fn from_flags(debug: bool, verbose: bool) -> Self {
        if debug {
            Self::Debug
        } else if verbose {
            Self::Info
        } else {
            Self::Critical
        }
    }

    /// Hosted invocations always carry an event, which raises verbosity to at
    /// least informational.
    pub fn raised_for_hosted(self) -> Self {
        self.max(Self::Info)
    }

    /// Verbosity for a hosted binary, with an optional operator override
    /// (`critical`, `info` or `debug`). The override can only raise it.
    pub fn hosted(override_level: Option<&str>) -> Self {
        let base = Self::default().raised_for_hosted();
        override_level
            .and_then(|value| value.parse::<Self>().ok())
            .map_or(base, |level| level.max(base))
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Critical => LevelFilter::ERROR,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    pub verbosity: Verbosity,
    pub ansi: bool,
}

impl LoggingConfig {
    pub fn console(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            ansi: true,
        }
    }

    /// CloudWatch renders escape codes literally, so hosted output is plain.
    pub fn hosted(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            ansi: false,
        }
    }
}

/// Installs the process-wide subscriber. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(config.verbosity.level_filter())
        .with_ansi(config.ansi)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
