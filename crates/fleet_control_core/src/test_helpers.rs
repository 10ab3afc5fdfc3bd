//! Test doubles for the fleet control seams.
//!
//! Shared by the unit tests here and by the integration tests of the AWS crate.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;

use crate::action::FleetAction;
use crate::config::FleetName;
use crate::context::InvocationContext;
use crate::control::{FleetApi, FleetClientFactory, FleetResponse};

/// Build a fleet name, panicking on an invalid value.
pub fn fleet_name(value: &str) -> FleetName {
    FleetName::new(value).expect("test fleet name should be valid")
}

/// A representative hosted invocation context.
pub fn invocation_context() -> InvocationContext {
    InvocationContext {
        log_stream_name: "2026/10/18/[$LATEST]abc123".to_string(),
        log_group_name: "/aws/lambda/start_fleet".to_string(),
        request_id: "8f5c1c2e-0000-4000-8000-000000000000".to_string(),
        memory_limit_mb: 128,
        deadline_ms: u64::MAX,
    }
}

#[derive(Debug, Default)]
struct Recorded {
    profiles: Vec<Option<String>>,
    calls: Vec<(FleetAction, String)>,
}

/// Factory whose clients record every remote call instead of issuing it.
#[derive(Clone, Default)]
pub struct RecordingFactory {
    recorded: Arc<Mutex<Recorded>>,
    connect_error: Option<String>,
    send_error: Option<String>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_connect(message: &str) -> Self {
        Self {
            connect_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_send(message: &str) -> Self {
        Self {
            send_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Profiles passed to `connect`, in order.
    pub fn profiles(&self) -> Vec<Option<String>> {
        self.recorded
            .lock()
            .expect("poisoned mutex")
            .profiles
            .clone()
    }

    /// Remote calls issued through connected clients, in order.
    pub fn calls(&self) -> Vec<(FleetAction, String)> {
        self.recorded.lock().expect("poisoned mutex").calls.clone()
    }
}

impl FleetClientFactory for RecordingFactory {
    fn connect(&self, profile: Option<&str>) -> Result<Box<dyn FleetApi>, String> {
        self.recorded
            .lock()
            .expect("poisoned mutex")
            .profiles
            .push(profile.map(str::to_string));
        if let Some(message) = &self.connect_error {
            return Err(message.clone());
        }
        Ok(Box::new(RecordingApi {
            recorded: Arc::clone(&self.recorded),
            send_error: self.send_error.clone(),
        }))
    }
}

struct RecordingApi {
    recorded: Arc<Mutex<Recorded>>,
    send_error: Option<String>,
}

impl FleetApi for RecordingApi {
    fn send(&self, action: FleetAction, fleet_name: &str) -> Result<FleetResponse, String> {
        let mut recorded = self.recorded.lock().expect("poisoned mutex");
        recorded.calls.push((action, fleet_name.to_string()));
        if let Some(message) = &self.send_error {
            return Err(message.clone());
        }
        Ok(FleetResponse {
            request_id: Some(format!("req-{}", recorded.calls.len())),
            raw: format!("{}FleetOutput {{ }}", capitalized(action)),
        })
    }
}

fn capitalized(action: FleetAction) -> &'static str {
    match action {
        FleetAction::Start => "Start",
        FleetAction::Stop => "Stop",
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("poisoned mutex").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a DEBUG-level fmt subscriber scoped to this thread and return
/// its result together with every line it logged.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().expect("poisoned mutex").clone();
    let lines = String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect();
    (result, lines)
}

/// The first captured line containing `needle`, panicking when absent.
pub fn log_line<'a>(lines: &'a [String], needle: &str) -> &'a str {
    lines
        .iter()
        .find(|line| line.contains(needle))
        .unwrap_or_else(|| panic!("no log line contains {needle:?}; captured: {lines:#?}"))
}
