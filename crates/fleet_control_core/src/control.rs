use serde::Serialize;
use tracing::{debug, error, info};

use crate::action::FleetAction;
use crate::config::FleetName;
use crate::context::InvocationContext;
use crate::error::FleetControlError;

/// Outcome of a single remote start/stop call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetResponse {
    pub request_id: Option<String>,
    /// Human-readable rendering of the raw service response.
    pub raw: String,
}

/// Remote fleet-management API, bound to one authenticated session.
pub trait FleetApi {
    fn send(&self, action: FleetAction, fleet_name: &str) -> Result<FleetResponse, String>;
}

/// Builds authenticated [`FleetApi`] handles. `None` selects the default
/// credential chain.
pub trait FleetClientFactory {
    fn connect(&self, profile: Option<&str>) -> Result<Box<dyn FleetApi>, String>;
}

#[derive(Debug, Clone, Copy)]
pub struct FleetRequest<'a> {
    pub action: FleetAction,
    pub fleet_name: &'a FleetName,
    pub profile: Option<&'a str>,
    pub context: Option<&'a InvocationContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetActionOutcome {
    pub action: FleetAction,
    pub fleet_name: FleetName,
    pub request_id: Option<String>,
}

/// Connects to the fleet service and issues exactly one start or stop call.
///
/// Failures are logged at error severity and returned; there is no retry and
/// no check against the fleet's current state.
pub fn run_fleet_action(
    request: &FleetRequest<'_>,
    factory: &dyn FleetClientFactory,
) -> Result<FleetActionOutcome, FleetControlError> {
    let action = request.action;
    let fleet_name = request.fleet_name;
    info!("{} begin", action.handler_name());

    if let Some(context) = request.context {
        context.log_diagnostics();
    }

    debug!(
        profile = request.profile.unwrap_or("<default>"),
        "creating AppStream client"
    );
    let api = factory.connect(request.profile).map_err(|message| {
        error!("failed to create connection to AppStream: {message}");
        FleetControlError::Authentication {
            profile: request.profile.map(str::to_string),
            message,
        }
    })?;

    let response = api.send(action, fleet_name.as_str()).map_err(|message| {
        error!("failed to {action} fleet: {fleet_name}: {message}");
        FleetControlError::FleetOperation {
            action,
            fleet_name: fleet_name.as_str().to_string(),
            message,
        }
    })?;

    info!("{}", response.raw);
    info!("{} end", action.handler_name());

    Ok(FleetActionOutcome {
        action,
        fleet_name: fleet_name.clone(),
        request_id: response.request_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        capture_logs, fleet_name, invocation_context, log_line, RecordingFactory,
    };

    #[test]
    fn start_issues_one_start_call_for_configured_fleet() {
        let factory = RecordingFactory::new();
        let name = fleet_name("demo-fleet");

        let outcome = run_fleet_action(
            &FleetRequest {
                action: FleetAction::Start,
                fleet_name: &name,
                profile: None,
                context: None,
            },
            &factory,
        )
        .expect("start should succeed");

        assert_eq!(outcome.action, FleetAction::Start);
        assert_eq!(outcome.fleet_name.as_str(), "demo-fleet");
        assert_eq!(
            factory.calls(),
            vec![(FleetAction::Start, "demo-fleet".to_string())]
        );
        assert_eq!(factory.profiles(), vec![None]);
    }

    #[test]
    fn stop_issues_one_stop_call() {
        let factory = RecordingFactory::new();
        let name = fleet_name("demo-fleet");
        let context = invocation_context();

        let outcome = run_fleet_action(
            &FleetRequest {
                action: FleetAction::Stop,
                fleet_name: &name,
                profile: Some("ops"),
                context: Some(&context),
            },
            &factory,
        )
        .expect("stop should succeed");

        assert_eq!(outcome.request_id.as_deref(), Some("req-1"));
        assert_eq!(
            factory.calls(),
            vec![(FleetAction::Stop, "demo-fleet".to_string())]
        );
        assert_eq!(factory.profiles(), vec![Some("ops".to_string())]);
    }

    #[test]
    fn connect_failure_is_authentication_error_without_remote_call() {
        let factory = RecordingFactory::failing_connect("profile ops not found");
        let name = fleet_name("demo-fleet");

        let error = run_fleet_action(
            &FleetRequest {
                action: FleetAction::Start,
                fleet_name: &name,
                profile: Some("ops"),
                context: None,
            },
            &factory,
        )
        .expect_err("connect should fail");

        assert!(matches!(
            error,
            FleetControlError::Authentication { ref profile, ref message }
                if profile.as_deref() == Some("ops") && message == "profile ops not found"
        ));
        assert!(factory.calls().is_empty());
    }

    #[test]
    fn remote_failure_is_fleet_operation_error_with_fleet_name() {
        let factory = RecordingFactory::failing_send("ResourceNotFoundException");
        let name = fleet_name("demo-fleet");

        let error = run_fleet_action(
            &FleetRequest {
                action: FleetAction::Stop,
                fleet_name: &name,
                profile: None,
                context: None,
            },
            &factory,
        )
        .expect_err("send should fail");

        match error {
            FleetControlError::FleetOperation {
                action,
                fleet_name,
                message,
            } => {
                assert_eq!(action, FleetAction::Stop);
                assert_eq!(fleet_name, "demo-fleet");
                assert_eq!(message, "ResourceNotFoundException");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(factory.calls().len(), 1);
    }

    #[test]
    fn raw_response_is_logged_at_info() {
        let factory = RecordingFactory::new();
        let name = fleet_name("demo-fleet");

        let (result, lines) = capture_logs(|| {
            run_fleet_action(
                &FleetRequest {
                    action: FleetAction::Start,
                    fleet_name: &name,
                    profile: None,
                    context: None,
                },
                &factory,
            )
        });

        result.expect("start should succeed");
        assert!(log_line(&lines, "StartFleetOutput { }").contains("INFO"));
        assert!(log_line(&lines, "start_fleet begin").contains("INFO"));
        assert!(log_line(&lines, "start_fleet end").contains("INFO"));
        assert!(lines.iter().all(|line| !line.contains("log stream name")));
    }

    #[test]
    fn diagnostics_and_unaltered_fleet_name_are_logged_when_call_fails() {
        let factory = RecordingFactory::failing_send("AccessDeniedException");
        let name = fleet_name("Demo Fleet%s{}");
        let context = invocation_context();

        let (result, lines) = capture_logs(|| {
            run_fleet_action(
                &FleetRequest {
                    action: FleetAction::Stop,
                    fleet_name: &name,
                    profile: None,
                    context: Some(&context),
                },
                &factory,
            )
        });

        assert!(matches!(
            result,
            Err(FleetControlError::FleetOperation { .. })
        ));
        for needle in [
            "log stream name: 2026/10/18/[$LATEST]abc123",
            "log group name: /aws/lambda/start_fleet",
            "request id: 8f5c1c2e-0000-4000-8000-000000000000",
            "memory limit (MB): 128",
            "time remaining (ms): ",
        ] {
            assert!(log_line(&lines, needle).contains("INFO"));
        }

        let failure = log_line(
            &lines,
            "failed to stop fleet: Demo Fleet%s{}: AccessDeniedException",
        );
        assert!(failure.contains("ERROR"));
        assert!(lines.iter().all(|line| !line.contains("stop_fleet end")));
    }

    #[test]
    fn connect_failure_is_logged_at_error() {
        let factory = RecordingFactory::failing_connect("profile ops not found");
        let name = fleet_name("demo-fleet");

        let (result, lines) = capture_logs(|| {
            run_fleet_action(
                &FleetRequest {
                    action: FleetAction::Start,
                    fleet_name: &name,
                    profile: Some("ops"),
                    context: None,
                },
                &factory,
            )
        });

        assert!(result.is_err());
        assert!(log_line(&lines, "profile ops not found").contains("ERROR"));
    }
}
