use fleet_control_core::{
    init_logging, run_fleet_action, FleetAction, FleetActionOutcome, FleetClientFactory,
    FleetConfig, FleetControlError, FleetRequest, InvocationContext, LoggingConfig, Verbosity,
};
use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::appstream::AppStreamClientFactory;
use crate::{hosted_config_path, load_fleet_config, LOG_LEVEL_ENV};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FleetActionResponse {
    pub status: String,
    pub action: FleetAction,
    pub fleet_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl From<FleetActionOutcome> for FleetActionResponse {
    fn from(outcome: FleetActionOutcome) -> Self {
        Self {
            status: "requested".to_string(),
            action: outcome.action,
            fleet_name: outcome.fleet_name.as_str().to_string(),
            request_id: outcome.request_id,
        }
    }
}

pub fn context_from_lambda(context: &Context) -> InvocationContext {
    InvocationContext {
        log_stream_name: context.env_config.log_stream.clone(),
        log_group_name: context.env_config.log_group.clone(),
        request_id: context.request_id.clone(),
        memory_limit_mb: context.env_config.memory,
        deadline_ms: context.deadline,
    }
}

/// Runs `action` for a hosted trigger. The event payload is not interpreted;
/// which action runs is fixed by the binary the platform invokes.
pub fn handle_fleet_event(
    action: FleetAction,
    event: LambdaEvent<Value>,
    config: &FleetConfig,
    factory: &dyn FleetClientFactory,
) -> Result<FleetActionResponse, FleetControlError> {
    let context = context_from_lambda(&event.context);
    handle_fleet_invocation(action, &context, config, factory)
}

pub fn handle_fleet_invocation(
    action: FleetAction,
    context: &InvocationContext,
    config: &FleetConfig,
    factory: &dyn FleetClientFactory,
) -> Result<FleetActionResponse, FleetControlError> {
    let request = FleetRequest {
        action,
        fleet_name: &config.fleet_name,
        profile: None,
        context: Some(context),
    };
    run_fleet_action(&request, factory).map(FleetActionResponse::from)
}

/// Body of a hosted entry point: configure logging, load the fleet
/// configuration once, then serve invocations of `action` until the platform
/// shuts the process down. A configuration failure aborts initialization.
pub async fn run_hosted(action: FleetAction) -> Result<(), Error> {
    let verbosity = Verbosity::hosted(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    init_logging(LoggingConfig::hosted(verbosity));

    let config = load_fleet_config(&hosted_config_path())?;
    let factory = AppStreamClientFactory;

    let config = &config;
    let factory = &factory;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_fleet_event(action, event, config, factory).map_err(Error::from)
    }))
    .await
}
