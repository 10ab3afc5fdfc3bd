use std::fmt::Debug;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_appstream::error::DisplayErrorContext;
use aws_sdk_appstream::operation::RequestId;
use fleet_control_core::{FleetAction, FleetApi, FleetClientFactory, FleetResponse};
use tracing::debug;

/// Builds AppStream clients from the default credential chain or a named
/// profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppStreamClientFactory;

impl AppStreamClientFactory {
    async fn load_config(profile: Option<&str>) -> Result<SdkConfig, String> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;

        if config.region().is_none() {
            return Err("no AWS region configured".to_string());
        }

        // Resolve credentials now so a bad profile fails here, not on the call.
        let provider = config
            .credentials_provider()
            .ok_or_else(|| "no credentials provider configured".to_string())?;
        provider.provide_credentials().await.map_err(|error| {
            format!(
                "failed to resolve credentials: {}",
                DisplayErrorContext(&error)
            )
        })?;

        Ok(config)
    }
}

impl FleetClientFactory for AppStreamClientFactory {
    fn connect(&self, profile: Option<&str>) -> Result<Box<dyn FleetApi>, String> {
        let profile = profile.map(str::to_string);

        let config = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(async move { Self::load_config(profile.as_deref()).await })
        })?;
        debug!(region = ?config.region(), "AppStream client configured");

        Ok(Box::new(AppStreamFleetApi {
            client: aws_sdk_appstream::Client::new(&config),
        }))
    }
}

/// One authenticated AppStream session.
pub struct AppStreamFleetApi {
    client: aws_sdk_appstream::Client,
}

impl FleetApi for AppStreamFleetApi {
    fn send(&self, action: FleetAction, fleet_name: &str) -> Result<FleetResponse, String> {
        let client = self.client.clone();
        let name = fleet_name.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                match action {
                    FleetAction::Start => client
                        .start_fleet()
                        .name(name)
                        .send()
                        .await
                        .map(|output| fleet_response(&output))
                        .map_err(|error| format!("{}", DisplayErrorContext(&error))),
                    FleetAction::Stop => client
                        .stop_fleet()
                        .name(name)
                        .send()
                        .await
                        .map(|output| fleet_response(&output))
                        .map_err(|error| format!("{}", DisplayErrorContext(&error))),
                }
            })
        })
    }
}

fn fleet_response<O: RequestId + Debug>(output: &O) -> FleetResponse {
    FleetResponse {
        request_id: output.request_id().map(str::to_string),
        raw: format!("{output:?}"),
    }
}
