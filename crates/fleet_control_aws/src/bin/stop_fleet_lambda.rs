use fleet_control_aws::handlers::hosted::run_hosted;
use fleet_control_core::FleetAction;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    run_hosted(FleetAction::Stop).await
}
