use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use apim_dynamodb_setup::config::{self, StoreConfig};
use apim_dynamodb_setup::exit_status::{exit_status, EXIT_CONFIG};
use apim_dynamodb_setup::provisioner::Provisioner;
use apim_dynamodb_setup::{command_line, dynamodb, logging};

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` may carry RUST_LOG, so it is loaded before the subscriber.
    dotenv::dotenv().ok();
    if let Err(e) = logging::init_logging() {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::from(EXIT_CONFIG);
    }

    let args = command_line::Args::parse();
    let prefix = args.prefix();

    info!("===================================");
    info!("  Create Gravitee.io APIM Tables");
    info!("  TableName prefix: {prefix}");
    info!("===================================");

    let store_config = match StoreConfig::from_file(Path::new(config::CONFIG_PATH)) {
        Ok(store_config) => store_config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    if store_config.is_none() {
        info!(
            "No {} found, using the AWS environment",
            config::CONFIG_PATH
        );
    }
    let sdk_config = store_config.unwrap_or_default().load_sdk_config().await;
    info!("Target: {}", config::describe_target(&sdk_config));

    let ddb = dynamodb::DynamoDb::new(&sdk_config);
    let provisioner = Provisioner::new(Arc::new(ddb));

    let result = provisioner.run(prefix).await;
    match &result {
        Ok(report) => report.log_summary(),
        Err(e) => error!("{e}"),
    }

    ExitCode::from(exit_status(&result))
}
