use auth::credentials::Credential;
use domain::orchestrator::{self, RunOptions};
use domain::ApiClient;
use log::{error, info};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config as &Config) {
        eprintln!("Failed to start simplelog: {e}");
        std::process::exit(1);
    }

    let client_id = match config.client_id() {
        Some(client_id) => client_id.to_string(),
        None => {
            error!("client id required, set ZUBE_CLIENT_ID or provide as first argument");
            std::process::exit(1);
        }
    };

    let credential = match Credential::from_pem_file(&client_id, config.key_file()) {
        Ok(credential) => credential,
        Err(e) => {
            error!("Failed to load API key: {e}");
            std::process::exit(1);
        }
    };

    let client = match ApiClient::new(&config, credential) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to build Zube API client: {e}");
            std::process::exit(1);
        }
    };

    match orchestrator::run(client, RunOptions::from(&config)).await {
        Ok(report) => info!(
            "Reviewed {} projects and {} workspaces, disabled {} preference sets",
            report.projects, report.workspaces, report.preferences_disabled
        ),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
