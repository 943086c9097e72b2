mod api;
mod config;
mod credentials;
mod environment;
mod error;
mod fetcher;
mod market;
mod quote;

use crate::api::CapitalConnector;
use crate::config::Config;
use crate::error::{error_chain, FetchError};
use crate::fetcher::PriceFetcher;
use crate::quote::FetchResult;
use reqwest::Client;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let result = match run().await {
        Ok(result) => result,
        Err(e) => {
            let message = error_chain(&e);
            error!("{}", message);
            FetchResult::Error { message }
        }
    };

    match serde_json::to_string(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize result: {}", e),
    }

    if result.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn run() -> Result<FetchResult, FetchError> {
    let config = Config::from_env()?;
    info!(
        "Fetching {:?} price from the Capital.com {} API",
        config.epic,
        config.environment.as_str()
    );

    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FetchError::ClientInitialization(e.into()))?;
    let fetcher = PriceFetcher::new(CapitalConnector::new(client));

    let result = fetcher
        .fetch(&config.credentials, config.environment, &config.epic)
        .await;
    if let Err(e) = &result {
        error!("Could not retrieve {:?} price: {}", config.epic, error_chain(e));
    }
    Ok(result.into())
}
