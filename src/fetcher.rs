use crate::api::Connector;
use crate::credentials::Credentials;
use crate::environment::Environment;
use crate::error::{ConfigError, FetchError};
use crate::quote::Quote;
use tracing::{info, warn};

pub struct PriceFetcher<C> {
    connector: C,
}

impl<C: Connector> PriceFetcher<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Fetches the current quote for `epic`.
    ///
    /// Credentials are checked before any network access. A response that
    /// lacks some of the reported fields still yields a quote with those
    /// fields left out.
    pub async fn fetch(
        &self,
        credentials: &Credentials,
        environment: Environment,
        epic: &str,
    ) -> Result<Quote, FetchError> {
        let missing = credentials.missing_fields();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing).into());
        }

        info!("Using {} environment", environment.as_str());
        let client = self
            .connector
            .connect(environment, credentials)
            .await
            .map_err(FetchError::ClientInitialization)?;

        let details = client
            .single_market(epic)
            .await
            .map_err(FetchError::Lookup)?;
        info!(
            "Market data retrieved for epic {:?} (status: {}, updated: {})",
            epic,
            details.market_status().unwrap_or("unknown"),
            details.update_time().unwrap_or("unknown")
        );

        let quote = Quote::from_market(epic, &details);
        for field in quote.absent_fields() {
            warn!("Response for epic {:?} has no '{}'", epic, field);
        }
        Ok(quote)
    }
}
