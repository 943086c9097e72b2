use crate::{
    credentials::Credentials, environment::Environment, error::ApiError, market::MarketDetails,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const API_KEY_HEADER: &str = "X-CAP-API-KEY";
const CST_HEADER: &str = "CST";
const SECURITY_TOKEN_HEADER: &str = "X-SECURITY-TOKEN";

/// Opens a broker session for one environment and hands back a client bound
/// to it.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(
        &self,
        environment: Environment,
        credentials: &Credentials,
    ) -> Result<Box<dyn MarketClient>, ApiError>;
}

#[async_trait]
pub trait MarketClient: Send + Sync {
    async fn single_market(&self, epic: &str) -> Result<MarketDetails, ApiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest<'a> {
    identifier: &'a str,
    password: &'a str,
    encrypted_password: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error_code: Option<String>,
}

#[derive(Debug, Clone)]
struct SessionTokens {
    cst: String,
    security_token: String,
}

pub struct CapitalConnector {
    client: Client,
    base_url: Option<String>,
}

impl CapitalConnector {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Sends every request to `base_url` regardless of the environment.
    #[cfg(test)]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: Some(base_url.into()),
        }
    }
}

#[async_trait]
impl Connector for CapitalConnector {
    async fn connect(
        &self,
        environment: Environment,
        credentials: &Credentials,
    ) -> Result<Box<dyn MarketClient>, ApiError> {
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| environment.base_url().to_string());
        let url = session_url(&base_url);
        info!("Opening {} session by calling {:?}", environment.as_str(), url);
        debug!("Logging in as {:?}", credentials.identifier());
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, credentials.api_key())
            .json(&CreateSessionRequest {
                identifier: credentials.identifier(),
                password: credentials.password(),
                encrypted_password: false,
            })
            .send()
            .await?;
        let response = check_status(response).await?;

        let tokens = SessionTokens {
            cst: header_value(&response, CST_HEADER)?,
            security_token: header_value(&response, SECURITY_TOKEN_HEADER)?,
        };
        info!("Session opened on {} environment", environment.as_str());

        Ok(Box::new(CapitalClient {
            client: self.client.clone(),
            base_url,
            tokens,
        }))
    }
}

/// Client bound to an open session. Session renewal is not handled; a client
/// lives for a single lookup.
struct CapitalClient {
    client: Client,
    base_url: String,
    tokens: SessionTokens,
}

#[async_trait]
impl MarketClient for CapitalClient {
    async fn single_market(&self, epic: &str) -> Result<MarketDetails, ApiError> {
        let url = market_url(&self.base_url, epic);
        info!("Get market details for epic {:?} by calling {:?}", epic, url);
        let response = self
            .client
            .get(&url)
            .header(CST_HEADER, &self.tokens.cst)
            .header(SECURITY_TOKEN_HEADER, &self.tokens.security_token)
            .send()
            .await?;
        let details: MarketDetails = check_status(response).await?.json().await?;
        debug!("Market details for {:?}: {:?}", epic, details);
        Ok(details)
    }
}

fn session_url(base_url: &str) -> String {
    format!("{}/api/v1/session", base_url)
}

fn market_url(base_url: &str, epic: &str) -> String {
    format!("{}/api/v1/markets/{}", base_url, urlencoding::encode(epic))
}

fn header_value(response: &Response, name: &'static str) -> Result<String, ApiError> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::MissingSessionToken(name))
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    Err(ApiError::Status {
        status,
        message: error_message(&body),
    })
}

/// Broker errors carry an `errorCode` such as `error.not-found.epic`; fall
/// back to the raw body for anything else.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|response| response.error_code)
        .unwrap_or_else(|| body.trim().to_string())
}
