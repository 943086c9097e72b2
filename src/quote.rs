use crate::error::{error_chain, FetchError};
use crate::market::MarketDetails;
use serde::Serialize;

pub const DEFAULT_EPIC: &str = "GOLD";

/// The subset of a market response the fetcher reports. Fields the broker
/// left out are omitted rather than defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub epic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer: Option<f64>,
}

impl Quote {
    pub fn from_market(epic: &str, details: &MarketDetails) -> Self {
        Self {
            epic: epic.to_string(),
            symbol: details.symbol().map(str::to_string),
            currency: details.currency().map(str::to_string),
            bid: details.bid(),
            offer: details.offer(),
        }
    }

    /// Names of the reported fields the response did not carry.
    pub fn absent_fields(&self) -> Vec<&'static str> {
        [
            ("instrument.symbol", self.symbol.is_none()),
            ("instrument.currency", self.currency.is_none()),
            ("snapshot.bid", self.bid.is_none()),
            ("snapshot.offer", self.offer.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name)
        .collect()
    }
}

/// Uniform output shape: either the quote or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FetchResult {
    Quote(Quote),
    Error {
        #[serde(rename = "error")]
        message: String,
    },
}

impl FetchResult {
    pub fn is_error(&self) -> bool {
        matches!(self, FetchResult::Error { .. })
    }
}

impl From<Result<Quote, FetchError>> for FetchResult {
    fn from(result: Result<Quote, FetchError>) -> Self {
        match result {
            Ok(quote) => FetchResult::Quote(quote),
            Err(e) => FetchResult::Error {
                message: error_chain(&e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::market::{InstrumentDetails, Snapshot};
    use serde_json::json;

    fn gold_details() -> MarketDetails {
        MarketDetails {
            instrument: Some(InstrumentDetails {
                symbol: Some("Gold".into()),
                currency: Some("USD".into()),
            }),
            snapshot: Some(Snapshot {
                bid: Some(2345.12),
                offer: Some(2345.42),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_from_market_copies_every_field() {
        let quote = Quote::from_market("GOLD", &gold_details());
        assert_eq!(
            quote,
            Quote {
                epic: "GOLD".into(),
                symbol: Some("Gold".into()),
                currency: Some("USD".into()),
                bid: Some(2345.12),
                offer: Some(2345.42),
            }
        );
        assert!(quote.absent_fields().is_empty());
    }

    #[test]
    fn test_absent_fields_are_reported() {
        let quote = Quote::from_market("GOLD", &MarketDetails::default());
        assert_eq!(
            quote.absent_fields(),
            vec![
                "instrument.symbol",
                "instrument.currency",
                "snapshot.bid",
                "snapshot.offer"
            ]
        );
    }

    #[test]
    fn test_partial_quote_serializes_without_absent_fields() {
        let quote = Quote {
            epic: "GOLD".into(),
            symbol: None,
            currency: None,
            bid: Some(2345.12),
            offer: None,
        };
        let result = FetchResult::Quote(quote);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "epic": "GOLD", "bid": 2345.12 })
        );
    }

    #[test]
    fn test_error_serializes_as_descriptor() {
        let error = FetchError::from(ConfigError::MissingVariables(vec!["CAPITAL_EMAIL"]));
        let result = FetchResult::from(Err::<Quote, _>(error));
        assert!(result.is_error());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "error": "Configuration error: Missing required environment variables: CAPITAL_EMAIL" })
        );
    }
}
