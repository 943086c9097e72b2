//! Response schema of the `/api/v1/markets/{epic}` endpoint.
//!
//! The shape is owned by the broker, so every level is optional and a value
//! of an unexpected type decodes as absent instead of failing the lookup.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MarketDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub instrument: Option<InstrumentDetails>,
    #[serde(default, deserialize_with = "lenient")]
    pub snapshot: Option<Snapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InstrumentDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient")]
    pub market_status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bid: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub offer: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ask: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub update_time: Option<String>,
}

impl MarketDetails {
    pub fn symbol(&self) -> Option<&str> {
        self.instrument.as_ref()?.symbol.as_deref()
    }

    pub fn currency(&self) -> Option<&str> {
        self.instrument.as_ref()?.currency.as_deref()
    }

    pub fn market_status(&self) -> Option<&str> {
        self.snapshot.as_ref()?.market_status.as_deref()
    }

    pub fn update_time(&self) -> Option<&str> {
        self.snapshot.as_ref()?.update_time.as_deref()
    }

    pub fn bid(&self) -> Option<f64> {
        self.snapshot.as_ref()?.bid
    }

    /// `offer`, or `ask` when the response uses that name instead.
    pub fn offer(&self) -> Option<f64> {
        let snapshot = self.snapshot.as_ref()?;
        snapshot.offer.or(snapshot.ask)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
