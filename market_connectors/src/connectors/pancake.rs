//! PancakeSwap price-snapshot connector.
//!
//! PancakeSwap's public info API reports a spot price per token rather than
//! candles, so this connector degrades a price lookup into a single
//! synthetic 1m bar: open = high = low = close = price, zero volume. A
//! zero or unset price means "no usable data" and yields an empty sequence;
//! only transport and API failures surface as errors.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    connectors::{ApiSnafu, ClientBuildSnafu, ConnectorError, ConnectorInitError, DecodeSnafu, SourceConnector, TransportSnafu},
    models::{bar::RawBar, request::BarsRequest},
};

const BASE_URL: &str = "https://api.pancakeswap.info/api/v2";

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Connector for PancakeSwap token price snapshots.
pub struct PancakeConnector {
    client: Client,
    base_url: String,
}

impl PancakeConnector {
    /// Creates a connector against the public PancakeSwap info API.
    pub fn new() -> Result<Self, ConnectorInitError> {
        Self::with_base_url(BASE_URL)
    }

    /// Creates a connector against an alternate endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ConnectorInitError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct TokenEnvelope {
    #[serde(default)]
    data: TokenData,
}

#[derive(Debug, Default, Deserialize)]
struct TokenData {
    #[serde(default)]
    price: String,
}

/// Parses the reported price string. An absent price (empty string) is
/// "no data" and maps to `0.0`; a present but non-decimal price is a
/// malformed payload and surfaces as a decode error rather than being
/// silently treated as no data.
fn parse_price(raw: &str) -> Result<f64, ConnectorError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>().map_err(|_| {
        DecodeSnafu {
            message: format!("token price is not a decimal: {raw:?}"),
        }
        .build()
    })
}

/// Collapse a spot price onto the most recent whole minute.
///
/// Repeated polls within the same minute therefore share one bar identity
/// and merge in storage instead of piling up rows.
fn snapshot_bars(price: f64, now_ts: i64) -> Vec<RawBar> {
    if price <= 0.0 {
        return vec![];
    }
    let close_ts = now_ts - now_ts.rem_euclid(60);
    vec![RawBar {
        open_ts: close_ts - 60,
        close_ts,
        open: price,
        high: price,
        low: price,
        close: price,
        volume_base: 0.0,
        volume_quote: 0.0,
        notional_usd: 0.0,
        trades: 0,
    }]
}

#[async_trait::async_trait]
impl SourceConnector for PancakeConnector {
    async fn fetch_bars(&self, request: &BarsRequest) -> Result<Vec<RawBar>, ConnectorError> {
        let url = format!("{}/tokens/{}", self.base_url, request.token_address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context(TransportSnafu)?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu { message }.fail();
        }

        let envelope: TokenEnvelope = response.json().await.context(TransportSnafu)?;
        let price = parse_price(&envelope.data.price)?;
        debug!(token = %request.token_address, price, "fetched price snapshot");
        Ok(snapshot_bars(price, Utc::now().timestamp()))
    }
}
