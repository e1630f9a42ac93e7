//! Binance REST connector for 1m klines.
//!
//! Queries the public `/api/v3/klines` endpoint for the requested pair and
//! converts each kline row into a [`RawBar`]. The request carries the pair
//! symbol in [`BarsRequest::token_address`]; `since_ts` maps to Binance's
//! epoch-millisecond `startTime` filter. Requests are rate limited through a
//! process-local governor so that tight ingestion loops stay inside the
//! venue's public request weight.

use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::Deserialize;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    connectors::{ApiSnafu, ClientBuildSnafu, ConnectorError, ConnectorInitError, DecodeSnafu, SourceConnector, TransportSnafu},
    models::{bar::RawBar, request::BarsRequest},
};

const BASE_URL: &str = "https://api.binance.com/api/v3/klines";

/// Hard cap Binance enforces on a single klines request.
const MAX_KLINES_PER_REQUEST: u32 = 1000;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Connector for Binance spot 1m klines over REST.
pub struct BinanceConnector {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
}

impl BinanceConnector {
    /// Creates a connector against the public Binance API.
    ///
    /// The klines endpoint is unauthenticated; no credentials are read.
    pub fn new() -> Result<Self, ConnectorInitError> {
        Self::with_base_url(BASE_URL)
    }

    /// Creates a connector against an alternate endpoint, e.g. a regional
    /// mirror or a local test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ConnectorInitError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            limiter: RateLimiter::direct(Quota::per_second(nonzero!(10u32))),
        })
    }
}

/// One kline row as Binance serializes it: a positionally-typed JSON array
/// mixing integers and decimal strings.
///
/// Positions: open time (ms), open, high, low, close, base volume,
/// close time (ms), quote volume, trade count, taker buy base volume,
/// taker buy quote volume, unused.
#[derive(Debug, Deserialize)]
#[allow(dead_code)] // trailing taker-volume fields are required for arity, never read
pub(crate) struct Kline(
    i64,
    String,
    String,
    String,
    String,
    String,
    i64,
    String,
    i64,
    String,
    String,
    serde_json::Value,
);

fn parse_price(field: &str, value: &str) -> Result<f64, ConnectorError> {
    value.parse::<f64>().map_err(|_| {
        DecodeSnafu {
            message: format!("kline field {field} is not a decimal: {value:?}"),
        }
        .build()
    })
}

impl Kline {
    fn into_raw_bar(self) -> Result<RawBar, ConnectorError> {
        let quote_volume = parse_price("quote volume", &self.7)?;
        Ok(RawBar {
            open_ts: self.0 / 1000,
            close_ts: self.6 / 1000,
            open: parse_price("open", &self.1)?,
            high: parse_price("high", &self.2)?,
            low: parse_price("low", &self.3)?,
            close: parse_price("close", &self.4)?,
            volume_base: parse_price("base volume", &self.5)?,
            volume_quote: quote_volume,
            // Quote volume doubles as the USD notional for USD-quoted pairs.
            notional_usd: quote_volume,
            trades: self.8,
        })
    }
}

#[async_trait::async_trait]
impl SourceConnector for BinanceConnector {
    async fn fetch_bars(&self, request: &BarsRequest) -> Result<Vec<RawBar>, ConnectorError> {
        self.limiter.until_ready().await;

        let mut query: Vec<(&str, String)> = vec![
            ("symbol", request.token_address.clone()),
            ("interval", "1m".to_string()),
            ("limit", MAX_KLINES_PER_REQUEST.to_string()),
        ];
        if let Some(since_ts) = request.since_ts {
            query.push(("startTime", (since_ts * 1000).to_string()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
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

        let klines: Vec<Kline> = response.json().await.context(TransportSnafu)?;
        debug!(symbol = %request.token_address, klines = klines.len(), "fetched klines");
        klines.into_iter().map(Kline::into_raw_bar).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_KLINE: &str = r#"[
        [1700000000000, "37000.10", "37050.00", "36990.00", "37025.50",
         "12.5", 1700000059999, "462818.75", 317, "6.1", "225900.00", "0"]
    ]"#;

    #[test]
    fn kline_row_converts_to_raw_bar() {
        let klines: Vec<Kline> = serde_json::from_str(SAMPLE_KLINE).unwrap();
        assert_eq!(klines.len(), 1);

        let bar = klines.into_iter().next().unwrap().into_raw_bar().unwrap();
        assert_eq!(bar.open_ts, 1_700_000_000);
        assert_eq!(bar.close_ts, 1_700_000_059);
        assert_eq!(bar.open, 37000.10);
        assert_eq!(bar.high, 37050.00);
        assert_eq!(bar.low, 36990.00);
        assert_eq!(bar.close, 37025.50);
        assert_eq!(bar.volume_base, 12.5);
        assert_eq!(bar.volume_quote, 462818.75);
        assert_eq!(bar.notional_usd, 462818.75);
        assert_eq!(bar.trades, 317);
    }

    #[test]
    fn non_decimal_price_is_a_decode_error() {
        let raw = r#"[[0, "nope", "1", "1", "1", "1", 60000, "1", 1, "0", "0", "0"]]"#;
        let klines: Vec<Kline> = serde_json::from_str(raw).unwrap();
        let err = klines.into_iter().next().unwrap().into_raw_bar().unwrap_err();
        assert!(matches!(err, ConnectorError::Decode { .. }));
    }
}
