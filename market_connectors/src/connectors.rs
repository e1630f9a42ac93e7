//! Source connector capability for market-data fetching.
//!
//! This module defines the [`SourceConnector`] trait, the single interface
//! through which heterogeneous data sources (exchange REST APIs, DEX price
//! endpoints) expose bar data to the ingestion pipeline.
//!
//! Each concrete connector implements [`SourceConnector`] and owns its own
//! transport concerns: HTTP timeouts, rate limits, response decoding. The
//! trait is designed for async usage and dynamic dispatch
//! (`dyn SourceConnector`), so sources can be selected at runtime through a
//! registry.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_connectors::connectors::{ConnectorError, SourceConnector};
//! use market_connectors::models::{bar::RawBar, request::BarsRequest};
//!
//! struct MySource;
//!
//! #[async_trait]
//! impl SourceConnector for MySource {
//!     async fn fetch_bars(
//!         &self,
//!         _request: &BarsRequest,
//!     ) -> Result<Vec<RawBar>, ConnectorError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod binance;
pub mod pancake;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{bar::RawBar, request::BarsRequest};

/// Trait for fetching raw time-series bars from one market-data source.
///
/// Implementations must distinguish "no usable data" (return an empty vec,
/// e.g. when a price endpoint reports a zero/unset price) from transport or
/// API failures (return an error). Whether a failure is fatal is the
/// caller's decision, not the connector's.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    /// Fetches bars for the requested market.
    ///
    /// # Returns
    ///
    /// * `Ok(bars)` - A finite, possibly empty sequence of untagged raw bars.
    /// * `Err(ConnectorError)` - The source could not be reached or returned
    ///   an unusable response.
    async fn fetch_bars(&self, request: &BarsRequest) -> Result<Vec<RawBar>, ConnectorError>;
}

/// Errors that can occur while constructing a connector instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectorInitError {
    /// failed to build the reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur inside a [`SourceConnector`] implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectorError {
    /// A transport-level failure (network error, timeout, TLS).
    #[snafu(display("API request failed: {source}"))]
    Transport {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The source's API answered with a non-success status or error body.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The source answered, but the payload could not be interpreted.
    #[snafu(display("Malformed payload from source: {message}"))]
    Decode {
        message: String,
        backtrace: Backtrace,
    },

    /// An error during connector configuration or initialization.
    #[snafu(display("Connector initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ConnectorInitError,
    },
}
