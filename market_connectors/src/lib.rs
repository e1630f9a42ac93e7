//! Connector abstractions for heterogeneous crypto market-data sources.
//!
//! This crate defines the [`connectors::SourceConnector`] capability — fetch a
//! finite sequence of raw OHLCV bars for one market — together with concrete
//! implementations for Binance's REST klines endpoint and PancakeSwap's
//! token-price API. Connectors own their transport concerns (timeouts, rate
//! limits); attaching provenance tags to the bars they return is the
//! ingestion orchestrator's job, since one connector instance may serve many
//! markets.

pub mod connectors;
pub mod models;
