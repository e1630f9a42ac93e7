//! Canonical in-memory representation of a raw time-series bar (OHLCV).
//!
//! This struct is the standard output of every
//! [`SourceConnector`](crate::connectors::SourceConnector) implementation,
//! regardless of venue class (centralized exchange, DEX price adapter).

use serde::{Deserialize, Serialize};

/// A single OHLCV observation over a fixed time window, as reported by a
/// source.
///
/// Raw bars carry no provenance: `source`, `exchange`, `symbol` and friends
/// are attached later by the caller that knows which market was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// Window start, epoch seconds UTC.
    pub open_ts: i64,

    /// Window end, epoch seconds UTC. Always greater than `open_ts`.
    pub close_ts: i64,

    /// Opening price.
    pub open: f64,

    /// Highest price during the window.
    pub high: f64,

    /// Lowest price during the window.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded, denominated in the base asset.
    pub volume_base: f64,

    /// Volume traded, denominated in the quote asset.
    pub volume_quote: f64,

    /// Approximate USD notional of the traded volume.
    pub notional_usd: f64,

    /// Number of trades in the window. Zero when the source does not report it.
    pub trades: i64,
}
