//! Row types mapping to the database schema.
//!
//! These mirror the tables created by the embedded migrations. The
//! auxiliary tables ([`crate::schema::events`],
//! [`crate::schema::price_alert_rules`], [`crate::schema::token_registry`],
//! [`crate::schema::kv_state`]) use Diesel's Queryable/Insertable APIs;
//! [`Bar`] is `QueryableByName` because the bar tables are dispatched by
//! [`crate::timeframe::Timeframe`] at runtime.
//!
//! All of these are plain values: the store hands out copies, never live
//! handles into its internals.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};
use serde::{Deserialize, Serialize};

use crate::schema::{events, kv_state, price_alert_rules, token_registry};

/// One OHLCV observation for a market over a fixed time window.
///
/// The composite identity `(source, exchange, chain, symbol, close_ts)` is
/// unique within each timeframe table; a later write with the same identity
/// merges into the existing row under the bar merge policy.
#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize, Deserialize)]
pub struct Bar {
    /// Provenance class of the feed, e.g. `"cex"` or `"dex"`.
    #[diesel(sql_type = Text)]
    pub source: String,

    /// The specific venue, e.g. `"binance"` or `"pancake"`.
    #[diesel(sql_type = Text)]
    pub exchange: String,

    /// Blockchain identifier for on-chain markets; empty for centralized venues.
    #[diesel(sql_type = Text)]
    pub chain: String,

    /// Canonical market symbol, e.g. `"BTCUSDT"`.
    #[diesel(sql_type = Text)]
    pub symbol: String,

    /// Base asset of the pair.
    #[diesel(sql_type = Text)]
    pub base: String,

    /// Quote asset of the pair.
    #[diesel(sql_type = Text)]
    pub quote: String,

    /// Window start, epoch seconds UTC.
    #[diesel(sql_type = BigInt)]
    pub open_ts: i64,

    /// Window end, epoch seconds UTC.
    #[diesel(sql_type = BigInt)]
    pub close_ts: i64,

    /// Opening price.
    #[diesel(sql_type = Double)]
    pub open: f64,

    /// Highest price during the window.
    #[diesel(sql_type = Double)]
    pub high: f64,

    /// Lowest price during the window.
    #[diesel(sql_type = Double)]
    pub low: f64,

    /// Closing price.
    #[diesel(sql_type = Double)]
    pub close: f64,

    /// Volume in the base asset.
    #[diesel(sql_type = Double)]
    pub volume_base: f64,

    /// Volume in the quote asset.
    #[diesel(sql_type = Double)]
    pub volume_quote: f64,

    /// Approximate USD notional of the traded volume.
    #[diesel(sql_type = Double)]
    pub notional_usd: f64,

    /// Trade count for the window.
    #[diesel(sql_type = BigInt)]
    pub trades: i64,

    /// Optional best-bid snapshot. Exempt from overwrite on conflict: once
    /// captured it survives OHLCV-only re-writes of the same candle.
    #[diesel(sql_type = Nullable<Double>)]
    pub bid: Option<f64>,
}

/// A row in [`crate::schema::events`]: one alert produced by the rule
/// evaluation layer, persisted exactly once.
///
/// Events are immutable once recorded; re-insertion of the same `id` is a
/// silent no-op. `delivered` tracks whether the notification layer has
/// replayed the event.
#[derive(Debug, Clone, PartialEq, Queryable, Insertable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = events, check_for_backend(diesel::sqlite::Sqlite))]
pub struct AlertEvent {
    /// Caller-assigned unique event id.
    pub id: String,
    /// Observation timestamp the event refers to, epoch seconds UTC.
    pub ts: i64,
    /// Market symbol the event concerns.
    pub symbol: String,
    /// Provenance class of the triggering bar.
    pub source: String,
    /// Venue of the triggering bar.
    pub exchange: String,
    /// Timeframe label of the triggering bar, e.g. `"1m"`.
    pub timeframe: String,
    /// Name of the rule that fired.
    pub rule: String,
    /// Severity label, e.g. `"info"` or `"critical"`.
    pub severity: String,
    /// Human-readable message.
    pub message: String,
    /// Arbitrary JSON detail payload.
    pub detail_json: String,
    /// Row creation timestamp, epoch seconds UTC.
    pub created_at: i64,
    /// Whether the notification layer has delivered this event.
    pub delivered: bool,
}

/// A row in [`crate::schema::price_alert_rules`]: one alert rule definition.
///
/// The store only guarantees durable upsert-by-id and deterministic listing;
/// evaluation semantics live in the rules layer.
#[derive(Debug, Clone, PartialEq, Queryable, Insertable, AsChangeset, Selectable, Serialize, Deserialize)]
#[diesel(table_name = price_alert_rules, treat_none_as_null = true, check_for_backend(diesel::sqlite::Sqlite))]
pub struct AlertRule {
    /// Caller-assigned unique rule id.
    pub id: String,
    /// Market symbol the rule watches.
    pub symbol: String,
    /// Rule type discriminator (stored in the `type` column).
    pub kind: String,
    /// Absolute price level, for level-crossing rules.
    pub level: Option<f64>,
    /// Percentage threshold, for percent-move rules.
    pub pct: Option<f64>,
    /// ATR multiplier, for volatility-scaled rules.
    pub atr_k: Option<f64>,
    /// Direction filter, e.g. `"up"` or `"down"`.
    pub direction: Option<String>,
    /// Absolute re-arm hysteresis.
    pub hysteresis: Option<f64>,
    /// Percentage re-arm hysteresis.
    pub hysteresis_pct: Option<f64>,
    /// Confirmation mode, e.g. `"time"` or `"samples"`.
    pub confirm_mode: Option<String>,
    /// Seconds the condition must hold, for time confirmation.
    pub confirm_seconds: Option<i64>,
    /// Sample window size, for sample confirmation.
    pub confirm_samples_total: Option<i64>,
    /// Samples that must pass within the window.
    pub confirm_samples_pass: Option<i64>,
    /// Timeframe the confirmation samples are drawn from.
    pub confirm_timeframe: Option<String>,
    /// Message template attached to fired events.
    pub message: Option<String>,
    /// Whether the rule participates in evaluation.
    pub enabled: bool,
    /// Row creation timestamp, epoch seconds UTC.
    pub created_at: i64,
}

/// A row in [`crate::schema::token_registry`]: one tracked market the
/// ingestion orchestrator polls.
///
/// `exchange` selects the connector; a market whose exchange has no
/// registered connector is skipped, never an error.
#[derive(Debug, Clone, PartialEq, Queryable, Insertable, AsChangeset, Selectable, Serialize, Deserialize)]
#[diesel(table_name = token_registry, treat_none_as_null = true, check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrackedToken {
    /// Caller-assigned unique token id.
    pub id: String,
    /// Provenance class tag stamped onto ingested bars, e.g. `"dex"`.
    pub source: String,
    /// Connector selector and venue tag, e.g. `"binance"`, `"pancake"`.
    pub exchange: String,
    /// Blockchain identifier; empty for centralized venues.
    pub chain: String,
    /// Canonical market symbol.
    pub symbol: String,
    /// Base asset of the pair.
    pub base: String,
    /// Quote asset of the pair.
    pub quote: String,
    /// Token contract address, or the venue pair symbol for centralized venues.
    pub token_address: String,
    /// Liquidity pool address, where the source distinguishes pools.
    pub pool_address: Option<String>,
    /// On-chain token decimals.
    pub decimals: Option<i64>,
    /// Whether the orchestrator polls this market.
    pub enabled: bool,
    /// Free-form JSON for source-specific extras.
    pub extra_json: Option<String>,
    /// Row creation timestamp, epoch seconds UTC.
    pub created_at: i64,
}

/// A row in [`crate::schema::kv_state`]: one durable watermark/cursor entry.
///
/// Upsert-only, last write wins.
#[derive(Debug, Clone, PartialEq, Queryable, Insertable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = kv_state, check_for_backend(diesel::sqlite::Sqlite))]
pub struct KvEntry {
    /// Namespaced cursor key, e.g. `"ingest:last_close:<token id>"`.
    pub key: String,
    /// Cursor value, stored as text.
    pub value: String,
    /// When the value was last written, epoch seconds UTC.
    pub updated_at: i64,
}
