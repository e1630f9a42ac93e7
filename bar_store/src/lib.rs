//! Canonical, deduplicated time-series storage and ingestion for crypto
//! market bars.
//!
//! The crate has three responsibilities:
//! - [`store::BarStore`] — serialized SQLite persistence with
//!   conflict-aware upserts keyed by natural composite identity, plus the
//!   small auxiliary tables (alert rules, tracked tokens, watermarks,
//!   delivery-tracked events).
//! - [`registry::ConnectorRegistry`] — runtime mapping from a market's
//!   `exchange` field to the connector that serves it.
//! - [`ingest`] — the orchestrator driving one fetch-normalize-persist
//!   cycle across all enabled tracked markets, isolating per-market
//!   failures.

#![deny(missing_docs)]

pub mod db;
pub mod error;
pub mod ingest;
pub mod merge;
pub mod models;
pub mod registry;
// diesel's table! macro expands to undocumented public column structs.
#[allow(missing_docs)]
pub mod schema;
pub mod store;
pub mod timeframe;
