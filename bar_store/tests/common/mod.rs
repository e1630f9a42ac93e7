#![allow(dead_code)]

use std::path::PathBuf;

use bar_store::db::migrate;
use bar_store::models::{AlertEvent, AlertRule, Bar, TrackedToken};
use bar_store::store::BarStore;
use tempfile::TempDir;

pub struct TestDb {
    _dir: TempDir, // keep alive for the life of the test
    pub path: PathBuf,
}

pub fn setup_store() -> (TestDb, BarStore) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("test.db");

    migrate::run_sqlite(&path).expect("migrations");

    let store = BarStore::open(path.clone());
    (TestDb { _dir: dir, path }, store)
}

pub fn sample_bar(symbol: &str, close_ts: i64) -> Bar {
    Bar {
        source: "cex".to_string(),
        exchange: "binance".to_string(),
        chain: String::new(),
        symbol: symbol.to_string(),
        base: "BTC".to_string(),
        quote: "USDT".to_string(),
        open_ts: close_ts - 60,
        close_ts,
        open: 1.0,
        high: 2.0,
        low: 0.5,
        close: 1.5,
        volume_base: 10.0,
        volume_quote: 150.0,
        notional_usd: 150.0,
        trades: 100,
        bid: None,
    }
}

pub fn sample_event(id: &str) -> AlertEvent {
    AlertEvent {
        id: id.to_string(),
        ts: 2000,
        symbol: "BTCUSDT".to_string(),
        source: "cex".to_string(),
        exchange: "binance".to_string(),
        timeframe: "1m".to_string(),
        rule: "price_above".to_string(),
        severity: "info".to_string(),
        message: "hello".to_string(),
        detail_json: "{}".to_string(),
        created_at: 2000,
        delivered: false,
    }
}

pub fn sample_rule(id: &str, symbol: &str, level: f64) -> AlertRule {
    AlertRule {
        id: id.to_string(),
        symbol: symbol.to_string(),
        kind: "above".to_string(),
        level: Some(level),
        pct: None,
        atr_k: None,
        direction: Some("up".to_string()),
        hysteresis: Some(1.0),
        hysteresis_pct: None,
        confirm_mode: Some("time".to_string()),
        confirm_seconds: Some(10),
        confirm_samples_total: None,
        confirm_samples_pass: None,
        confirm_timeframe: None,
        message: Some("test".to_string()),
        enabled: true,
        created_at: 1_700_000_000,
    }
}

pub fn sample_token(id: &str, symbol: &str, exchange: &str) -> TrackedToken {
    TrackedToken {
        id: id.to_string(),
        source: "dex".to_string(),
        exchange: exchange.to_string(),
        chain: "BNB".to_string(),
        symbol: symbol.to_string(),
        base: symbol.trim_end_matches("USDT").to_string(),
        quote: "USDT".to_string(),
        token_address: "0x123".to_string(),
        pool_address: Some("0xabc".to_string()),
        decimals: Some(18),
        enabled: true,
        extra_json: Some("{}".to_string()),
        created_at: 1_700_000_000,
    }
}
