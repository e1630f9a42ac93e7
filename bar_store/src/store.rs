//! The durable bar store: serialized SQLite access with conflict-aware
//! upserts keyed by natural composite identity.
//!
//! Every operation acquires the store-wide lock, opens a fresh connection,
//! executes inside one implicit transaction, and releases both on all exit
//! paths — the engine is not assumed safe for concurrent connection use.
//! There is no cross-operation transaction: callers needing atomicity over
//! several writes batch them into a single call such as
//! [`BarStore::upsert_bars`].

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Double, Nullable, Text};

use crate::db::connection::connect_sqlite;
use crate::error::{StoreError, StoreResult};
use crate::merge::BAR_MERGE_POLICY;
use crate::models::{AlertEvent, AlertRule, Bar, KvEntry, TrackedToken};
use crate::schema::{events, kv_state, price_alert_rules, token_registry};
use crate::timeframe::Timeframe;

/// Column list matching [`Bar`]'s `QueryableByName` fields.
const BAR_COLUMNS: &str = "source, exchange, chain, symbol, base, quote, open_ts, close_ts, \
     open, high, low, close, volume_base, volume_quote, notional_usd, trades, bid";

/// Handle to the SQLite-backed time-series store.
pub struct BarStore {
    db_path: PathBuf,
    lock: Mutex<()>,
}

impl BarStore {
    /// Creates a store handle for the database at `db_path`.
    ///
    /// The file is not touched until the first operation; run
    /// [`crate::db::migrate::run_sqlite`] beforehand to create the schema.
    pub fn open(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The database file this store reads and writes.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn with_conn<T>(
        &self,
        op: impl FnOnce(&mut SqliteConnection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut conn = connect_sqlite(&self.db_path)?;
        op(&mut conn)
    }

    // ---- bars ----

    /// Inserts a bar, or merges it into the existing row sharing its
    /// composite identity `(source, exchange, chain, symbol, close_ts)`.
    ///
    /// The merge follows [`crate::merge::BAR_MERGE_POLICY`]: all columns
    /// take the incoming value except `bid`, which is preserved from the
    /// prior row.
    pub fn upsert_bar(&self, timeframe: Timeframe, bar: &Bar) -> StoreResult<()> {
        validate_bar(bar)?;
        self.with_conn(|conn| insert_bar(conn, timeframe, bar))
    }

    /// Upserts a batch of bars atomically, in one transaction.
    ///
    /// Returns the number of bars written. An empty batch is a no-op.
    pub fn upsert_bars(&self, timeframe: Timeframe, bars: &[Bar]) -> StoreResult<usize> {
        if bars.is_empty() {
            return Ok(0);
        }
        for bar in bars {
            validate_bar(bar)?;
        }
        self.with_conn(|conn| {
            conn.immediate_transaction(|conn| {
                for bar in bars {
                    insert_bar(conn, timeframe, bar)?;
                }
                Ok(bars.len())
            })
        })
    }

    /// Fetches bars for `symbol` ordered by `close_ts` ascending,
    /// optionally filtered to `close_ts >= since_ts` and capped at `limit`
    /// rows.
    pub fn fetch_bars(
        &self,
        timeframe: Timeframe,
        symbol: &str,
        since_ts: Option<i64>,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Bar>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {BAR_COLUMNS} FROM {} WHERE symbol = ? AND close_ts >= ? \
                 ORDER BY close_ts ASC LIMIT ?",
                timeframe.table()
            );
            // LIMIT -1 disables the cap in SQLite.
            let rows = sql_query(sql)
                .bind::<Text, _>(symbol)
                .bind::<BigInt, _>(since_ts.unwrap_or(i64::MIN))
                .bind::<BigInt, _>(limit.unwrap_or(-1))
                .load::<Bar>(conn)?;
            Ok(rows)
        })
    }

    /// Fetches the newest bar for `symbol`, if any.
    pub fn fetch_latest_bar(&self, timeframe: Timeframe, symbol: &str) -> StoreResult<Option<Bar>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {BAR_COLUMNS} FROM {} WHERE symbol = ? ORDER BY close_ts DESC LIMIT 1",
                timeframe.table()
            );
            let rows = sql_query(sql).bind::<Text, _>(symbol).load::<Bar>(conn)?;
            Ok(rows.into_iter().next())
        })
    }

    // ---- events ----

    /// Persists an event exactly once.
    ///
    /// Re-insertion of an already-recorded `id` is a silent no-op — events
    /// are immutable, so the first payload wins.
    pub fn insert_event(&self, event: &AlertEvent) -> StoreResult<()> {
        if event.id.is_empty() {
            return Err(StoreError::Validation("event id must be non-empty".into()));
        }
        self.with_conn(|conn| {
            diesel::insert_into(events::table)
                .values(event)
                .on_conflict(events::id)
                .do_nothing()
                .execute(conn)?;
            Ok(())
        })
    }

    /// Lists events the notification layer has not delivered yet, oldest
    /// first.
    pub fn fetch_undelivered_events(&self, limit: Option<i64>) -> StoreResult<Vec<AlertEvent>> {
        self.with_conn(|conn| {
            let mut query = events::table
                .filter(events::delivered.eq(false))
                .select(AlertEvent::as_select())
                .order((events::created_at.asc(), events::id.asc()))
                .into_boxed();
            if let Some(limit) = limit {
                query = query.limit(limit);
            }
            Ok(query.load(conn)?)
        })
    }

    /// Marks an event as delivered. Returns whether a row changed.
    pub fn mark_event_delivered(&self, event_id: &str) -> StoreResult<bool> {
        self.with_conn(|conn| {
            let changed = diesel::update(events::table.filter(events::id.eq(event_id)))
                .set(events::delivered.eq(true))
                .execute(conn)?;
            Ok(changed > 0)
        })
    }

    // ---- watermarks ----

    /// Upserts a watermark entry; last write wins.
    pub fn set_kv(&self, key: &str, value: &str, updated_at: i64) -> StoreResult<()> {
        self.with_conn(|conn| {
            diesel::insert_into(kv_state::table)
                .values((
                    kv_state::key.eq(key),
                    kv_state::value.eq(value),
                    kv_state::updated_at.eq(updated_at),
                ))
                .on_conflict(kv_state::key)
                .do_update()
                .set((
                    kv_state::value.eq(value),
                    kv_state::updated_at.eq(updated_at),
                ))
                .execute(conn)?;
            Ok(())
        })
    }

    /// Point lookup of a watermark entry.
    pub fn get_kv(&self, key: &str) -> StoreResult<Option<KvEntry>> {
        self.with_conn(|conn| {
            Ok(kv_state::table
                .find(key)
                .select(KvEntry::as_select())
                .first(conn)
                .optional()?)
        })
    }

    // ---- alert rules ----

    /// Inserts or fully replaces a rule keyed by `id`.
    pub fn upsert_rule(&self, rule: &AlertRule) -> StoreResult<()> {
        if rule.id.is_empty() {
            return Err(StoreError::Validation("rule id must be non-empty".into()));
        }
        self.with_conn(|conn| {
            diesel::insert_into(price_alert_rules::table)
                .values(rule)
                .on_conflict(price_alert_rules::id)
                .do_update()
                .set(rule)
                .execute(conn)?;
            Ok(())
        })
    }

    /// Lists rules ordered by `(symbol, level)`, optionally filtered by
    /// symbol and enabled flag.
    pub fn list_rules(
        &self,
        symbol: Option<&str>,
        enabled: Option<bool>,
    ) -> StoreResult<Vec<AlertRule>> {
        self.with_conn(|conn| {
            let mut query = price_alert_rules::table
                .select(AlertRule::as_select())
                .into_boxed();
            if let Some(symbol) = symbol {
                query = query.filter(price_alert_rules::symbol.eq(symbol.to_owned()));
            }
            if let Some(enabled) = enabled {
                query = query.filter(price_alert_rules::enabled.eq(enabled));
            }
            Ok(query
                .order((
                    price_alert_rules::symbol.asc(),
                    price_alert_rules::level.asc(),
                ))
                .load(conn)?)
        })
    }

    // ---- tracked tokens ----

    /// Inserts or fully replaces a tracked market keyed by `id`.
    pub fn upsert_token(&self, token: &TrackedToken) -> StoreResult<()> {
        if token.id.is_empty() {
            return Err(StoreError::Validation("token id must be non-empty".into()));
        }
        self.with_conn(|conn| {
            diesel::insert_into(token_registry::table)
                .values(token)
                .on_conflict(token_registry::id)
                .do_update()
                .set(token)
                .execute(conn)?;
            Ok(())
        })
    }

    /// Lists tracked markets ordered by symbol, optionally filtered by the
    /// enabled flag.
    pub fn list_tokens(&self, enabled: Option<bool>) -> StoreResult<Vec<TrackedToken>> {
        self.with_conn(|conn| {
            let mut query = token_registry::table
                .select(TrackedToken::as_select())
                .into_boxed();
            if let Some(enabled) = enabled {
                query = query.filter(token_registry::enabled.eq(enabled));
            }
            Ok(query.order(token_registry::symbol.asc()).load(conn)?)
        })
    }
}

fn validate_bar(bar: &Bar) -> StoreResult<()> {
    if bar.source.is_empty() || bar.exchange.is_empty() || bar.symbol.is_empty() {
        return Err(StoreError::Validation(
            "bar identity requires non-empty source, exchange and symbol".into(),
        ));
    }
    if bar.open_ts >= bar.close_ts {
        return Err(StoreError::Validation(format!(
            "bar window must satisfy open_ts < close_ts (got {}..{})",
            bar.open_ts, bar.close_ts
        )));
    }
    if [bar.open, bar.high, bar.low, bar.close].iter().any(|p| *p < 0.0) {
        return Err(StoreError::Validation(
            "bar prices must be non-negative".into(),
        ));
    }
    Ok(())
}

fn insert_bar(conn: &mut SqliteConnection, timeframe: Timeframe, bar: &Bar) -> StoreResult<()> {
    // Bind order must match the column order declared in
    // `merge::BAR_MERGE_POLICY`.
    let sql = BAR_MERGE_POLICY.upsert_sql(timeframe.table());
    sql_query(sql)
        .bind::<Text, _>(&bar.source)
        .bind::<Text, _>(&bar.exchange)
        .bind::<Text, _>(&bar.chain)
        .bind::<Text, _>(&bar.symbol)
        .bind::<Text, _>(&bar.base)
        .bind::<Text, _>(&bar.quote)
        .bind::<BigInt, _>(bar.open_ts)
        .bind::<BigInt, _>(bar.close_ts)
        .bind::<Double, _>(bar.open)
        .bind::<Double, _>(bar.high)
        .bind::<Double, _>(bar.low)
        .bind::<Double, _>(bar.close)
        .bind::<Double, _>(bar.volume_base)
        .bind::<Double, _>(bar.volume_quote)
        .bind::<Double, _>(bar.notional_usd)
        .bind::<BigInt, _>(bar.trades)
        .bind::<Nullable<Double>, _>(bar.bid)
        .execute(conn)?;
    Ok(())
}
