//! Declarative per-column conflict policy for bar upserts.
//!
//! A [`MergePolicy`] lists every inserted column together with what happens
//! to it when an incoming row collides with an existing one on the conflict
//! target: [`ConflictAction::Overwrite`] takes the incoming value,
//! [`ConflictAction::Preserve`] keeps whatever the prior row holds. The SQL
//! for the upsert is rendered from this table, so the policy can be
//! inspected and tested without touching the storage backend.

/// What happens to one column when an upsert hits an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAction {
    /// The incoming value replaces the stored one.
    Overwrite,
    /// The stored value survives; the incoming one is dropped.
    Preserve,
}

/// Column-by-column merge policy applied on composite-identity conflicts.
pub struct MergePolicy {
    conflict_target: &'static [&'static str],
    columns: &'static [(&'static str, ConflictAction)],
}

impl MergePolicy {
    /// Builds a policy over `columns` (in insert order) conflicting on
    /// `conflict_target`, which must be a subset of the columns.
    pub const fn new(
        conflict_target: &'static [&'static str],
        columns: &'static [(&'static str, ConflictAction)],
    ) -> Self {
        Self {
            conflict_target,
            columns,
        }
    }

    /// The columns forming the natural identity of a row.
    pub fn conflict_target(&self) -> &[&'static str] {
        self.conflict_target
    }

    /// All inserted column names, in bind order.
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    /// The action applied to `column` on conflict, if the policy knows it.
    pub fn action_for(&self, column: &str) -> Option<ConflictAction> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, action)| *action)
    }

    /// Renders the full upsert statement for `table`, with one positional
    /// placeholder per column in declaration order.
    ///
    /// Identity columns and `Preserve` columns are left out of the update
    /// clause; when nothing remains to update the statement degrades to
    /// `DO NOTHING`. `table` must come from the [`crate::timeframe::Timeframe`]
    /// allow-set, never from caller input.
    pub fn upsert_sql(&self, table: &str) -> String {
        let names: Vec<&str> = self.column_names().collect();
        let placeholders = vec!["?"; names.len()].join(", ");
        let target = self.conflict_target.join(", ");

        let updates: Vec<String> = self
            .columns
            .iter()
            .filter(|(name, action)| {
                *action == ConflictAction::Overwrite && !self.conflict_target.contains(name)
            })
            .map(|(name, _)| format!("{name}=excluded.{name}"))
            .collect();

        if updates.is_empty() {
            format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders}) ON CONFLICT({target}) DO NOTHING",
                names.join(", ")
            )
        } else {
            format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders}) ON CONFLICT({target}) DO UPDATE SET {}",
                names.join(", "),
                updates.join(", ")
            )
        }
    }
}

/// Merge policy for the bar tables.
///
/// Every column follows the incoming write except `bid`: a best-bid
/// snapshot captured once must survive subsequent OHLCV-only re-writes of
/// the same candle. The column order here is the bind order used by the
/// store.
pub const BAR_MERGE_POLICY: MergePolicy = MergePolicy::new(
    &["source", "exchange", "chain", "symbol", "close_ts"],
    &[
        ("source", ConflictAction::Overwrite),
        ("exchange", ConflictAction::Overwrite),
        ("chain", ConflictAction::Overwrite),
        ("symbol", ConflictAction::Overwrite),
        ("base", ConflictAction::Overwrite),
        ("quote", ConflictAction::Overwrite),
        ("open_ts", ConflictAction::Overwrite),
        ("close_ts", ConflictAction::Overwrite),
        ("open", ConflictAction::Overwrite),
        ("high", ConflictAction::Overwrite),
        ("low", ConflictAction::Overwrite),
        ("close", ConflictAction::Overwrite),
        ("volume_base", ConflictAction::Overwrite),
        ("volume_quote", ConflictAction::Overwrite),
        ("notional_usd", ConflictAction::Overwrite),
        ("trades", ConflictAction::Overwrite),
        ("bid", ConflictAction::Preserve),
    ],
);
