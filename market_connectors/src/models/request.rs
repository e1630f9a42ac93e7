//! Parameters for a bar fetch against one market.

use serde::{Deserialize, Serialize};

/// A market reference plus an optional incremental cursor.
///
/// The field set is shared across venue classes: DEX adapters resolve the
/// market from `chain` / `token_address` / `pool_address`, while centralized
/// venues carry their pair symbol (e.g. `BTCUSDT`) in `token_address` and
/// leave `chain` empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarsRequest {
    /// Blockchain identifier for on-chain markets; empty for centralized venues.
    pub chain: String,

    /// Token contract address, or the venue pair symbol for centralized venues.
    pub token_address: String,

    /// Liquidity pool address, where the source distinguishes pools per token.
    pub pool_address: Option<String>,

    /// Only bars with `close_ts` at or after this epoch-second cursor are
    /// wanted. `None` asks for whatever recent window the source serves.
    pub since_ts: Option<i64>,
}
