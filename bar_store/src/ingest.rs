//! The ingestion orchestrator: one fetch-normalize-persist cycle over the
//! tracked markets.
//!
//! A cycle enumerates enabled tokens, resolves each one's connector,
//! fetches raw bars, tags them with the market's identity fields, and
//! writes them through the store. Connector failures are strictly
//! per-market: one unreachable source never aborts the cycle for the rest.
//! Store failures do abort — they threaten durability and must not be
//! swallowed behind a misleadingly low count.

use chrono::Utc;
use market_connectors::models::{bar::RawBar, request::BarsRequest};
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::models::{Bar, TrackedToken};
use crate::registry::ConnectorRegistry;
use crate::store::BarStore;
use crate::timeframe::Timeframe;

/// Watermark key remembering the last ingested `close_ts` for one market.
pub fn watermark_key(token_id: &str) -> String {
    format!("ingest:last_close:{token_id}")
}

/// Merges a raw bar with the identity tags of the market it was fetched
/// for. Connectors return untagged bars because one connector instance may
/// serve many markets.
fn tag_bar(token: &TrackedToken, raw: RawBar) -> Bar {
    Bar {
        source: token.source.clone(),
        exchange: token.exchange.clone(),
        chain: token.chain.clone(),
        symbol: token.symbol.clone(),
        base: token.base.clone(),
        quote: token.quote.clone(),
        open_ts: raw.open_ts,
        close_ts: raw.close_ts,
        open: raw.open,
        high: raw.high,
        low: raw.low,
        close: raw.close,
        volume_base: raw.volume_base,
        volume_quote: raw.volume_quote,
        notional_usd: raw.notional_usd,
        trades: raw.trades,
        bid: None,
    }
}

/// Runs one ingestion cycle over all enabled tracked markets and returns
/// the total number of bars written.
///
/// `since_ts` overrides the incremental cursor for every market; when
/// `None`, each market resumes from its stored watermark (if any). After a
/// market's bars persist, its watermark advances to the newest `close_ts`.
///
/// Markets whose `exchange` has no registered connector are skipped
/// (debug-logged), as are markets whose fetch fails (warn-logged); neither
/// counts as a cycle failure. Store errors propagate and abort the cycle.
pub async fn sync_tracked_tokens(
    store: &BarStore,
    registry: &ConnectorRegistry,
    since_ts: Option<i64>,
) -> StoreResult<usize> {
    let tokens = store.list_tokens(Some(true))?;
    let mut written = 0usize;

    for token in &tokens {
        let Some(connector) = registry.get(&token.exchange) else {
            debug!(
                exchange = %token.exchange,
                symbol = %token.symbol,
                "no connector registered; skipping market"
            );
            continue;
        };

        let cursor = match since_ts {
            Some(ts) => Some(ts),
            None => store
                .get_kv(&watermark_key(&token.id))?
                .and_then(|entry| entry.value.parse().ok()),
        };

        let request = BarsRequest {
            chain: token.chain.clone(),
            token_address: token.token_address.clone(),
            pool_address: token.pool_address.clone(),
            since_ts: cursor,
        };

        let bars = match connector.fetch_bars(&request).await {
            Ok(bars) => bars,
            Err(error) => {
                warn!(
                    symbol = %token.symbol,
                    exchange = %token.exchange,
                    %error,
                    "bar fetch failed; market skipped for this cycle"
                );
                continue;
            }
        };
        if bars.is_empty() {
            continue;
        }

        let tagged: Vec<Bar> = bars.into_iter().map(|raw| tag_bar(token, raw)).collect();
        written += store.upsert_bars(Timeframe::M1, &tagged)?;

        if let Some(max_close) = tagged.iter().map(|bar| bar.close_ts).max() {
            store.set_kv(
                &watermark_key(&token.id),
                &max_close.to_string(),
                Utc::now().timestamp(),
            )?;
        }
    }

    info!(markets = tokens.len(), bars = written, "ingestion cycle complete");
    Ok(written)
}
