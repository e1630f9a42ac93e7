mod common;

use bar_store::error::StoreError;
use common::{sample_event, sample_rule, sample_token, setup_store};

#[test]
fn duplicate_event_id_keeps_first_payload() {
    let (_db, store) = setup_store();

    let first = sample_event("evt-1");
    store.insert_event(&first).unwrap();

    let mut replay = sample_event("evt-1");
    replay.message = "different payload".to_string();
    store.insert_event(&replay).unwrap();

    let events = store.fetch_undelivered_events(None).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "hello");
}

#[test]
fn empty_event_id_is_rejected() {
    let (_db, store) = setup_store();

    let blank = sample_event("");
    assert!(matches!(
        store.insert_event(&blank),
        Err(StoreError::Validation(_))
    ));
}

#[test]
fn delivery_marking_drains_the_undelivered_queue() {
    let (_db, store) = setup_store();

    let mut early = sample_event("evt-a");
    early.created_at = 1000;
    let mut late = sample_event("evt-b");
    late.created_at = 3000;
    store.insert_event(&late).unwrap();
    store.insert_event(&early).unwrap();

    let pending = store.fetch_undelivered_events(None).unwrap();
    assert_eq!(pending.len(), 2);
    // Oldest first.
    assert_eq!(pending[0].id, "evt-a");

    assert!(store.mark_event_delivered("evt-a").unwrap());
    // Marking an unknown id reports false rather than failing.
    assert!(!store.mark_event_delivered("evt-missing").unwrap());

    let remaining = store.fetch_undelivered_events(None).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "evt-b");

    let capped = store.fetch_undelivered_events(Some(0)).unwrap();
    assert!(capped.is_empty());
}

#[test]
fn kv_round_trips_and_last_write_wins() {
    let (_db, store) = setup_store();

    assert!(store.get_kv("ingest:last_close:tok-1").unwrap().is_none());

    store
        .set_kv("ingest:last_close:tok-1", "1700000060", 100)
        .unwrap();
    store
        .set_kv("ingest:last_close:tok-1", "1700000120", 200)
        .unwrap();

    let entry = store.get_kv("ingest:last_close:tok-1").unwrap().unwrap();
    assert_eq!(entry.value, "1700000120");
    assert_eq!(entry.updated_at, 200);
}

#[test]
fn rules_upsert_by_id_and_list_deterministically() {
    let (_db, store) = setup_store();

    store
        .upsert_rule(&sample_rule("r-1", "ETHUSDT", 3000.0))
        .unwrap();
    store
        .upsert_rule(&sample_rule("r-2", "BTCUSDT", 70000.0))
        .unwrap();
    store
        .upsert_rule(&sample_rule("r-3", "BTCUSDT", 60000.0))
        .unwrap();

    // Replace r-1 wholesale.
    let mut updated = sample_rule("r-1", "ETHUSDT", 3500.0);
    updated.enabled = false;
    store.upsert_rule(&updated).unwrap();

    let all = store.list_rules(None, None).unwrap();
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    // (symbol, level) ascending.
    assert_eq!(ids, vec!["r-3", "r-2", "r-1"]);
    assert_eq!(all[2].level, Some(3500.0));

    let btc_only = store.list_rules(Some("BTCUSDT"), None).unwrap();
    assert_eq!(btc_only.len(), 2);

    let enabled_only = store.list_rules(None, Some(true)).unwrap();
    assert_eq!(enabled_only.len(), 2);
    assert!(enabled_only.iter().all(|r| r.id != "r-1"));
}

#[test]
fn rule_upsert_clears_dropped_optional_fields() {
    let (_db, store) = setup_store();

    store
        .upsert_rule(&sample_rule("r-1", "BTCUSDT", 70000.0))
        .unwrap();

    // Re-upsert with the optional fields unset; the replacement must win,
    // not the stale stored values.
    let mut cleared = sample_rule("r-1", "BTCUSDT", 0.0);
    cleared.level = None;
    cleared.hysteresis = None;
    cleared.message = None;
    store.upsert_rule(&cleared).unwrap();

    let rules = store.list_rules(None, None).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].level, None);
    assert_eq!(rules[0].hysteresis, None);
    assert_eq!(rules[0].message, None);
}

#[test]
fn token_upsert_clears_dropped_optional_fields() {
    let (_db, store) = setup_store();

    store
        .upsert_token(&sample_token("tok-1", "CAKEUSDT", "pancake"))
        .unwrap();

    let mut cleared = sample_token("tok-1", "CAKEUSDT", "pancake");
    cleared.pool_address = None;
    cleared.decimals = None;
    cleared.extra_json = None;
    store.upsert_token(&cleared).unwrap();

    let tokens = store.list_tokens(None).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].pool_address, None);
    assert_eq!(tokens[0].decimals, None);
    assert_eq!(tokens[0].extra_json, None);
}

#[test]
fn token_registry_upserts_and_filters() {
    let (_db, store) = setup_store();

    store
        .upsert_token(&sample_token("tok-1", "CAKEUSDT", "pancake"))
        .unwrap();
    let mut disabled = sample_token("tok-2", "BNBUSDT", "pancake");
    disabled.enabled = false;
    store.upsert_token(&disabled).unwrap();

    let all = store.list_tokens(None).unwrap();
    assert_eq!(all.len(), 2);
    // Ordered by symbol.
    assert_eq!(all[0].symbol, "BNBUSDT");

    let active = store.list_tokens(Some(true)).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "tok-1");

    // Same id replaces the row.
    let mut renamed = sample_token("tok-1", "CAKEBUSD", "pancake");
    renamed.quote = "BUSD".to_string();
    store.upsert_token(&renamed).unwrap();
    let all = store.list_tokens(None).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|t| t.symbol == "CAKEBUSD"));
}
