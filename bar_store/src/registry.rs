//! Runtime mapping from source identifiers to connector implementations.

use std::collections::HashMap;
use std::sync::Arc;

use market_connectors::connectors::{
    ConnectorInitError, SourceConnector, binance::BinanceConnector, pancake::PancakeConnector,
};

/// Maps a tracked market's `exchange` field to the connector serving it.
///
/// Constructed once at startup and passed to the ingestion cycle rather
/// than living in a process global, so initialization, teardown, and test
/// isolation stay explicit. [`register`](Self::register) overwrites any
/// prior binding, which lets tests install doubles and late-bound sources
/// plug in without touching the orchestrator.
#[derive(Default)]
pub struct ConnectorRegistry {
    connectors: HashMap<String, Arc<dyn SourceConnector>>,
}

impl ConnectorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the built-in connectors: `binance` (CEX
    /// REST klines) and `pancake` (DEX price snapshots).
    pub fn with_defaults() -> Result<Self, ConnectorInitError> {
        let mut registry = Self::new();
        registry.register("binance", Arc::new(BinanceConnector::new()?));
        registry.register("pancake", Arc::new(PancakeConnector::new()?));
        Ok(registry)
    }

    /// Binds `name` to `connector`, replacing any prior binding.
    pub fn register(&mut self, name: impl Into<String>, connector: Arc<dyn SourceConnector>) {
        self.connectors.insert(name.into(), connector);
    }

    /// Looks up the connector for `name`. A miss means "no connector", not
    /// an error; the caller decides what that implies.
    pub fn get(&self, name: &str) -> Option<Arc<dyn SourceConnector>> {
        self.connectors.get(name).cloned()
    }

    /// The currently bound source identifiers.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.connectors.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use market_connectors::connectors::ConnectorError;
    use market_connectors::models::{bar::RawBar, request::BarsRequest};

    use super::*;

    struct Empty;

    #[async_trait]
    impl SourceConnector for Empty {
        async fn fetch_bars(&self, _request: &BarsRequest) -> Result<Vec<RawBar>, ConnectorError> {
            Ok(vec![])
        }
    }

    #[test]
    fn register_overwrites_prior_binding() {
        let mut registry = ConnectorRegistry::new();
        assert!(registry.get("stub").is_none());

        let first: Arc<dyn SourceConnector> = Arc::new(Empty);
        registry.register("stub", Arc::clone(&first));
        let second: Arc<dyn SourceConnector> = Arc::new(Empty);
        registry.register("stub", Arc::clone(&second));

        let resolved = registry.get("stub").expect("binding");
        assert!(Arc::ptr_eq(&resolved, &second));
        assert!(!Arc::ptr_eq(&resolved, &first));
        assert_eq!(registry.names().count(), 1);
    }
}
