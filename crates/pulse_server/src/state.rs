use std::sync::Arc;

use anyhow::anyhow;
use pulse_core::UpstreamCatalog;
use pulse_engine::Aggregator;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub aggregator: Aggregator,
}

impl AppState {
    /// Production state: the standard catalog behind a real HTTP client.
    pub fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let aggregator = Aggregator::new(UpstreamCatalog::standard(), &config.fetch_settings())
            .map_err(|err| {
                anyhow!("failed to build the upstream client: {} ({})", err.kind, err.message)
            })?;

        Ok(Arc::new(Self { config, aggregator }))
    }

    /// State around a caller-supplied aggregator. Tests route the catalog at
    /// mock upstreams through this.
    pub fn with_aggregator(config: Config, aggregator: Aggregator) -> Arc<Self> {
        Arc::new(Self { config, aggregator })
    }
}
