use std::sync::Arc;

use picker_interaction::{OpenAiUpstream, Upstream};

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let upstream = OpenAiUpstream::new(config.api_key.clone())
            .with_model(config.model.clone())
            .with_max_tokens(config.max_tokens)
            .with_url(config.upstream_url.clone());

        Self::with_upstream(config, Arc::new(upstream))
    }

    pub fn with_upstream(config: Config, upstream: Arc<dyn Upstream>) -> Arc<Self> {
        Arc::new(Self { config, upstream })
    }
}
