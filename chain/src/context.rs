use std::sync::Arc;

use beacon_common::config::Preset;

use crate::core::HelperCache;

/// Everything the transition needs besides the state itself.
///
/// The helper cache is an injected handle: callers that run many unrelated
/// states through the same context reset it between them.
#[derive(Debug, Clone)]
pub struct ChainContext {
    preset: Preset,
    cache: Arc<HelperCache>,
}

impl ChainContext {
    pub fn new(preset: Preset) -> Self {
        Self::with_cache(preset, Arc::new(HelperCache::default()))
    }

    pub fn with_cache(preset: Preset, cache: Arc<HelperCache>) -> Self {
        Self { preset, cache }
    }

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    pub fn cache(&self) -> &Arc<HelperCache> {
        &self.cache
    }
}
