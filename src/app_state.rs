use crate::config::ProviderEndpoints;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub endpoints: Arc<ProviderEndpoints>,
}

impl AppState {
    pub fn new(endpoints: ProviderEndpoints) -> Self {
        Self {
            endpoints: Arc::new(endpoints),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ProviderEndpoints::default())
    }
}
