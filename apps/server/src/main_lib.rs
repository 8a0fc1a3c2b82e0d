use std::sync::Arc;

use partshub_catalog::{
    AutoPartsPlusProvider, GlobalPartsProvider, PartCache, PartService, PartsProvider,
    RepuestosMaxProvider,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub parts: PartService,
}

pub fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let base_url = config.provider_base_url.as_str();
    let providers: Vec<Arc<dyn PartsProvider>> = vec![
        Arc::new(AutoPartsPlusProvider::new(base_url)),
        Arc::new(RepuestosMaxProvider::new(base_url)),
        Arc::new(GlobalPartsProvider::new(base_url)),
    ];
    let parts = PartService::new(providers, PartCache::new());
    Arc::new(AppState { parts })
}
