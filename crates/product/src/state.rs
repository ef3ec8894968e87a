use crate::{
    config::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
};
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub allowed_origin: HeaderValue,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("allowed_origin", &self.allowed_origin)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        Self::with_deps(DependenciesInjectDeps::postgres(pool), &config.frontend_url)
    }

    /// Builds the state over arbitrary repositories, e.g. the in-memory one.
    pub fn with_deps(deps: DependenciesInjectDeps, allowed_origin: &str) -> Result<Self> {
        let allowed_origin = HeaderValue::from_str(allowed_origin)
            .with_context(|| format!("FRONTEND_URL is not a valid origin: {allowed_origin}"))?;

        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(deps, &mut registry);

        Ok(Self {
            di_container,
            registry: Arc::new(registry),
            allowed_origin,
        })
    }
}
