//! Application state shared across handlers.

use shelf_catalog::Catalog;
use shelf_core::config::AppConfig;
use std::sync::Arc;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Book catalog over the metadata and blob stores.
    pub catalog: Catalog,
    /// Host name reported by the index page.
    pub hostname: Arc<str>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, catalog: Catalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            hostname: detect_hostname().into(),
        }
    }

    /// Override the reported host name.
    pub fn with_hostname(mut self, hostname: impl Into<Arc<str>>) -> Self {
        self.hostname = hostname.into();
        self
    }
}

/// Host name from `$HOSTNAME`, then `/etc/hostname`, else `"unknown"`.
fn detect_hostname() -> String {
    if let Ok(name) = std::env::var("HOSTNAME")
        && !name.trim().is_empty()
    {
        return name.trim().to_string();
    }
    if let Ok(name) = std::fs::read_to_string("/etc/hostname")
        && !name.trim().is_empty()
    {
        return name.trim().to_string();
    }
    "unknown".to_string()
}
