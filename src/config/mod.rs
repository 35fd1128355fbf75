//! Application Configuration Module
//!
//! Provides the tool configuration loaded from a TOML file: data locations,
//! sampling seeds, retrieval parameters and workbook colours.
//!
//! ## Loading Order
//!
//! 1. `AMDEC_CONFIG` environment variable (path to TOML file)
//! 2. `amdec.toml` in the current working directory
//! 3. Built-in defaults (`config::defaults`)
//!
//! ## Usage
//!
//! ```ignore
//! // In main():
//! config::init(AppConfig::load());
//!
//! // Anywhere in the codebase:
//! let floor = config::get().retrieval.similarity_floor;
//! ```

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;

use std::sync::OnceLock;

/// Global configuration, initialized once at startup.
static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// A second call is ignored with a warning.
pub fn init(config: AppConfig) {
    if APP_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global configuration.
///
/// Panics if `init()` has not been called: a missing config is a startup bug.
#[allow(clippy::expect_used)]
pub fn get() -> &'static AppConfig {
    APP_CONFIG
        .get()
        .expect("config::get() called before config::init()")
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    APP_CONFIG.get().is_some()
}

/// The global config when initialized, else built-in defaults.
///
/// Library entry points use this so they work in tests and embedded use
/// without a prior `init()`.
pub fn current() -> AppConfig {
    APP_CONFIG.get().cloned().unwrap_or_default()
}
