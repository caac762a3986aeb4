//! Environment detection for the engine's ambient services.

use std::env;
use std::sync::OnceLock;

/// Resolve the runtime environment, loading `.env` on first use.
///
/// Reads `CHARTIX_ENV`; defaults to `sandbox` when unset so local runs get
/// human-readable logs.
pub fn get_environment() -> String {
    static ENVIRONMENT: OnceLock<String> = OnceLock::new();
    ENVIRONMENT
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            env::var("CHARTIX_ENV").unwrap_or_else(|_| "sandbox".to_string())
        })
        .clone()
}
