//! Environment/runtime helpers
//!
//! Thin wrappers over process environment lookups shared by the config
//! loader, the gateway and the binaries.

use tracing::debug;

/// Load `.env` from the working directory if present. Missing files are fine.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => debug!(error = %e, "ignoring unreadable .env"),
    }
}

/// Read an environment variable, treating unset, non-unicode and blank values
/// alike as absent. The returned value is trimmed.
pub fn var_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
