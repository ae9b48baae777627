// src/utils/env.rs
use log::{debug, info};

/// Load variables from a `.env` file in the working directory, if one exists.
/// Variables already set in the process environment win.
pub fn load_env() {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded ({}); using process environment only", e),
    }
}

/// Read a variable and parse it, falling back to `default` when unset or unparsable.
pub(crate) fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
