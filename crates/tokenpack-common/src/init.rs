//! Global initialization utilities for the application

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the process environment
///
/// Loads variables from a `.env` file in the current directory (or any
/// parent) so `TOKENPACK_*` overrides can live next to a project.
///
/// Safe to call multiple times - will only run once
pub fn initialize_environment() {
    INIT.call_once(|| match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable environment file"),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_environment_is_idempotent() {
        initialize_environment();
        initialize_environment();
        assert!(INIT.is_completed());
    }
}
