//! Editor configuration resolved from the environment.
//!
//! Only the completion boundary is configurable: where it lives and how long
//! a request may take. Values come from explicit arguments first, then from
//! the environment (a `.env` file is honored via `dotenvy`), then from
//! defaults.
//!
//! Recognized variables:
//! - `FLOWCANVAS_COMPLETION_URL` — endpoint the HTTP client posts logs to
//! - `FLOWCANVAS_COMPLETION_TIMEOUT_SECS` — per-request timeout in seconds

use std::time::Duration;

/// Fallback completion endpoint (the local dev service).
pub const DEFAULT_COMPLETION_URL: &str = "http://127.0.0.1:3000/api/completion";

/// Fallback per-request timeout.
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved runtime configuration for an editor session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Endpoint the completion boundary posts message logs to.
    pub completion_url: String,
    /// Timeout applied to each completion request.
    pub completion_timeout: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl EditorConfig {
    /// Resolves configuration, preferring explicit values over the
    /// environment over defaults.
    #[must_use]
    pub fn new(completion_url: Option<String>, completion_timeout: Option<Duration>) -> Self {
        Self {
            completion_url: completion_url.unwrap_or_else(Self::resolve_url),
            completion_timeout: completion_timeout.unwrap_or_else(Self::resolve_timeout),
        }
    }

    fn resolve_url() -> String {
        dotenvy::dotenv().ok();
        std::env::var("FLOWCANVAS_COMPLETION_URL")
            .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string())
    }

    fn resolve_timeout() -> Duration {
        dotenvy::dotenv().ok();
        std::env::var("FLOWCANVAS_COMPLETION_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(DEFAULT_COMPLETION_TIMEOUT, Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let config = EditorConfig::new(
            Some("https://example.test/complete".into()),
            Some(Duration::from_secs(5)),
        );
        assert_eq!(config.completion_url, "https://example.test/complete");
        assert_eq!(config.completion_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_defaults_fill_gaps() {
        // Env-var resolution is covered implicitly: absent vars fall through
        // to the defaults asserted here.
        let config = EditorConfig::new(None, None);
        assert!(!config.completion_url.is_empty());
        assert!(config.completion_timeout > Duration::ZERO);
    }
}
