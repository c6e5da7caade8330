//! Runtime configuration, derived from where the page is served.

use std::time::Duration;

/// `<meta name="ecocode-api-base" content="https://...">` overrides the
/// service location.
pub const API_BASE_META: &str = "ecocode-api-base";

/// Used when the page has no usable origin (e.g. opened from `file://`).
pub const FALLBACK_API_BASE: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the analysis service, without trailing slash.
    pub api_base_url: String,
    /// Quiet period before re-running detection while typing.
    pub detect_debounce: Duration,
    /// Default toast lifetime.
    pub toast_duration: Duration,
    /// `tracing` filter directive.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: FALLBACK_API_BASE.to_string(),
            detect_debounce: Duration::from_millis(400),
            toast_duration: Duration::from_secs(5),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// The service lives on the page's own origin; local hosts log at debug.
    pub fn from_location(origin: &str, hostname: &str) -> Self {
        let api_base_url = if origin.starts_with("http://") || origin.starts_with("https://") {
            origin.trim_end_matches('/').to_string()
        } else {
            FALLBACK_API_BASE.to_string()
        };

        let log_level = if is_local_host(hostname) { "debug" } else { "info" };

        Self {
            api_base_url,
            log_level: log_level.to_string(),
            ..Self::default()
        }
    }

    pub fn with_api_base(mut self, base: &str) -> Self {
        let base = base.trim();
        if !base.is_empty() {
            self.api_base_url = base.trim_end_matches('/').to_string();
        }
        self
    }

    /// Read the configuration from the current page.
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let location = window.location();
        let origin = location.origin().unwrap_or_default();
        let hostname = location.hostname().unwrap_or_default();
        let config = Self::from_location(&origin, &hostname);

        let meta_override = window
            .document()
            .and_then(|doc| {
                doc.query_selector(&format!("meta[name=\"{}\"]", API_BASE_META))
                    .ok()
                    .flatten()
            })
            .and_then(|meta| meta.get_attribute("content"));

        match meta_override {
            Some(base) => config.with_api_base(&base),
            None => config,
        }
    }
}

fn is_local_host(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1" | "[::1]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_origin() {
        let config = AppConfig::from_location("https://eco-code.vercel.app", "eco-code.vercel.app");
        assert_eq!(config.api_base_url, "https://eco-code.vercel.app");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.detect_debounce, Duration::from_millis(400));
    }

    #[test]
    fn test_localhost_enables_debug() {
        let config = AppConfig::from_location("http://localhost:8080", "localhost");
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_opaque_origin_falls_back() {
        let config = AppConfig::from_location("null", "");
        assert_eq!(config.api_base_url, FALLBACK_API_BASE);
    }

    #[test]
    fn test_meta_override() {
        let config = AppConfig::from_location("http://localhost:8080", "localhost")
            .with_api_base(" https://api.example.com/ ");
        assert_eq!(config.api_base_url, "https://api.example.com");

        let unchanged = AppConfig::default().with_api_base("   ");
        assert_eq!(unchanged.api_base_url, FALLBACK_API_BASE);
    }
}
