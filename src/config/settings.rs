//! Runtime settings read from the process environment.

use std::time::Duration;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Default catalog directory.
pub const DEFAULT_CATALOG_DIR: &str = "./config/catalog";

/// Default extraction model.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default Generative Language API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Settings for the HTTP service and the extraction client.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    /// Address the server listens on.
    pub bind_addr: String,
    /// Directory holding the YAML catalog.
    pub catalog_dir: String,
    /// Whether logs are emitted as JSON lines.
    pub log_json: bool,
    /// Extraction client settings.
    pub extraction: ExtractionSettings,
}

/// Settings for the extraction model client.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSettings {
    /// API key; extraction is unavailable without one.
    pub api_key: Option<String>,
    /// Model name used in the request path.
    pub model: String,
    /// API base URL without a trailing slash.
    pub base_url: String,
    /// Timeout for a single model call.
    pub timeout: Duration,
}

impl ServiceSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `DEDUCTIONS_BIND` | `0.0.0.0:8080` |
    /// | `DEDUCTIONS_CATALOG_DIR` | `./config/catalog` |
    /// | `DEDUCTIONS_LOG_JSON` | `false` |
    /// | `GEMINI_API_KEY`, then `API_KEY` | unset |
    /// | `DEDUCTIONS_MODEL` | `gemini-3-flash-preview` |
    /// | `DEDUCTIONS_MODEL_BASE_URL` | Generative Language API |
    /// | `DEDUCTIONS_MODEL_TIMEOUT_MS` | `30000` |
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let log_json = non_empty("DEDUCTIONS_LOG_JSON")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
            .unwrap_or(false);

        let timeout_ms = non_empty("DEDUCTIONS_MODEL_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30_000);

        Self {
            bind_addr: non_empty("DEDUCTIONS_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            catalog_dir: non_empty("DEDUCTIONS_CATALOG_DIR")
                .unwrap_or_else(|| DEFAULT_CATALOG_DIR.to_string()),
            log_json,
            extraction: ExtractionSettings {
                api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
                model: non_empty("DEDUCTIONS_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: non_empty("DEDUCTIONS_MODEL_BASE_URL")
                    .map(|v| v.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                timeout: Duration::from_millis(timeout_ms),
            },
        }
    }
}
