//! Application configuration loaded from environment variables.

use std::time::Duration;

use axum::http::HeaderValue;
use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server ===
    /// Environment name reported by the health endpoint (e.g. Development, Production).
    #[serde(default = "default_environment")]
    pub app_environment: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the API cross-origin (comma-separated).
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    // === Client ===
    /// Base URL of the API the client talks to.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Client request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

/// Configuration consumed by the status reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Environment name, reported verbatim.
    pub environment: String,
}

/// Configuration consumed by the status client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL used when no explicit URL is given.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: Duration::from_millis(default_http_timeout_ms()),
        }
    }
}

fn default_environment() -> String {
    "Production".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://webapp.local".to_string(),
        "https://webapp.local".to_string(),
    ]
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_environment: default_environment(),
            port: default_port(),
            cors_allowed_origins: default_cors_origins(),
            api_url: default_api_url(),
            http_timeout_ms: default_http_timeout_ms(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.app_environment.trim().is_empty() {
            return Err("APP_ENVIRONMENT must not be empty".to_string());
        }

        validate_api_url(&self.api_url)?;

        for origin in &self.cors_allowed_origins {
            if HeaderValue::from_str(origin).is_err() {
                return Err(format!("CORS_ALLOWED_ORIGINS contains invalid origin: {origin}"));
            }
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Whether the API runs in the Development environment.
    pub fn is_development(&self) -> bool {
        self.app_environment.eq_ignore_ascii_case("development")
    }

    /// Tracing filter directive: crate-level debug when verbose (from `VERBOSE`
    /// or the CLI flag), otherwise `RUST_LOG`.
    pub fn log_directive(&self, cli_verbose: bool) -> String {
        if self.verbose || cli_verbose {
            "status_demo=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Reporter configuration derived from this config.
    pub fn reporter_config(&self) -> ReporterConfig {
        ReporterConfig {
            environment: self.app_environment.clone(),
        }
    }

    /// Client configuration derived from this config.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            timeout: Duration::from_millis(self.http_timeout_ms),
        }
    }
}

/// Check that `raw` is an absolute http(s) URL.
pub fn validate_api_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("API_URL is not a valid URL ({raw}): {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("API_URL must use http or https, got {other}")),
    }
}
