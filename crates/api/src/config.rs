//! Service configuration loaded from environment variables.

/// Configuration shared by the three service binaries.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: per-service, see the binaries)
/// - `CATALOG_URL` — catalog service base URL (default: `http://localhost:8081`)
/// - `PAYMENT_URL` — payment authority base URL (default: `http://localhost:8082`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub catalog_url: String,
    pub payment_url: String,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults.
    ///
    /// `default_port` is the port used when `PORT` is unset, since each
    /// service listens on a different one.
    pub fn from_env(default_port: u16) -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port),
            catalog_url: std::env::var("CATALOG_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            payment_url: std::env::var("PAYMENT_URL")
                .unwrap_or_else(|_| "http://localhost:8082".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
