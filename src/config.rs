//! Service configuration.
//!
//! All runtime behaviour is controlled through [`ServiceConfig`], built via
//! its [`ServiceConfigBuilder`] or resolved from the environment. Keeping
//! every knob in one struct makes it trivial to share across handlers (it is
//! cloned into the axum state once at startup) and to log the effective
//! configuration at boot.
//!
//! The set of knobs is deliberately small: the service is stateless and the
//! only tunable resource is the outbound fetch. Worker counts, request
//! timeouts at the edge, and the like belong to whatever runs in front of
//! this process.

use crate::error::SheetError;
use serde::Serialize;

/// Hard ceiling for `rows_per_page`. Requests asking for more are rejected.
///
/// This is the service's only output-size mitigation: parsed tables live
/// fully in memory (proportional to the fetched file), but a single response
/// body never carries more than this many rows.
pub const MAX_ROWS_PER_PAGE: u64 = 5000;

/// Configuration for the sheet2json service.
///
/// Built via [`ServiceConfig::builder()`], [`ServiceConfig::from_env()`], or
/// [`ServiceConfig::default()`].
///
/// # Example
/// ```rust
/// use sheet2json::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .port(9000)
///     .fetch_timeout_secs(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.port, 9000);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ServiceConfig {
    /// TCP port the HTTP server listens on. Default: 8080.
    pub port: u16,

    /// Timeout for the outbound spreadsheet download, in seconds. Default: 30.
    ///
    /// The fetch is the only operation in the pipeline that blocks on the
    /// network, so this bound is what keeps a slow or unresponsive remote
    /// host from holding a worker indefinitely. There is exactly one fetch
    /// attempt per request; resilience to transient failures is the
    /// caller's concern.
    pub fetch_timeout_secs: u64,

    /// Page size used when the request omits `rows_per_page`. Default: 100.
    ///
    /// Applies only when the parameter is absent — an explicit invalid value
    /// is rejected, never replaced by this default.
    pub default_rows_per_page: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            fetch_timeout_secs: 30,
            default_rows_per_page: 100,
        }
    }
}

impl ServiceConfig {
    /// Create a new builder for `ServiceConfig`.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// Honours `PORT` (the conventional PaaS variable). An unset or empty
    /// `PORT` falls back to 8080; a set-but-unparsable one is a
    /// configuration error and refuses to start.
    pub fn from_env() -> Result<Self, SheetError> {
        let mut builder = Self::builder();
        if let Ok(port) = std::env::var("PORT") {
            if !port.is_empty() {
                let port: u16 = port.parse().map_err(|_| SheetError::InvalidParameter {
                    name: "PORT",
                    message: format!("PORT must be a TCP port number, got '{port}'"),
                })?;
                builder = builder.port(port);
            }
        }
        builder.build()
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs.max(1);
        self
    }

    pub fn default_rows_per_page(mut self, rows: u64) -> Self {
        self.config.default_rows_per_page = rows;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServiceConfig, SheetError> {
        let c = &self.config;
        if c.default_rows_per_page == 0 || c.default_rows_per_page > MAX_ROWS_PER_PAGE {
            return Err(SheetError::InvalidParameter {
                name: "default_rows_per_page",
                message: format!(
                    "default_rows_per_page must be 1–{MAX_ROWS_PER_PAGE}, got {}",
                    c.default_rows_per_page
                ),
            });
        }
        Ok(self.config)
    }
}
