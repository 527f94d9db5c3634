use std::env;
use std::time::Duration;

use crate::{ConfigError, GovernorOptions};

/// Default listen port, matching the original deployment.
pub const DEFAULT_PORT: u16 = 3001;

/// Default Mercado Público API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.mercadopublico.cl/servicios/v1";

/// Default outbound request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the upstream Mercado Público client.
#[derive(Clone, Debug)]
pub struct UpstreamOptions {
    /// Base URL of the upstream API, without a trailing slash.
    pub base_url: String,
    /// Access ticket appended to every upstream request.
    pub ticket: String,
    /// Timeout applied to each outbound HTTP request.
    ///
    /// This is the only per-call timeout in the system; the governor itself
    /// never cancels an in-flight dispatch.
    pub request_timeout: Duration,
}

/// Full service configuration.
#[derive(Clone, Debug)]
pub struct AppOptions {
    /// TCP port the service listens on.
    pub listen_port: u16,
    /// Upstream client settings.
    pub upstream: UpstreamOptions,
    /// Outbound-request governor settings.
    pub governor: GovernorOptions,
}

impl AppOptions {
    /// Load configuration from the environment.
    ///
    /// `MP_TICKET` is required; everything else falls back to the defaults
    /// documented in the README.
    pub fn from_env() -> Result<Self, ConfigError> {
        let ticket = env::var("MP_TICKET").map_err(|_| ConfigError::MissingVar("MP_TICKET"))?;

        let base_url =
            env::var("MP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let defaults = GovernorOptions::default();

        Ok(Self {
            listen_port: parse_var("LICITASEGURO_PORT", DEFAULT_PORT)?,
            upstream: UpstreamOptions {
                base_url,
                ticket,
                request_timeout: Duration::from_millis(parse_var(
                    "MP_REQUEST_TIMEOUT_MS",
                    DEFAULT_REQUEST_TIMEOUT.as_millis() as u64,
                )?),
            },
            governor: GovernorOptions {
                min_request_interval: Duration::from_millis(parse_var(
                    "MP_MIN_REQUEST_INTERVAL_MS",
                    defaults.min_request_interval.as_millis() as u64,
                )?),
                max_retries: parse_var("MP_MAX_RETRIES", defaults.max_retries)?,
                retry_delay: Duration::from_millis(parse_var(
                    "MP_RETRY_DELAY_MS",
                    defaults.retry_delay.as_millis() as u64,
                )?),
            },
        })
    }
}

fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Err(_) => Ok(default),
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            reason: e.to_string(),
        }),
    }
}
