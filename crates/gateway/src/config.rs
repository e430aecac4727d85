use serde::{Deserialize, Serialize};
use std::time::Duration;

use configs::{ApiConfig, CLIENTE_API_URL_ENV};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Collection root of the remote resource. `None` defers the failure to the first call.
    pub base_url: Option<String>,
    pub timeout: TimeoutConfig,
}

/// Both unset by default, leaving reqwest's own behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: Some(base_url.into()), ..Self::default() }
    }

    /// Read `CLIENTE_API_URL` (after loading `.env`). Absence is not an error here.
    pub fn from_env() -> Self {
        common::env::load_dotenv();
        Self {
            base_url: common::env::var_non_empty(CLIENTE_API_URL_ENV),
            ..Self::default()
        }
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.timeout.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout.request_timeout_secs.map(Duration::from_secs)
    }
}

impl From<&ApiConfig> for GatewayConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url().map(str::to_string),
            timeout: TimeoutConfig {
                connect_timeout_secs: api.connect_timeout_secs,
                request_timeout_secs: api.request_timeout_secs,
            },
        }
    }
}
