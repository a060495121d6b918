//! Configuration management for cloudflare-ddns.

use crate::error::{DdnsError, Result};
use crate::providers::{CloudflareClient, Credential, DEFAULT_BASE_URL};
use crate::reconcile::Target;
use crate::resolver::{AddressResolver, DEFAULT_ADDRESS_SERVICE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// On-disk configuration. Every field may also come from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API token (or environment variable name if prefixed with $).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Zone ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,

    /// DNS record name (e.g., "home.example.com").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_name: Option<String>,

    /// Whether to proxy through Cloudflare (default: false).
    #[serde(default)]
    pub proxied: bool,

    /// Plain-text public address echo service.
    #[serde(default = "default_address_service")]
    pub address_service: String,

    /// Cloudflare API root.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Daemon check interval in seconds (default: 300 = 5 minutes).
    #[serde(default = "default_interval")]
    pub check_interval_secs: u64,
}

fn default_address_service() -> String {
    DEFAULT_ADDRESS_SERVICE.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_interval() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            zone_id: None,
            record_name: None,
            proxied: false,
            address_service: default_address_service(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout(),
            check_interval_secs: default_interval(),
        }
    }
}

/// Values supplied on the command line or through the environment. They win
/// over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_token: Option<String>,
    pub zone_id: Option<String>,
    pub record_name: Option<String>,
    pub proxied: bool,
    pub address_service: Option<String>,
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credential: Credential,
    pub target: Target,
    pub address_service: String,
    pub api_base_url: String,
    pub timeout: Duration,
    pub check_interval: Duration,
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DdnsError::Config("Could not find config directory".to_string()))?;

        Ok(config_dir.join("cloudflare-ddns").join("config.toml"))
    }

    /// Load configuration from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate example configuration.
    pub fn example() -> Self {
        Self {
            api_token: Some("$CF_API_TOKEN".to_string()),
            zone_id: Some("your-zone-id".to_string()),
            record_name: Some("home.example.com".to_string()),
            ..Self::default()
        }
    }

    /// Combine file values with overrides and check that nothing required is missing.
    pub fn resolve(self, overrides: Overrides) -> Result<Settings> {
        let credential = overrides
            .api_token
            .or(self.api_token)
            .map(|v| Credential::new(resolve_env(&v)))
            .filter(|c| !c.is_empty())
            .ok_or_else(|| missing("API token", "--apitoken", "apitoken"))?;
        let zone_id = overrides
            .zone_id
            .or(self.zone_id)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| missing("zone ID", "--zoneid", "zoneid"))?;
        let record_name = overrides
            .record_name
            .or(self.record_name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| missing("domain", "--domain", "domain"))?;

        let timeout_secs = overrides.timeout_secs.unwrap_or(self.timeout_secs);
        if timeout_secs == 0 {
            return Err(DdnsError::Config(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        if self.check_interval_secs == 0 {
            return Err(DdnsError::Config(
                "Check interval must be greater than 0".to_string(),
            ));
        }

        Ok(Settings {
            credential,
            target: Target::new(zone_id, record_name, overrides.proxied || self.proxied),
            address_service: overrides.address_service.unwrap_or(self.address_service),
            api_base_url: overrides.api_base_url.unwrap_or(self.api_base_url),
            timeout: Duration::from_secs(timeout_secs),
            check_interval: Duration::from_secs(self.check_interval_secs),
        })
    }
}

fn missing(what: &str, flag: &str, env: &str) -> DdnsError {
    DdnsError::Config(format!(
        "No {} given (use {}, the `{}` environment variable, or the config file)",
        what, flag, env
    ))
}

impl Settings {
    /// Settings for `target` using the public endpoints and default timeouts.
    pub fn new(credential: Credential, target: Target) -> Self {
        let defaults = Config::default();
        Self {
            credential,
            target,
            address_service: defaults.address_service,
            api_base_url: defaults.api_base_url,
            timeout: Duration::from_secs(defaults.timeout_secs),
            check_interval: Duration::from_secs(defaults.check_interval_secs),
        }
    }

    /// Address resolver honoring the configured service and timeout.
    pub fn resolver(&self) -> Result<AddressResolver> {
        AddressResolver::with_service(self.address_service.clone(), self.timeout)
    }

    /// Zone API client honoring the configured base URL and timeout.
    pub fn client(&self) -> Result<CloudflareClient> {
        CloudflareClient::with_base_url(
            self.credential.clone(),
            self.api_base_url.clone(),
            self.timeout,
        )
    }
}

/// Resolve environment variable references (values starting with $).
pub fn resolve_env(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        std::env::var(var_name).unwrap_or_else(|_| {
            tracing::warn!("Environment variable {} not set", var_name);
            value.to_string()
        })
    } else {
        value.to_string()
    }
}
