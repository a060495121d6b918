//! Public address resolution.

use crate::error::{DdnsError, Result};
use async_trait::async_trait;
use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Echo service used when none is configured.
pub const DEFAULT_ADDRESS_SERVICE: &str = "https://api.ipify.org";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The caller's current public IPv4 address, recomputed on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicAddress(Ipv4Addr);

impl PublicAddress {
    pub fn new(addr: Ipv4Addr) -> Self {
        Self(addr)
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.0
    }

    /// Parse an echo-service body: surrounding whitespace is allowed, nothing else.
    pub fn parse(body: &str) -> Result<Self> {
        let trimmed = body.trim();
        trimmed
            .parse::<Ipv4Addr>()
            .map(Self)
            .map_err(|_| DdnsError::Format(format!("not an IPv4 address: {:?}", trimmed)))
    }
}

impl fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Source of the current public address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressSource: Send + Sync {
    async fn resolve(&self) -> Result<PublicAddress>;
}

/// Resolves the public address from a plain-text echo service.
pub struct AddressResolver {
    client: reqwest::Client,
    service: String,
}

impl AddressResolver {
    /// Create a resolver against the default echo service.
    pub fn new() -> Result<Self> {
        Self::with_service(DEFAULT_ADDRESS_SERVICE.to_string(), DEFAULT_TIMEOUT)
    }

    /// Create a resolver against a custom echo service.
    pub fn with_service(service: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DdnsError::transport("build HTTP client", e))?;

        Ok(Self { client, service })
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

#[async_trait]
impl AddressSource for AddressResolver {
    async fn resolve(&self) -> Result<PublicAddress> {
        let context = format!("address service {}", self.service);

        let response = self
            .client
            .get(&self.service)
            .send()
            .await
            .map_err(|e| DdnsError::transport(&context, e))?;

        if !response.status().is_success() {
            return Err(DdnsError::transport(
                context,
                format!("HTTP {}", response.status()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DdnsError::transport(&context, e))?;

        let address = PublicAddress::parse(&text)?;
        tracing::debug!("Resolved public address {} from {}", address, self.service);
        Ok(address)
    }
}
