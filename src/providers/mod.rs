//! Zone API access: record shapes, the API seam and the Cloudflare client.

mod cloudflare;
pub mod endpoints;


pub use cloudflare::{CloudflareClient, DEFAULT_BASE_URL};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The only record type this crate reads or writes.
pub const RECORD_TYPE_A: &str = "A";

/// TTL value the zone service treats as "automatic".
pub const AUTOMATIC_TTL: u32 = 1;

/// One entry of a zone as returned by the listing and get-one calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Write payload for a full record replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRecordParams {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub proxied: bool,
}

impl UpdateRecordParams {
    /// Payload for an `A` record with automatic TTL.
    pub fn a_record(name: impl Into<String>, content: impl Into<String>, proxied: bool) -> Self {
        Self {
            record_type: RECORD_TYPE_A.to_string(),
            name: name.into(),
            content: content.into(),
            ttl: AUTOMATIC_TTL,
            proxied,
        }
    }
}

/// Pre-issued API token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for building the authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Remote zone operations the reconciler depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// List the zone's `A` records named `name`. The result may still contain
    /// other records; the remote filter is not relied upon.
    async fn list_records(&self, zone_id: &str, name: &str) -> Result<Vec<DnsRecord>>;

    /// Fetch a single record by identifier.
    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord>;

    /// Replace a record's writable fields.
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        params: &UpdateRecordParams,
    ) -> Result<DnsRecord>;
}
