//! Cloudflare zone API client.

use super::endpoints::{Endpoint, GetDnsRecord, ListDnsRecords, UpdateDnsRecord};
use super::{Credential, DnsApi, DnsRecord, UpdateRecordParams};
use crate::error::{DdnsError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Cloudflare API v4 root.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Cloudflare zone API client.
pub struct CloudflareClient {
    client: reqwest::Client,
    credential: Credential,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CloudflareResponse<T> {
    #[serde(default = "default_success")]
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<CloudflareError>,
    #[serde(default)]
    result_info: Option<ResultInfo>,
}

/// Paging data attached to listings.
#[derive(Debug, Deserialize)]
struct ResultInfo {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    total_pages: Option<u32>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct CloudflareError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<CloudflareError>,
}

fn join_errors(errors: &[CloudflareError]) -> String {
    if errors.is_empty() {
        return "Unknown error".to_string();
    }
    errors
        .iter()
        .map(|e| match e.code {
            Some(code) => format!("{} (code {})", e.message, code),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl CloudflareClient {
    /// Create a client against the public Cloudflare API.
    pub fn new(credential: Credential) -> Result<Self> {
        Self::with_base_url(credential, DEFAULT_BASE_URL.to_string(), DEFAULT_TIMEOUT)
    }

    /// Create with custom base URL and timeout (for testing or API proxies).
    pub fn with_base_url(
        credential: Credential,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DdnsError::transport("build HTTP client", e))?;

        Ok(Self {
            client,
            credential,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Send one typed request and unwrap the `result` member of the envelope.
    async fn request<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response> {
        let context = endpoint.describe();
        let url = self.url(&endpoint.path());
        tracing::debug!("{} {}", endpoint.method(), url);

        let mut request = self
            .client
            .request(endpoint.method(), &url)
            .bearer_auth(self.credential.expose())
            .header(CONTENT_TYPE, "application/json");
        let query = endpoint.query();
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = endpoint.body() {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DdnsError::transport(&context, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DdnsError::transport(&context, e))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|env| join_errors(&env.errors))
                .unwrap_or_else(|_| text.trim().to_string());
            return Err(DdnsError::transport(
                context,
                format!("HTTP {}: {}", status, detail),
            ));
        }

        let parsed: CloudflareResponse<E::Response> = serde_json::from_str(&text)
            .map_err(|e| DdnsError::transport(&context, format!("malformed response: {}", e)))?;

        if !parsed.success {
            return Err(DdnsError::transport(context, join_errors(&parsed.errors)));
        }

        // Never hand back a partial listing.
        if let Some(info) = &parsed.result_info {
            let total = info.total_pages.unwrap_or(1);
            if total > 1 {
                return Err(DdnsError::transport(
                    context,
                    format!(
                        "listing truncated: page {} of {}",
                        info.page.unwrap_or(1),
                        total
                    ),
                ));
            }
        }

        parsed
            .result
            .ok_or_else(|| DdnsError::transport(context, "response carried no result"))
    }
}

impl fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl DnsApi for CloudflareClient {
    async fn list_records(&self, zone_id: &str, name: &str) -> Result<Vec<DnsRecord>> {
        self.request(&ListDnsRecords { zone_id, name }).await
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        self.request(&GetDnsRecord { zone_id, record_id }).await
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        params: &UpdateRecordParams,
    ) -> Result<DnsRecord> {
        self.request(&UpdateDnsRecord {
            zone_id,
            record_id,
            params,
        })
        .await
    }
}
