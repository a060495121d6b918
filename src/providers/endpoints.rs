//! Typed request builders, one per zone API operation.

use super::{DnsRecord, UpdateRecordParams, RECORD_TYPE_A};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A single zone API call: where it goes, what it sends and what `result` holds.
pub trait Endpoint {
    type Body: Serialize;
    type Response: DeserializeOwned;

    fn method(&self) -> Method;

    /// Path relative to the API base URL, without a leading slash.
    fn path(&self) -> String;

    /// Query string pairs appended to the URL.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }

    /// Short description used as error context.
    fn describe(&self) -> String;
}

/// `GET zones/{zone}/dns_records?name={name}&type=A`
///
/// The server-side filter only narrows the listing; callers still check names locally.
#[derive(Debug)]
pub struct ListDnsRecords<'a> {
    pub zone_id: &'a str,
    pub name: &'a str,
}

impl Endpoint for ListDnsRecords<'_> {
    type Body = ();
    type Response = Vec<DnsRecord>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("zones/{}/dns_records", self.zone_id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.to_string()),
            ("type", RECORD_TYPE_A.to_string()),
        ]
    }

    fn describe(&self) -> String {
        format!("list {} records in zone {}", self.name, self.zone_id)
    }
}

/// `GET zones/{zone}/dns_records/{id}`
#[derive(Debug)]
pub struct GetDnsRecord<'a> {
    pub zone_id: &'a str,
    pub record_id: &'a str,
}

impl Endpoint for GetDnsRecord<'_> {
    type Body = ();
    type Response = DnsRecord;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("zones/{}/dns_records/{}", self.zone_id, self.record_id)
    }

    fn describe(&self) -> String {
        format!("get record {} in zone {}", self.record_id, self.zone_id)
    }
}

/// `PUT zones/{zone}/dns_records/{id}`
#[derive(Debug)]
pub struct UpdateDnsRecord<'a> {
    pub zone_id: &'a str,
    pub record_id: &'a str,
    pub params: &'a UpdateRecordParams,
}

impl Endpoint for UpdateDnsRecord<'_> {
    type Body = UpdateRecordParams;
    type Response = DnsRecord;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("zones/{}/dns_records/{}", self.zone_id, self.record_id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self.params)
    }

    fn describe(&self) -> String {
        format!(
            "update record {} ({}) in zone {}",
            self.record_id, self.params.name, self.zone_id
        )
    }
}
