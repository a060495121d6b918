//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use cloudflare_ddns::providers::UpdateRecordParams;
use cloudflare_ddns::{AddressSource, DdnsError, DnsApi, DnsRecord, PublicAddress, Result};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Always reports the same public address.
pub struct FixedAddress {
    address: Ipv4Addr,
    calls: AtomicUsize,
}

impl FixedAddress {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.parse().expect("test address"),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressSource for FixedAddress {
    async fn resolve(&self) -> Result<PublicAddress> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PublicAddress::new(self.address))
    }
}

/// In-memory zone that applies writes, so repeated runs observe earlier updates.
pub struct FakeZone {
    zone_id: String,
    records: Mutex<Vec<DnsRecord>>,
    list_calls: AtomicUsize,
    updates: Mutex<Vec<(String, UpdateRecordParams)>>,
}

impl FakeZone {
    pub fn new(zone_id: &str, records: Vec<DnsRecord>) -> Self {
        Self {
            zone_id: zone_id.to_string(),
            records: Mutex::new(records),
            list_calls: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Every write issued so far, as (record id, payload).
    pub fn updates(&self) -> Vec<(String, UpdateRecordParams)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn content_of(&self, record_id: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == record_id)
            .map(|r| r.content.clone())
    }

    fn check_zone(&self, zone_id: &str) -> Result<()> {
        if zone_id == self.zone_id {
            Ok(())
        } else {
            Err(DdnsError::transport(
                format!("zone {}", zone_id),
                "HTTP 404 Not Found",
            ))
        }
    }
}

#[async_trait]
impl DnsApi for FakeZone {
    async fn list_records(&self, zone_id: &str, _name: &str) -> Result<Vec<DnsRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_zone(zone_id)?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        self.check_zone(zone_id)?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| DdnsError::transport(format!("record {}", record_id), "HTTP 404"))
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        params: &UpdateRecordParams,
    ) -> Result<DnsRecord> {
        self.check_zone(zone_id)?;
        self.updates
            .lock()
            .unwrap()
            .push((record_id.to_string(), params.clone()));

        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| DdnsError::transport(format!("record {}", record_id), "HTTP 404"))?;
        record.name = params.name.clone();
        record.content = params.content.clone();
        record.record_type = params.record_type.clone();
        record.ttl = Some(params.ttl);
        record.proxied = Some(params.proxied);
        Ok(record.clone())
    }
}

pub fn a_record(id: &str, name: &str, content: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        name: name.to_string(),
        content: content.to_string(),
        record_type: "A".to_string(),
        proxied: Some(false),
        ttl: Some(1),
    }
}
