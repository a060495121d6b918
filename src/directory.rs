//! Record lookup within a zone.

use crate::error::{DdnsError, Result};
use crate::providers::{DnsApi, DnsRecord, RECORD_TYPE_A};

/// Resolves the single `A` record carrying a hostname.
pub struct RecordDirectory<'a> {
    api: &'a dyn DnsApi,
}

impl<'a> RecordDirectory<'a> {
    pub fn new(api: &'a dyn DnsApi) -> Self {
        Self { api }
    }

    /// List the zone and return the one `A` record named `name`.
    ///
    /// The listing is always filtered locally: the zone service is not trusted
    /// to return only exact matches.
    pub async fn find_record(&self, zone_id: &str, name: &str) -> Result<DnsRecord> {
        let records = self.api.list_records(zone_id, name).await?;
        tracing::debug!("Zone {} listed {} records", zone_id, records.len());
        select_unique(records, zone_id, name)
    }

    /// Fetch one record by identifier.
    pub async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        self.api.get_record(zone_id, record_id).await
    }
}

/// Keep the records whose name matches exactly and whose type is `A`, and
/// require exactly one survivor.
pub fn select_unique(records: Vec<DnsRecord>, zone_id: &str, name: &str) -> Result<DnsRecord> {
    let mut matches: Vec<DnsRecord> = records
        .into_iter()
        .filter(|record| record.name == name)
        .filter(|record| {
            let keep = record.record_type == RECORD_TYPE_A;
            if !keep {
                tracing::debug!(
                    "Ignoring {} record {} for {}",
                    record.record_type,
                    record.id,
                    name
                );
            }
            keep
        })
        .collect();

    match matches.len() {
        0 => Err(DdnsError::RecordNotFound {
            zone: zone_id.to_string(),
            name: name.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        count => Err(DdnsError::AmbiguousRecord {
            zone: zone_id.to_string(),
            name: name.to_string(),
            count,
        }),
    }
}
