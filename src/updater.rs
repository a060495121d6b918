//! Record writes.

use crate::error::Result;
use crate::providers::{DnsApi, UpdateRecordParams};

/// Replaces a record's content with a new address.
pub struct RecordUpdater<'a> {
    api: &'a dyn DnsApi,
    proxied: bool,
}

impl<'a> RecordUpdater<'a> {
    /// `proxied` is carried into every write payload unchanged.
    pub fn new(api: &'a dyn DnsApi, proxied: bool) -> Self {
        Self { api, proxied }
    }

    /// Full replacement of the record as an `A` record with automatic TTL.
    pub async fn update(
        &self,
        zone_id: &str,
        record_id: &str,
        name: &str,
        new_content: &str,
    ) -> Result<()> {
        let params = UpdateRecordParams::a_record(name, new_content, self.proxied);
        let written = self.api.update_record(zone_id, record_id, &params).await?;

        if written.content != new_content {
            tracing::warn!(
                "Zone service acknowledged update of {} but reports content {}",
                name,
                written.content
            );
        }
        Ok(())
    }
}
