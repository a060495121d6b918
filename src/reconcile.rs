//! Reconciliation of one record against the current public address.

use crate::config::Settings;
use crate::directory::RecordDirectory;
use crate::error::{DdnsError, Result};
use crate::providers::{CloudflareClient, Credential, DnsApi};
use crate::resolver::{AddressResolver, AddressSource};
use crate::updater::RecordUpdater;
use std::fmt;

/// Which record to keep in sync, and how to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub zone_id: String,
    pub record_name: String,
    pub proxied: bool,
}

impl Target {
    pub fn new(zone_id: impl Into<String>, record_name: impl Into<String>, proxied: bool) -> Self {
        Self {
            zone_id: zone_id.into(),
            record_name: record_name.into(),
            proxied,
        }
    }
}

/// Progress through a single reconciliation. Never revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    AddressResolved,
    RecordResolved,
    Updating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "resolving public address",
            Stage::AddressResolved => "resolving record",
            Stage::RecordResolved => "comparing",
            Stage::Updating => "updating record",
        };
        f.write_str(name)
    }
}

/// Result of one reconciliation.
#[derive(Debug)]
pub enum ReconciliationOutcome {
    /// The record already holds the current address.
    NoChangeNeeded { content: String },
    /// The record was rewritten.
    Updated { previous: String, current: String },
    /// The run stopped at `stage`; nothing after it was attempted.
    Failed { stage: Stage, error: DdnsError },
}

impl ReconciliationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ReconciliationOutcome::Failed { .. })
    }

    /// Process exit code for a command-line wrapper.
    pub fn exit_code(&self) -> i32 {
        if self.is_failure() {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for ReconciliationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationOutcome::NoChangeNeeded { content } => {
                write!(f, "unchanged ({})", content)
            }
            ReconciliationOutcome::Updated { previous, current } => {
                write!(f, "updated ({} -> {})", previous, current)
            }
            ReconciliationOutcome::Failed { stage, error } => {
                write!(f, "failed while {}: {}", stage, error)
            }
        }
    }
}

/// Drives resolver, directory and updater for one target.
pub struct Reconciler<'a> {
    resolver: &'a dyn AddressSource,
    api: &'a dyn DnsApi,
}

impl<'a> Reconciler<'a> {
    pub fn new(resolver: &'a dyn AddressSource, api: &'a dyn DnsApi) -> Self {
        Self { resolver, api }
    }

    /// Run one full reconciliation. Never retries.
    pub async fn reconcile(&self, target: &Target) -> ReconciliationOutcome {
        let mut stage = Stage::Start;
        match self.run(target, &mut stage).await {
            Ok(outcome) => {
                tracing::info!("{}: {}", target.record_name, outcome);
                outcome
            }
            Err(error) => {
                tracing::error!(
                    "{} in zone {}: failed while {}: {}",
                    target.record_name,
                    target.zone_id,
                    stage,
                    error
                );
                ReconciliationOutcome::Failed { stage, error }
            }
        }
    }

    async fn run(&self, target: &Target, stage: &mut Stage) -> Result<ReconciliationOutcome> {
        let current = self.resolver.resolve().await?.to_string();
        *stage = Stage::AddressResolved;
        tracing::debug!("Current public address: {}", current);

        let record = RecordDirectory::new(self.api)
            .find_record(&target.zone_id, &target.record_name)
            .await?;
        *stage = Stage::RecordResolved;
        tracing::debug!(
            "Record {} ({}) holds {}",
            record.id,
            record.name,
            record.content
        );

        if record.content == current {
            return Ok(ReconciliationOutcome::NoChangeNeeded { content: current });
        }

        *stage = Stage::Updating;
        RecordUpdater::new(self.api, target.proxied)
            .update(&target.zone_id, &record.id, &target.record_name, &current)
            .await?;

        Ok(ReconciliationOutcome::Updated {
            previous: record.content,
            current,
        })
    }
}

fn clients(settings: &Settings) -> Result<(AddressResolver, CloudflareClient)> {
    Ok((settings.resolver()?, settings.client()?))
}

/// Reconcile `settings.target` against the endpoints and timeout in `settings`.
pub async fn reconcile_with(settings: &Settings) -> ReconciliationOutcome {
    match clients(settings) {
        Ok((resolver, api)) => {
            Reconciler::new(&resolver, &api)
                .reconcile(&settings.target)
                .await
        }
        Err(error) => ReconciliationOutcome::Failed {
            stage: Stage::Start,
            error,
        },
    }
}

/// Reconcile `hostname` in `zone_id` against the public Cloudflare API and the
/// default address echo service.
pub async fn reconcile(
    zone_id: &str,
    hostname: &str,
    credential: &str,
    proxied: bool,
) -> ReconciliationOutcome {
    let settings = Settings::new(
        Credential::new(credential),
        Target::new(zone_id, hostname, proxied),
    );
    reconcile_with(&settings).await
}
