//! # cloudflare-ddns
//!
//! Keeps a single Cloudflare `A` record pointed at the host's current public
//! IPv4 address.
//!
//! Each run resolves the public address, finds the one `A` record carrying the
//! target hostname, and rewrites it only when its content differs. Nothing is
//! cached between runs.
//!
//! ## Usage
//!
//! ```bash
//! # Reconcile once (token, zone and domain may also come from the
//! # `apitoken`, `zoneid`, `domain` and `proxy` environment variables)
//! cloudflare-ddns -a "$TOKEN" -z "$ZONE" -d home.example.com
//!
//! # Show the public address and the record without writing
//! cloudflare-ddns status
//!
//! # Reconcile every 5 minutes
//! cloudflare-ddns daemon --interval 300
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod providers;
pub mod reconcile;
pub mod resolver;
pub mod updater;

pub use config::{Config, Settings};
pub use directory::RecordDirectory;
pub use error::{DdnsError, Result};
pub use providers::{CloudflareClient, Credential, DnsApi, DnsRecord};
pub use reconcile::{reconcile, reconcile_with, ReconciliationOutcome, Reconciler, Stage, Target};
pub use resolver::{AddressResolver, AddressSource, PublicAddress};
pub use updater::RecordUpdater;
