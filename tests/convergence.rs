//! Repeated reconciliation against a stateful zone.

mod common;

use cloudflare_ddns::{DdnsError, ReconciliationOutcome, Reconciler, Target};
use common::{a_record, FakeZone, FixedAddress};

fn target() -> Target {
    Target::new("zone-1", "home.example.com", false)
}

#[tokio::test]
async fn second_run_after_update_is_a_no_op() {
    let zone = FakeZone::new(
        "zone-1",
        vec![
            a_record("r0", "example.com", "9.9.9.9"),
            a_record("r1", "home.example.com", "1.2.3.4"),
        ],
    );
    let address = FixedAddress::new("5.6.7.8");
    let reconciler = Reconciler::new(&address, &zone);

    let first = reconciler.reconcile(&target()).await;
    assert!(matches!(
        first,
        ReconciliationOutcome::Updated { ref previous, ref current }
            if previous == "1.2.3.4" && current == "5.6.7.8"
    ));

    let second = reconciler.reconcile(&target()).await;
    assert!(matches!(second, ReconciliationOutcome::NoChangeNeeded { .. }));

    let updates = zone.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "r1");
    assert_eq!(updates[0].1.content, "5.6.7.8");
    assert_eq!(zone.content_of("r1").as_deref(), Some("5.6.7.8"));
    assert_eq!(zone.content_of("r0").as_deref(), Some("9.9.9.9"));
    assert_eq!(address.call_count(), 2);
    assert_eq!(zone.list_count(), 2);
}

#[tokio::test]
async fn proxy_flag_reaches_the_write() {
    let zone = FakeZone::new("zone-1", vec![a_record("r1", "home.example.com", "1.2.3.4")]);
    let address = FixedAddress::new("5.6.7.8");

    let outcome = Reconciler::new(&address, &zone)
        .reconcile(&Target::new("zone-1", "home.example.com", true))
        .await;

    assert!(!outcome.is_failure());
    let updates = zone.updates();
    assert_eq!(updates.len(), 1);
    assert!(updates[0].1.proxied);
    assert_eq!(updates[0].1.ttl, 1);
    assert_eq!(updates[0].1.record_type, "A");
}

#[tokio::test]
async fn aaaa_record_with_same_name_is_left_alone() {
    let mut aaaa = a_record("r2", "home.example.com", "2001:db8::1");
    aaaa.record_type = "AAAA".to_string();
    let zone = FakeZone::new(
        "zone-1",
        vec![a_record("r1", "home.example.com", "1.2.3.4"), aaaa],
    );
    let address = FixedAddress::new("5.6.7.8");

    let outcome = Reconciler::new(&address, &zone).reconcile(&target()).await;

    assert!(matches!(outcome, ReconciliationOutcome::Updated { .. }));
    assert_eq!(zone.content_of("r2").as_deref(), Some("2001:db8::1"));
}

#[tokio::test]
async fn wrong_zone_fails_without_writing() {
    let zone = FakeZone::new("zone-1", vec![a_record("r1", "home.example.com", "1.2.3.4")]);
    let address = FixedAddress::new("5.6.7.8");

    let outcome = Reconciler::new(&address, &zone)
        .reconcile(&Target::new("zone-2", "home.example.com", false))
        .await;

    assert!(matches!(
        outcome,
        ReconciliationOutcome::Failed {
            error: DdnsError::Transport { .. },
            ..
        }
    ));
    assert!(zone.updates().is_empty());
}
