#![allow(clippy::unwrap_used)]
// Stale-LTE pipeline tests against an in-memory directory.

mod support;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use ncm_core::{ProductionGroup, ReportOptions, WanStatus, build_report};

use support::{FakeDirectory, ethernet_wan, lte, router, sample};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap()
}

/// Three connected LTE interfaces: two in production groups, one in a lab group.
fn fleet() -> FakeDirectory {
    let mut dir = FakeDirectory::default();
    dir.connected = vec![
        lte("100", 800_000, router("1", "225264")),
        lte("200", 600_000, router("2", "5")),
        lte("300", 700_000, router("3", "199432")),
    ];
    dir.interfaces_by_router.insert(
        "1".into(),
        vec![
            lte("100", 800_000, router("1", "225264")),
            ethernet_wan("disconnected", ""),
        ],
    );
    dir.interfaces_by_router
        .insert("3".into(), vec![ethernet_wan("connected", "203.0.113.9")]);
    dir.samples_by_device
        .insert("100".into(), vec![sample(100, 50), sample(0, 0)]);
    dir.samples_by_device.insert(
        "300".into(),
        vec![sample(1_000_000_000, 250_000_000), sample(9_000_000, 1_000_000)],
    );
    dir
}

#[tokio::test]
async fn end_to_end_rows_are_sorted_filtered_and_enriched() {
    let dir = fleet();

    let report = build_report(&dir, &ReportOptions::default(), now())
        .await
        .unwrap();

    let ids: Vec<_> = report.rows.iter().map(|r| r.router_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    let first = &report.rows[0];
    assert_eq!(first.router_name, "store-1");
    assert_eq!(first.router_mac, "00:30:44:00:00:01");
    assert_eq!(first.router_serial, "SN1");
    assert_eq!(first.carrier_id, "Verizon");
    assert_eq!(first.iccid, "8901100");
    assert_eq!(first.lte_uptime(), "9d 6h 13m 20s");
    assert_eq!(first.usage_bytes, 150);
    assert_eq!(
        first.wan,
        WanStatus {
            link_state: "disconnected".into(),
            ipv4_address: String::new(),
        }
    );

    let second = &report.rows[1];
    assert_eq!(second.usage_bytes, 1_260_000_000);
    assert!((second.usage_gigabytes() - 1.26).abs() < f64::EPSILON);
    assert_eq!(second.wan.ipv4_address, "203.0.113.9");
}

#[tokio::test]
async fn excluded_records_are_never_enriched() {
    let dir = fleet();

    build_report(&dir, &ReportOptions::default(), now())
        .await
        .unwrap();

    assert_eq!(
        dir.calls(),
        vec![
            "connected_asset_devices".to_owned(),
            "net_devices_for_router 1".to_owned(),
            "usage_samples 100 2024-3-9T00:00:00.000000+00:00 2024-3-10T00:00:00.000000+00:00"
                .to_owned(),
            "net_devices_for_router 3".to_owned(),
            "usage_samples 300 2024-3-9T00:00:00.000000+00:00 2024-3-10T00:00:00.000000+00:00"
                .to_owned(),
        ]
    );
}

#[tokio::test]
async fn router_without_wan_interface_gets_empty_status() {
    let mut dir = FakeDirectory::default();
    dir.connected = vec![lte("100", 900_000, router("1", "225265"))];

    let report = build_report(&dir, &ReportOptions::default(), now())
        .await
        .unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.rows[0].wan, WanStatus::default());
    assert_eq!(report.rows[0].usage_bytes, 0);
}

#[tokio::test]
async fn configured_groups_replace_the_defaults() {
    let dir = fleet();
    let options = ReportOptions {
        production_groups: vec![ProductionGroup::new("5", "LAB")],
        min_uptime_secs: 0,
        ..ReportOptions::default()
    };

    let report = build_report(&dir, &options, now()).await.unwrap();

    let ids: Vec<_> = report.rows.iter().map(|r| r.router_id.as_str()).collect();
    assert_eq!(ids, vec!["2"]);
}

#[tokio::test]
async fn concurrent_enrichment_preserves_row_order() {
    let mut dir = FakeDirectory::default();
    dir.connected = (1..=12_u64)
        .map(|i| lte(&format!("{i}"), 700_000 + i, router(&format!("{i}"), "225264")))
        .collect();
    let options = ReportOptions {
        concurrency: 4,
        ..ReportOptions::default()
    };

    let report = build_report(&dir, &options, now()).await.unwrap();

    let uptimes: Vec<_> = report.rows.iter().map(|r| r.lte_uptime_secs).collect();
    let expected: Vec<_> = (1..=12_u64).rev().map(|i| 700_000 + i).collect();
    assert_eq!(uptimes, expected);
}

#[tokio::test]
async fn usage_failure_aborts_the_report() {
    let mut dir = fleet();
    dir.failing_usage.insert("300".into());

    let err = build_report(&dir, &ReportOptions::default(), now())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("usage backend unavailable"), "got {err}");
    assert!(!err.is_auth_error());
}

#[tokio::test]
async fn window_is_anchored_on_now() {
    let dir = FakeDirectory::default();

    let report = build_report(&dir, &ReportOptions::default(), now())
        .await
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(report.window.created_after(), "2024-3-9T00:00:00.000000+00:00");
    assert_eq!(report.window.created_before(), "2024-3-10T00:00:00.000000+00:00");
}
