// Stale-LTE report pipeline
//
// fetch → sort/filter → per-record enrichment → aggregate. Enrichment of
// one record is independent of every other; rows always come back in the
// sorted/filtered candidate order regardless of `concurrency`.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use futures_util::{StreamExt, TryStreamExt, stream};
use serde::Serialize;
use tracing::{debug, info};

use ncm_api::{NetDevice, UsageSample};

use crate::directory::FleetDirectory;
use crate::error::CoreError;
use crate::format;
use crate::groups::{GroupUrlSet, ProductionGroup, default_production_groups};
use crate::window::UsageWindow;

/// Name of the wired WAN interface on every router.
pub const ETHERNET_WAN: &str = "ethernet-wan";

/// One week. Interfaces connected for less than this are not stale.
pub const MIN_UPTIME_SECS: u64 = 7 * 24 * 60 * 60;

// ── Options ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Days of usage to aggregate, aligned to midnight UTC.
    pub lookback_days: u32,
    /// Minimum interface uptime (seconds) to be reported.
    pub min_uptime_secs: u64,
    /// Groups whose routers are in scope.
    pub production_groups: Vec<ProductionGroup>,
    /// Records enriched at once. `1` is strictly sequential.
    pub concurrency: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            lookback_days: 1,
            min_uptime_secs: MIN_UPTIME_SECS,
            production_groups: default_production_groups(),
            concurrency: 1,
        }
    }
}

// ── Report types ────────────────────────────────────────────────────

/// Link state and address of a router's `ethernet-wan` interface.
///
/// Both fields are empty when the router has no such interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WanStatus {
    pub link_state: String,
    pub ipv4_address: String,
}

/// One qualifying LTE interface, joined with its router and usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub router_id: String,
    pub router_name: String,
    pub router_mac: String,
    pub router_serial: String,
    pub carrier_id: String,
    pub iccid: String,
    pub lte_uptime_secs: u64,
    pub usage_bytes: u64,
    pub wan: WanStatus,
}

impl ReportRow {
    /// LTE uptime as `"{d}d {h}h {m}m {s}s"`.
    pub fn lte_uptime(&self) -> String {
        format::fmt_uptime(self.lte_uptime_secs)
    }

    /// Usage in decimal gigabytes, two decimal places.
    pub fn usage_gigabytes(&self) -> f64 {
        format::usage_gigabytes(self.usage_bytes)
    }
}

/// The full, ordered report.
#[derive(Debug, Clone, Serialize)]
pub struct StaleLteReport {
    pub window: UsageWindow,
    pub rows: Vec<ReportRow>,
}

impl StaleLteReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Pure pipeline stages ────────────────────────────────────────────

/// Stable-sort by descending uptime, then keep records with
/// `uptime >= min_uptime_secs` whose router is in one of `groups`.
///
/// Missing uptime counts as `0`; a missing router or group never matches.
pub fn select_candidates(
    mut devices: Vec<NetDevice>,
    min_uptime_secs: u64,
    groups: &GroupUrlSet,
) -> Vec<NetDevice> {
    devices.sort_by_key(|d| Reverse(d.uptime_secs()));
    devices
        .into_iter()
        .filter(|d| d.uptime_secs() >= min_uptime_secs)
        .filter(|d| groups.contains(d.group_url()))
        .collect()
}

/// Status of the first interface named exactly `ethernet-wan`.
///
/// Routers occasionally report several; only the first in list order is
/// used.
pub fn ethernet_wan_status(devices: &[NetDevice]) -> WanStatus {
    devices
        .iter()
        .find(|d| d.name.as_deref() == Some(ETHERNET_WAN))
        .map(|d| WanStatus {
            link_state: d.connection_state.clone().unwrap_or_default(),
            ipv4_address: d.ipv4_address.clone().unwrap_or_default(),
        })
        .unwrap_or_default()
}

/// Sum of `bytes_in + bytes_out` over all samples.
pub fn total_usage_bytes(samples: &[UsageSample]) -> u64 {
    samples
        .iter()
        .fold(0_u64, |acc, s| acc.saturating_add(s.total_bytes()))
}

// ── Orchestration ───────────────────────────────────────────────────

/// Run the whole pipeline against `directory`, anchoring the usage window
/// at `now`.
///
/// Any remote failure aborts the run; rows enriched before it are dropped
/// with the rest.
pub async fn build_report<D: FleetDirectory>(
    directory: &D,
    options: &ReportOptions,
    now: DateTime<Utc>,
) -> Result<StaleLteReport, CoreError> {
    let window = UsageWindow::days_back_from(now, options.lookback_days).ok_or_else(|| {
        CoreError::Validation {
            field: "lookback_days".into(),
            reason: format!("{} days is out of range", options.lookback_days),
        }
    })?;
    let groups = GroupUrlSet::resolve(directory, &options.production_groups);
    debug!(
        groups = groups.len(),
        start = %window.created_after(),
        end = %window.created_before(),
        "report parameters"
    );

    let devices = directory.connected_asset_devices().await?;
    let fetched = devices.len();
    let candidates = select_candidates(devices, options.min_uptime_secs, &groups);
    info!(fetched, candidates = candidates.len(), "selected stale LTE candidates");

    let window_ref = &window;
    let rows: Vec<ReportRow> = stream::iter(candidates.iter())
        .map(|device| enrich(directory, device, window_ref))
        .buffered(options.concurrency.max(1))
        .try_collect()
        .await?;

    Ok(StaleLteReport { window, rows })
}

/// Join one candidate with its router's WAN status and usage total.
async fn enrich<D: FleetDirectory>(
    directory: &D,
    device: &NetDevice,
    window: &UsageWindow,
) -> Result<ReportRow, CoreError> {
    let router = device.router();
    let router_id = router.and_then(|r| r.id());

    let wan = match router_id {
        Some(id) => ethernet_wan_status(&directory.net_devices_for_router(id).await?),
        None => WanStatus::default(),
    };

    let usage_bytes = match device.id() {
        Some(net_device_id) => {
            info!(router_id, net_device_id, "fetching usage samples");
            let samples = directory.usage_samples(net_device_id, window).await?;
            info!(router_id, samples = samples.len(), "retrieved usage samples");
            total_usage_bytes(&samples)
        }
        None => 0,
    };

    let text = |v: Option<&String>| v.cloned().unwrap_or_default();
    Ok(ReportRow {
        router_id: router_id.unwrap_or_default().to_owned(),
        router_name: text(router.and_then(|r| r.name.as_ref())),
        router_mac: text(router.and_then(|r| r.mac.as_ref())),
        router_serial: text(router.and_then(|r| r.serial_number.as_ref())),
        carrier_id: text(device.homecarrid.as_ref()),
        iccid: text(device.iccid.as_ref()),
        lte_uptime_secs: device.uptime_secs(),
        usage_bytes,
        wan,
    })
}
