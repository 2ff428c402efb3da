// In-memory `FleetDirectory` for workflow tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use ncm_core::{CoreError, FleetDirectory, NetDevice, Router, RouterRef, UsageSample, UsageWindow};

pub const BASE: &str = "https://ncm.test/api/v2/";

pub fn group_url(id: &str) -> String {
    format!("{BASE}groups/{id}/")
}

#[derive(Default)]
pub struct FakeDirectory {
    pub routers_by_group: HashMap<String, Vec<Router>>,
    pub connected: Vec<NetDevice>,
    pub interfaces_by_router: HashMap<String, Vec<NetDevice>>,
    pub samples_by_device: HashMap<String, Vec<UsageSample>>,
    /// Router ids whose assignment is rejected with HTTP 400.
    pub reject_moves: HashSet<String>,
    /// Router ids whose assignment is rejected with HTTP 401.
    pub unauthorized_moves: HashSet<String>,
    /// Net device ids whose usage lookup fails with HTTP 500.
    pub failing_usage: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeDirectory {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn api_error(status: u16, message: &str) -> CoreError {
    CoreError::Api(ncm_api::Error::Api {
        status,
        message: message.into(),
    })
}

impl FleetDirectory for FakeDirectory {
    fn group_url(&self, group_id: &str) -> String {
        group_url(group_id)
    }

    async fn routers_in_group(&self, group_id: &str) -> Result<Vec<Router>, CoreError> {
        self.record(format!("routers_in_group {group_id}"));
        Ok(self
            .routers_by_group
            .get(group_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn connected_asset_devices(&self) -> Result<Vec<NetDevice>, CoreError> {
        self.record("connected_asset_devices".into());
        Ok(self.connected.clone())
    }

    async fn net_devices_for_router(&self, router_id: &str) -> Result<Vec<NetDevice>, CoreError> {
        self.record(format!("net_devices_for_router {router_id}"));
        Ok(self
            .interfaces_by_router
            .get(router_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn usage_samples(
        &self,
        net_device_id: &str,
        window: &UsageWindow,
    ) -> Result<Vec<UsageSample>, CoreError> {
        self.record(format!(
            "usage_samples {net_device_id} {} {}",
            window.created_after(),
            window.created_before()
        ));
        if self.failing_usage.contains(net_device_id) {
            return Err(api_error(500, "usage backend unavailable"));
        }
        Ok(self
            .samples_by_device
            .get(net_device_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn assign_router_to_group(
        &self,
        router_id: &str,
        group_id: &str,
    ) -> Result<Router, CoreError> {
        self.record(format!("assign {router_id} {group_id}"));
        if self.unauthorized_moves.contains(router_id) {
            return Err(CoreError::Api(ncm_api::Error::Authentication {
                message: "HTTP 401: Invalid API credentials".into(),
            }));
        }
        if self.reject_moves.contains(router_id) {
            return Err(api_error(400, "router is locked"));
        }
        Ok(Router {
            id: Some(router_id.into()),
            group: Some(group_url(group_id)),
            ..Router::default()
        })
    }
}

// ── Builders ────────────────────────────────────────────────────────

pub fn router(id: &str, group: &str) -> Router {
    Router {
        id: Some(id.into()),
        name: Some(format!("store-{id}")),
        mac: Some(format!("00:30:44:00:00:{id:0>2}")),
        serial_number: Some(format!("SN{id}")),
        group: Some(group_url(group)),
    }
}

pub fn lte(id: &str, uptime: u64, router: Router) -> NetDevice {
    NetDevice {
        id: Some(id.into()),
        name: Some(format!("mdm-{id}")),
        connection_state: Some("connected".into()),
        uptime: Some(uptime),
        homecarrid: Some("Verizon".into()),
        iccid: Some(format!("8901{id}")),
        ipv4_address: None,
        router: Some(RouterRef::Expanded(Box::new(router))),
    }
}

pub fn ethernet_wan(state: &str, ip: &str) -> NetDevice {
    NetDevice {
        name: Some("ethernet-wan".into()),
        connection_state: Some(state.into()),
        ipv4_address: Some(ip.into()),
        ..NetDevice::default()
    }
}

pub fn sample(bytes_in: u64, bytes_out: u64) -> UsageSample {
    UsageSample {
        bytes_in: Some(bytes_in),
        bytes_out: Some(bytes_out),
        created_at: None,
    }
}
