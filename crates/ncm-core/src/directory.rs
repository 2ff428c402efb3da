// The data-fetch contract the workflows depend on.
//
// The workflows never see HTTP, pagination, or credentials: only complete
// collections and one mutation.

use std::future::Future;

use ncm_api::{NcmClient, NetDevice, NetDeviceFilter, Router, UsageSample};

use crate::error::CoreError;
use crate::window::UsageWindow;

/// Read access to the fleet plus the single group-assignment mutation.
///
/// Every list method returns the complete collection (all pages) in
/// server order.
pub trait FleetDirectory {
    /// Canonical URL for a group id, in the exact form routers embed.
    fn group_url(&self, group_id: &str) -> String;

    /// Every router currently in `group_id`.
    fn routers_in_group(
        &self,
        group_id: &str,
    ) -> impl Future<Output = Result<Vec<Router>, CoreError>> + Send;

    /// Connected, asset-flagged interfaces with their parent router expanded.
    fn connected_asset_devices(
        &self,
    ) -> impl Future<Output = Result<Vec<NetDevice>, CoreError>> + Send;

    /// Every interface attached to one router.
    fn net_devices_for_router(
        &self,
        router_id: &str,
    ) -> impl Future<Output = Result<Vec<NetDevice>, CoreError>> + Send;

    /// Usage samples for one interface created inside `window`.
    fn usage_samples(
        &self,
        net_device_id: &str,
        window: &UsageWindow,
    ) -> impl Future<Output = Result<Vec<UsageSample>, CoreError>> + Send;

    /// Move a router into `group_id`. Idempotent on the server.
    fn assign_router_to_group(
        &self,
        router_id: &str,
        group_id: &str,
    ) -> impl Future<Output = Result<Router, CoreError>> + Send;
}

impl FleetDirectory for NcmClient {
    fn group_url(&self, group_id: &str) -> String {
        NcmClient::group_url(self, group_id)
    }

    async fn routers_in_group(&self, group_id: &str) -> Result<Vec<Router>, CoreError> {
        Ok(self.list_routers_in_group(group_id).await?)
    }

    async fn connected_asset_devices(&self) -> Result<Vec<NetDevice>, CoreError> {
        Ok(self
            .list_net_devices(&NetDeviceFilter::connected_assets())
            .await?)
    }

    async fn net_devices_for_router(&self, router_id: &str) -> Result<Vec<NetDevice>, CoreError> {
        Ok(self
            .list_net_devices(&NetDeviceFilter::for_router(router_id))
            .await?)
    }

    async fn usage_samples(
        &self,
        net_device_id: &str,
        window: &UsageWindow,
    ) -> Result<Vec<UsageSample>, CoreError> {
        Ok(self
            .list_usage_samples(
                net_device_id,
                &window.created_after(),
                &window.created_before(),
            )
            .await?)
    }

    async fn assign_router_to_group(
        &self,
        router_id: &str,
        group_id: &str,
    ) -> Result<Router, CoreError> {
        Ok(NcmClient::assign_router_to_group(self, router_id, group_id).await?)
    }
}
