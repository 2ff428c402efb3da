// Net device and usage sample endpoints

use tracing::debug;

use crate::error::Error;
use crate::v2::client::NcmClient;
use crate::v2::models::{NetDevice, NetDeviceFilter, UsageSample};

impl NcmClient {
    /// List net devices matching a filter.
    ///
    /// `GET net_devices/?connection_state=..&is_asset=..&router=..&expand=router`
    /// (all pages, only the filters that are set)
    pub async fn list_net_devices(&self, filter: &NetDeviceFilter) -> Result<Vec<NetDevice>, Error> {
        debug!(?filter, "listing net devices");
        self.get_all("net_devices/", &filter.params()).await
    }

    /// List usage samples for one net device inside an open time interval.
    ///
    /// `GET net_device_usage_samples/?net_device={id}&created_at__gt=..&created_at__lt=..`
    /// (all pages). Bounds are passed through verbatim.
    pub async fn list_usage_samples(
        &self,
        net_device_id: &str,
        created_after: &str,
        created_before: &str,
    ) -> Result<Vec<UsageSample>, Error> {
        debug!(net_device_id, created_after, created_before, "listing usage samples");
        self.get_all(
            "net_device_usage_samples/",
            &[
                ("net_device", net_device_id.to_owned()),
                ("created_at__gt", created_after.to_owned()),
                ("created_at__lt", created_before.to_owned()),
            ],
        )
        .await
    }
}
