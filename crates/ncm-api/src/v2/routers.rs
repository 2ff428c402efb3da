// Router endpoints
//
// Group membership is expressed by URL on the router record; moving a
// router is a partial update of that one attribute.

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::v2::client::NcmClient;
use crate::v2::models::Router;

impl NcmClient {
    /// List every router in a group.
    ///
    /// `GET routers/?group={group_id}` (all pages)
    pub async fn list_routers_in_group(&self, group_id: &str) -> Result<Vec<Router>, Error> {
        debug!(group_id, "listing routers in group");
        self.get_all("routers/", &[("group", group_id.to_owned())])
            .await
    }

    /// Assign a router to a group.
    ///
    /// `PUT routers/{router_id}/` with `{"group": "<group url>"}`. Assigning
    /// a router to the group it is already in is a no-op on the server.
    pub async fn assign_router_to_group(
        &self,
        router_id: &str,
        group_id: &str,
    ) -> Result<Router, Error> {
        debug!(router_id, group_id, "assigning router to group");
        self.put(
            &format!("routers/{router_id}/"),
            &json!({ "group": self.group_url(group_id) }),
        )
        .await
    }
}
