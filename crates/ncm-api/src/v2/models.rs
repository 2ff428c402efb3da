// NCM v2 wire types
//
// Every field is optional on the wire. Accessors that substitute a
// documented default (0, "") live next to the field they read so the
// defaulting is visible at the model boundary.

use serde::Deserialize;

use crate::de;

/// Paged collection envelope: `{ "data": [...], "meta": { "next": ... } }`.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageMeta {
    /// Absolute URL of the next page, `null` on the last one.
    pub next: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// A router as returned by `routers/` or embedded via `expand=router`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Router {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub mac: Option<String>,
    pub serial_number: Option<String>,
    /// Canonical group URL (`.../api/v2/groups/{id}/`), not a bare id.
    pub group: Option<String>,
}

impl Router {
    /// The router id, or `None` when absent or empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Group URL, `""` when the router has no group.
    pub fn group_url(&self) -> &str {
        self.group.as_deref().unwrap_or("")
    }
}

/// The `router` attribute of a net device: a URL by default, the full
/// record when the request asked for `expand=router`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RouterRef {
    Expanded(Box<Router>),
    Url(String),
}

/// A network interface attached to a router (LTE modem, ethernet WAN, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NetDevice {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub connection_state: Option<String>,
    /// Seconds the interface has been continuously connected.
    #[serde(default, deserialize_with = "de::opt_count")]
    pub uptime: Option<u64>,
    /// Home carrier id of the SIM (LTE provider).
    pub homecarrid: Option<String>,
    pub iccid: Option<String>,
    pub ipv4_address: Option<String>,
    pub router: Option<RouterRef>,
}

impl NetDevice {
    /// The net device id, or `None` when absent or empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Uptime in seconds, `0` when not reported.
    pub fn uptime_secs(&self) -> u64 {
        self.uptime.unwrap_or(0)
    }

    /// The parent router, if the record was fetched with `expand=router`.
    pub fn router(&self) -> Option<&Router> {
        match &self.router {
            Some(RouterRef::Expanded(router)) => Some(router),
            _ => None,
        }
    }

    /// Parent router's group URL, `""` when not expanded or ungrouped.
    pub fn group_url(&self) -> &str {
        self.router().map_or("", Router::group_url)
    }
}

/// One time-bucketed byte-count measurement for a net device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UsageSample {
    #[serde(default, deserialize_with = "de::opt_count")]
    pub bytes_in: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_count")]
    pub bytes_out: Option<u64>,
    pub created_at: Option<String>,
}

impl UsageSample {
    /// `bytes_in + bytes_out`, each side `0` when missing.
    pub fn total_bytes(&self) -> u64 {
        self.bytes_in
            .unwrap_or(0)
            .saturating_add(self.bytes_out.unwrap_or(0))
    }
}

/// Query filters for `net_devices/`.
#[derive(Debug, Clone, Default)]
pub struct NetDeviceFilter {
    pub connection_state: Option<String>,
    pub is_asset: Option<bool>,
    pub router: Option<String>,
    pub expand_router: bool,
}

impl NetDeviceFilter {
    /// Connected, asset-flagged interfaces with the parent router embedded.
    pub fn connected_assets() -> Self {
        Self {
            connection_state: Some("connected".into()),
            is_asset: Some(true),
            router: None,
            expand_router: true,
        }
    }

    /// Every interface of one router.
    pub fn for_router(router_id: &str) -> Self {
        Self {
            router: Some(router_id.to_owned()),
            ..Self::default()
        }
    }

    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref state) = self.connection_state {
            params.push(("connection_state", state.clone()));
        }
        if let Some(is_asset) = self.is_asset {
            params.push(("is_asset", is_asset.to_string()));
        }
        if let Some(ref router) = self.router {
            params.push(("router", router.clone()));
        }
        if self.expand_router {
            params.push(("expand", "router".into()));
        }
        params
    }
}
