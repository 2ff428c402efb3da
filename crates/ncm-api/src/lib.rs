// ncm-api: Async Rust client for the Cradlepoint NetCloud Manager (NCM) v2 API

pub mod auth;
mod de;
pub mod error;
pub mod transport;
pub mod v2;

pub use auth::ApiKeys;
pub use error::Error;
pub use transport::TransportConfig;
pub use v2::client::{DEFAULT_BASE_URL, NcmClient, PAGE_SIZE};
pub use v2::models::{NetDevice, NetDeviceFilter, Page, PageMeta, Router, RouterRef, UsageSample};
