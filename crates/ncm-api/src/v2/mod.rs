// NCM v2 REST API
//
// `client` owns transport mechanics (auth headers, pagination, error
// mapping); resource endpoints are inherent methods in sibling files.

pub mod client;
pub mod models;
mod net_devices;
mod routers;
