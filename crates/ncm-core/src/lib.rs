//! Fleet workflows for Cradlepoint NetCloud Manager, built on `ncm-api`.
//!
//! - **[`FleetDirectory`]**: the narrow data-fetch contract both workflows
//!   consume. [`ncm_api::NcmClient`] implements it; tests supply fakes.
//!
//! - **Group mover** ([`mover`]): collect every router id in a source group,
//!   confirm, then reassign each router to a target group one at a time,
//!   recording a per-router [`MoveOutcome`].
//!
//! - **Stale-LTE report** ([`report`]): find LTE interfaces connected for a
//!   week or more on routers in production groups, enrich each with the
//!   router's ethernet-WAN status and the previous day's usage, and return
//!   ordered [`ReportRow`]s.

pub mod directory;
pub mod error;
pub mod format;
pub mod groups;
pub mod mover;
pub mod report;
pub mod window;

// ── Primary re-exports ──────────────────────────────────────────────
pub use directory::FleetDirectory;
pub use error::CoreError;
pub use groups::{GroupUrlSet, ProductionGroup, default_production_groups};
pub use mover::{MoveOutcome, MovePlan, MoveReport, MoveResult, is_confirmed};
pub use report::{
    ETHERNET_WAN, MIN_UPTIME_SECS, ReportOptions, ReportRow, StaleLteReport, WanStatus,
    build_report, ethernet_wan_status, select_candidates, total_usage_bytes,
};
pub use window::UsageWindow;

// Wire types the workflows hand back to callers.
pub use ncm_api::{NetDevice, Router, RouterRef, UsageSample};
