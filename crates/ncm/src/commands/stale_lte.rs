//! `ncm stale-lte`: LTE interfaces that have stayed up for a week or more.

use chrono::Utc;
use serde::Serialize;
use tabled::Tabled;

use ncm_core::{ReportRow, build_report, format};

use crate::cli::{GlobalOpts, OutputFormat, StaleLteArgs};
use crate::error::CliError;
use crate::output;

use super::util::Context;

/// Column names, shared by the console table and the CSV header.
const COLUMNS: [&str; 10] = [
    "Router ID",
    "Router Name",
    "Router MAC",
    "Router Serial",
    "LTE Provider",
    "ICCID",
    "LTE Uptime",
    "24Hr LTE Usage (GB)",
    "EWAN Link State",
    "EWAN IP Address",
];

// ── Table row ────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Tabled)]
struct StaleLteRow {
    #[tabled(rename = "Router ID")]
    router_id: String,
    #[tabled(rename = "Router Name")]
    router_name: String,
    #[tabled(rename = "Router MAC")]
    router_mac: String,
    #[tabled(rename = "Router Serial")]
    router_serial: String,
    #[tabled(rename = "LTE Provider")]
    carrier_id: String,
    #[tabled(rename = "ICCID")]
    iccid: String,
    #[tabled(rename = "LTE Uptime")]
    lte_uptime: String,
    #[tabled(rename = "24Hr LTE Usage (GB)")]
    usage_gb: String,
    #[tabled(rename = "EWAN Link State")]
    ewan_link_state: String,
    #[tabled(rename = "EWAN IP Address")]
    ewan_ip_address: String,
}

impl StaleLteRow {
    fn new(r: &ReportRow) -> Self {
        Self {
            router_id: r.router_id.clone(),
            router_name: r.router_name.clone(),
            router_mac: r.router_mac.clone(),
            router_serial: r.router_serial.clone(),
            carrier_id: r.carrier_id.clone(),
            iccid: r.iccid.clone(),
            lte_uptime: r.lte_uptime(),
            usage_gb: format::fmt_gigabytes(r.usage_gigabytes()),
            ewan_link_state: r.wan.link_state.clone(),
            ewan_ip_address: r.wan.ipv4_address.clone(),
        }
    }
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(args: StaleLteArgs, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let mut options = ctx.config.report.to_options();
    if let Some(n) = args.concurrency {
        options.concurrency = usize::from(n);
    }

    let report = build_report(&ctx.client, &options, Utc::now()).await?;

    let rendered = output::render_list(
        &global.output,
        &report.rows,
        StaleLteRow::new,
        |r| r.router_id.clone(),
    )?;
    output::print_output(&rendered, global.quiet);
    if global.output == OutputFormat::Table {
        output::print_output(&format!("Row count: {}", report.len()), global.quiet);
    }

    let path = args
        .report_file
        .unwrap_or_else(|| ctx.config.report.output.clone());
    let rows: Vec<StaleLteRow> = report.rows.iter().map(StaleLteRow::new).collect();
    output::write_csv(&path, &rows, &COLUMNS)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote CSV report");

    Ok(())
}
