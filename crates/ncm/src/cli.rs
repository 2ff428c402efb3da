//! Clap derive structures for the `ncm` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ncm -- fleet chores for Cradlepoint NetCloud Manager
#[derive(Debug, Parser)]
#[command(
    name = "ncm",
    version,
    about = "Bulk router moves and stale-LTE reports for NetCloud Manager",
    long_about = "Operational tools for a Cradlepoint NetCloud Manager fleet.\n\n\
        Credentials are read from apikeys.toml (or --config) and may be\n\
        overridden with NCM_KEYS__* environment variables.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration file holding the API keys
    #[arg(long, env = "NCM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NCM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides [api] timeout)
    #[arg(long, env = "NCM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one router id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move every router in one group to another group
    #[command(alias = "mv")]
    MoveGroup(MoveGroupArgs),

    /// Report LTE interfaces connected for a week or more in production groups
    #[command(alias = "lte")]
    StaleLte(StaleLteArgs),
}

#[derive(Debug, Args)]
pub struct MoveGroupArgs {
    /// Group id to move routers out of
    pub source_group: String,

    /// Group id to move routers into
    pub target_group: String,
}

#[derive(Debug, Args)]
pub struct StaleLteArgs {
    /// CSV destination (overrides [report] output)
    #[arg(long, short = 'f')]
    pub report_file: Option<PathBuf>,

    /// Records enriched concurrently (overrides [report] concurrency)
    #[arg(long, short = 'j', value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,
}
