//! CLI error types with miette diagnostics.
//!
//! Maps core, config, and API failures into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use ncm_config::ConfigError;
use ncm_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach NetCloud Manager")]
    #[diagnostic(
        code(ncm::connection_failed),
        help("Check network access to the API and the [api] base_url setting.")
    )]
    ConnectionFailed {
        #[source]
        source: ncm_api::Error,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(ncm::timeout),
        help("Increase the timeout with --timeout or [api] timeout.")
    )]
    Timeout {
        #[source]
        source: ncm_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ncm::auth_failed),
        help(
            "Verify the four keys in the [keys] section of your config file.\n\
             Keys are issued under Tools > API Keys in NetCloud Manager."
        )
    )]
    AuthFailed { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(ncm::api_error))]
    Api(ncm_api::Error),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ncm::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(ncm::no_config),
        help(
            "Create apikeys.toml with a [keys] section holding x-cp-api-id,\n\
             x-cp-api-key, x-ecm-api-id and x-ecm-api-key, or pass --config."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(ncm::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not write report: {0}")]
    #[diagnostic(code(ncm::csv))]
    Csv(#[from] csv::Error),

    #[error("Could not encode output: {0}")]
    #[diagnostic(code(ncm::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<ncm_api::Error> for CliError {
    fn from(err: ncm_api::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { source: err }
        } else if err.is_connection_error() {
            Self::ConnectionFailed { source: err }
        } else if let ncm_api::Error::Authentication { message } = err {
            Self::AuthFailed { message }
        } else {
            Self::Api(err)
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(e) => e.into(),
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => Self::NoConfig {
                path: path.display().to_string(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Figment(e) => Self::Config(e),
        }
    }
}
