use thiserror::Error;

/// Errors surfaced by the core workflows.
///
/// Remote failures are fatal for the workflow run that hit them; the
/// caller has already seen whatever progress was reported before.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ncm_api::Error),

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl CoreError {
    /// Returns `true` if NCM refused the credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_auth_error())
    }
}
