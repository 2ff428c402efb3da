//! Shared helpers for command handlers.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use ncm_api::NcmClient;
use ncm_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Loaded configuration plus a client built from it.
pub struct Context {
    pub config: Config,
    pub client: NcmClient,
}

/// Load the config file and build an authenticated client.
///
/// Every failure here happens before any request is sent.
pub fn connect(global: &GlobalOpts) -> Result<Context, CliError> {
    let path = ncm_config::resolve_config_path(global.config.as_deref());
    tracing::debug!(path = %path.display(), "loading configuration");
    let config = ncm_config::load_config(&path)?;

    let mut transport = config.transport();
    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        transport = transport.with_timeout(Duration::from_secs(secs));
    }

    let client = NcmClient::new(&config.api.base_url, &config.keys.to_api_keys(), &transport)?;
    Ok(Context { config, client })
}

/// Show `prompt` and read one line of the answer, auto-approving with
/// `--yes`. Only a lone `y` (any case, surrounding whitespace ignored)
/// counts; end of input is a "no".
///
/// The prompt goes to stdout only when stdout carries human-readable text;
/// with a JSON format it goes to stderr, and `--yes` suppresses it.
pub fn confirm(prompt: &str, yes_flag: bool, text_stdout: bool) -> Result<bool, CliError> {
    if text_stdout {
        println!("{prompt}");
        io::stdout().flush()?;
    } else if !yes_flag {
        eprintln!("{prompt}");
    }
    if yes_flag {
        return Ok(true);
    }

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(ncm_core::is_confirmed(&answer))
}
