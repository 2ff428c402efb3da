//! Configuration for the NCM tools.
//!
//! One TOML file holds the four API credentials plus optional API and
//! report settings. Environment variables prefixed `NCM_` override file
//! values (`__` separates nesting, e.g. `NCM_KEYS__X_CP_API_ID`). The file
//! is read once at startup; a missing file or key is fatal.
//!
//! Section names are case-insensitive, and key names under `[keys]` may use
//! `-` or `_`. Both sources are normalised to `keys.x-cp-api-id` form before
//! merging so an environment value replaces the file value for the same key.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Value},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ncm_api::{ApiKeys, DEFAULT_BASE_URL, TransportConfig};
use ncm_core::{MIN_UPTIME_SECS, ProductionGroup, ReportOptions, default_production_groups};

/// File looked up in the working directory when no path is given.
pub const LOCAL_CONFIG_FILE: &str = "apikeys.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "NCM_";

const KEYS_SECTION: &str = "keys";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// API credentials. Required.
    pub keys: Keys,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub report: ReportSettings,
}

/// The two API-ID/API-KEY pairs, named as the NCM headers are.
#[derive(Deserialize, Serialize)]
pub struct Keys {
    #[serde(rename = "x-cp-api-id")]
    pub cp_api_id: String,

    #[serde(rename = "x-cp-api-key")]
    pub cp_api_key: String,

    #[serde(rename = "x-ecm-api-id")]
    pub ecm_api_id: String,

    #[serde(rename = "x-ecm-api-key")]
    pub ecm_api_key: String,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("cp_api_id", &"[REDACTED]")
            .field("cp_api_key", &"[REDACTED]")
            .field("ecm_api_id", &"[REDACTED]")
            .field("ecm_api_key", &"[REDACTED]")
            .finish()
    }
}

impl Keys {
    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("x-cp-api-id", &self.cp_api_id),
            ("x-cp-api-key", &self.cp_api_key),
            ("x-ecm-api-id", &self.ecm_api_id),
            ("x-ecm-api-key", &self.ecm_api_key),
        ]
    }

    pub fn to_api_keys(&self) -> ApiKeys {
        ApiKeys::new(
            self.cp_api_id.clone(),
            self.cp_api_key.clone(),
            self.ecm_api_id.clone(),
            self.ecm_api_key.clone(),
        )
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReportSettings {
    /// CSV destination, overwritten on every run.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    #[serde(default = "default_min_uptime_secs")]
    pub min_uptime_secs: u64,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_production_groups")]
    pub production_groups: Vec<ProductionGroup>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            lookback_days: default_lookback_days(),
            min_uptime_secs: default_min_uptime_secs(),
            concurrency: default_concurrency(),
            production_groups: default_production_groups(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("results.csv")
}
fn default_lookback_days() -> u32 {
    1
}
fn default_min_uptime_secs() -> u64 {
    MIN_UPTIME_SECS
}
fn default_concurrency() -> usize {
    1
}

impl ReportSettings {
    pub fn to_options(&self) -> ReportOptions {
        ReportOptions {
            lookback_days: self.lookback_days,
            min_uptime_secs: self.min_uptime_secs,
            production_groups: self.production_groups.clone(),
            concurrency: self.concurrency,
        }
    }
}

impl Config {
    /// Reject values that would parse but can't work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.keys.fields() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("keys.{field}"),
                    reason: "must not be empty".into(),
                });
            }
        }

        url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::Validation {
            field: "api.base_url".into(),
            reason: format!("invalid URL {:?}: {e}", self.api.base_url),
        })?;

        if self.api.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        if self.report.lookback_days == 0 {
            return Err(ConfigError::Validation {
                field: "report.lookback_days".into(),
                reason: "must be at least 1 day".into(),
            });
        }

        if self.report.concurrency == 0 {
            return Err(ConfigError::Validation {
                field: "report.concurrency".into(),
                reason: "must be at least 1".into(),
            });
        }

        if let Some(group) = self
            .report
            .production_groups
            .iter()
            .find(|g| g.id.trim().is_empty())
        {
            return Err(ConfigError::Validation {
                field: "report.production_groups".into(),
                reason: format!("group {:?} has an empty id", group.name),
            });
        }

        Ok(())
    }

    /// Transport settings derived from `[api]`.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(Duration::from_secs(self.api.timeout))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve which file to load.
///
/// An explicit path wins. Otherwise `./apikeys.toml` if it exists, then the
/// platform config dir (`~/.config/ncm/config.toml` on Linux). When nothing
/// exists the local file name is returned so the error names it.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return local;
    }

    ProjectDirs::from("com", "ncm", "ncm")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .filter(|p| p.is_file())
        .unwrap_or(local)
}

// ── Config loading ──────────────────────────────────────────────────

/// Load and validate the config at `path`, with `NCM_*` env overrides.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let config: Config = Figment::from(Serialized::defaults(file_values(path)?))
        .merge(
            Env::prefixed(ENV_PREFIX)
                .split("__")
                .map(|key| normalize_env_key(key.as_str()).into()),
        )
        .extract()?;

    config.validate()?;
    Ok(config)
}

/// The file's values with section and credential names normalised.
fn file_values(path: &Path) -> Result<Dict, ConfigError> {
    let profiles = Toml::file(path).data()?;
    Ok(profiles
        .into_values()
        .flatten()
        .map(|(section, value)| {
            let section = section.to_ascii_lowercase();
            let value = match value {
                Value::Dict(tag, entries) if section == KEYS_SECTION => Value::Dict(
                    tag,
                    entries
                        .into_iter()
                        .map(|(name, v)| (credential_name(&name), v))
                        .collect(),
                ),
                other => other,
            };
            (section, value)
        })
        .collect())
}

/// `keys.X_CP_API_ID` → `keys.x-cp-api-id`; other keys are only lowercased.
fn normalize_env_key(key: &str) -> String {
    match key.split_once('.') {
        Some((section, name)) if section.eq_ignore_ascii_case(KEYS_SECTION) => {
            format!("{KEYS_SECTION}.{}", credential_name(name))
        }
        _ => key.to_ascii_lowercase(),
    }
}

fn credential_name(name: &str) -> String {
    name.to_ascii_lowercase().replace('_', "-")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;

    use super::*;

    const KEYS: &str = r#"
[keys]
x-cp-api-id = "cp-id"
x-cp-api-key = "cp-key"
x-ecm-api-id = "ecm-id"
x-ecm-api-key = "ecm-key"
"#;

    /// Load `apikeys.toml` from the jail's working directory.
    fn load(jail: &mut Jail, contents: &str) -> Result<Config, ConfigError> {
        jail.create_file(LOCAL_CONFIG_FILE, contents).unwrap();
        load_config(Path::new(LOCAL_CONFIG_FILE))
    }

    #[test]
    fn keys_only_file_gets_defaults() {
        Jail::expect_with(|jail| {
            let config = load(jail, KEYS).unwrap();

            assert_eq!(config.keys.cp_api_id, "cp-id");
            assert_eq!(config.keys.ecm_api_key, "ecm-key");
            assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.api.timeout, 30);
            assert_eq!(config.report.output, PathBuf::from("results.csv"));
            assert_eq!(config.report.lookback_days, 1);
            assert_eq!(config.report.min_uptime_secs, 604_800);
            assert_eq!(config.report.production_groups.len(), 8);
            Ok(())
        });
    }

    #[test]
    fn uppercase_section_and_underscore_names_are_accepted() {
        Jail::expect_with(|jail| {
            let contents = KEYS
                .replace("[keys]", "[KEYS]")
                .replace("x-ecm-api-id", "X_ECM_API_ID");
            let config = load(jail, &contents).unwrap();
            assert_eq!(config.keys.ecm_api_id, "ecm-id");
            assert_eq!(config.keys.cp_api_key, "cp-key");
            Ok(())
        });
    }

    #[test]
    fn report_settings_override_defaults() {
        Jail::expect_with(|jail| {
            let config = load(
                jail,
                &format!(
                    "{KEYS}
[api]
base_url = \"http://127.0.0.1:9000/api/v2/\"
timeout = 5

[report]
output = \"out/stale.csv\"
concurrency = 4

[[report.production_groups]]
id = \"42\"
name = \"LAB\"
"
                ),
            )
            .unwrap();
            let options = config.report.to_options();

            assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api/v2/");
            assert_eq!(config.transport().timeout, Duration::from_secs(5));
            assert_eq!(config.report.output, PathBuf::from("out/stale.csv"));
            assert_eq!(options.concurrency, 4);
            assert_eq!(options.production_groups, vec![ProductionGroup::new("42", "LAB")]);
            Ok(())
        });
    }

    // ── Environment overrides ───────────────────────────────────────

    #[test]
    fn env_replaces_key_present_in_file() {
        Jail::expect_with(|jail| {
            jail.set_env("NCM_KEYS__X_CP_API_ID", "from-env");

            let config = load(jail, KEYS).unwrap();

            assert_eq!(config.keys.cp_api_id, "from-env");
            assert_eq!(config.keys.cp_api_key, "cp-key");
            Ok(())
        });
    }

    #[test]
    fn env_supplies_key_missing_from_file() {
        Jail::expect_with(|jail| {
            jail.set_env("NCM_KEYS__X_ECM_API_KEY", "ecm-from-env");
            let contents = KEYS.replace("x-ecm-api-key = \"ecm-key\"\n", "");

            let config = load(jail, &contents).unwrap();

            assert_eq!(config.keys.ecm_api_key, "ecm-from-env");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_uppercase_section() {
        Jail::expect_with(|jail| {
            jail.set_env("NCM_KEYS__X_ECM_API_KEY", "ecm-from-env");

            let config = load(jail, &KEYS.replace("[keys]", "[KEYS]")).unwrap();

            assert_eq!(config.keys.ecm_api_key, "ecm-from-env");
            assert_eq!(config.keys.cp_api_id, "cp-id");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_report_settings() {
        Jail::expect_with(|jail| {
            jail.set_env("NCM_REPORT__LOOKBACK_DAYS", "3");
            jail.set_env("NCM_API__BASE_URL", "http://127.0.0.1:9000/api/v2/");

            let config = load(jail, KEYS).unwrap();

            assert_eq!(config.report.lookback_days, 3);
            assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api/v2/");
            Ok(())
        });
    }

    #[test]
    fn env_key_names_are_normalised() {
        assert_eq!(normalize_env_key("keys.x_cp_api_id"), "keys.x-cp-api-id");
        assert_eq!(normalize_env_key("KEYS.X_ECM_API_KEY"), "keys.x-ecm-api-key");
        assert_eq!(normalize_env_key("report.min_uptime_secs"), "report.min_uptime_secs");
        assert_eq!(normalize_env_key("timeout"), "timeout");
    }

    // ── Failures ────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_not_found() {
        Jail::expect_with(|_jail| {
            let err = load_config(Path::new(LOCAL_CONFIG_FILE)).unwrap_err();
            assert!(matches!(err, ConfigError::NotFound { .. }), "got {err:?}");
            Ok(())
        });
    }

    #[test]
    fn missing_key_is_fatal() {
        Jail::expect_with(|jail| {
            let contents = KEYS.replace("x-ecm-api-key = \"ecm-key\"\n", "");

            let err = load(jail, &contents).unwrap_err();

            assert!(matches!(err, ConfigError::Figment(_)), "got {err:?}");
            assert!(err.to_string().contains("x-ecm-api-key"), "got {err}");
            Ok(())
        });
    }

    #[test]
    fn blank_key_fails_validation() {
        Jail::expect_with(|jail| {
            let err = load(jail, &KEYS.replace("\"cp-key\"", "\"  \"")).unwrap_err();

            match err {
                ConfigError::Validation { field, .. } => assert_eq!(field, "keys.x-cp-api-key"),
                other => panic!("expected Validation, got {other:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn zero_concurrency_fails_validation() {
        Jail::expect_with(|jail| {
            let err = load(jail, &format!("{KEYS}\n[report]\nconcurrency = 0\n")).unwrap_err();
            assert!(err.to_string().contains("report.concurrency"), "got {err}");
            Ok(())
        });
    }

    #[test]
    fn debug_output_redacts_keys() {
        Jail::expect_with(|jail| {
            let config = load(jail, KEYS).unwrap();
            let debug = format!("{config:?}");
            assert!(!debug.contains("cp-key"), "{debug}");
            assert!(debug.contains("[REDACTED]"));
            Ok(())
        });
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/etc/ncm/custom.toml");
        assert_eq!(resolve_config_path(Some(path)), path);
    }
}
