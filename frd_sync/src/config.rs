//! TOML configuration for the sync binary.
//!
//! On-disk layout:
//!
//! ```toml
//! userid = "frd_u_123"
//! work_dir = "/var/lib/frd"
//! database_url = "frd.db"
//! ```
//!
//! `userid` and `database_url` may be omitted and supplied through the
//! `FRD_USERID` / `DATABASE_URL` environment variables instead.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared_utils::env::get_env_var;

/// Environment variable consulted when `database_url` is absent.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Settings for one sync deployment.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Caller identifier; falls back to the `FRD_USERID` environment variable.
    pub userid: Option<String>,

    /// Base URL of the remote API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Root directory downloaded archives are extracted under.
    pub work_dir: PathBuf,

    /// SQLite database path; falls back to the `DATABASE_URL` environment
    /// variable.
    pub database_url: Option<String>,
}

fn default_base_url() -> String {
    frd_client::client::BASE_URL.to_string()
}

impl SyncConfig {
    /// The caller identifier, from the file or the environment.
    pub fn resolve_userid(&self) -> anyhow::Result<String> {
        match &self.userid {
            Some(id) => Ok(id.clone()),
            None => Ok(get_env_var(frd_client::client::USERID_VAR)?),
        }
    }

    /// The database location, from the file or the environment.
    pub fn resolve_database_url(&self) -> anyhow::Result<String> {
        match &self.database_url {
            Some(url) => Ok(url.clone()),
            None => Ok(get_env_var(DATABASE_URL_VAR)?),
        }
    }
}

/// Parse a configuration from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<SyncConfig> {
    toml::from_str(toml_str).context("failed to parse sync config TOML")
}

/// Read and parse a configuration file from disk.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<SyncConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_config() {
        let cfg = load_config_str(
            r#"
            userid = "frd_u_123"
            work_dir = "/var/lib/frd"
            database_url = "frd.db"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.resolve_userid().unwrap(), "frd_u_123");
        assert_eq!(cfg.resolve_database_url().unwrap(), "frd.db");
        assert_eq!(cfg.base_url, frd_client::client::BASE_URL);
        assert_eq!(cfg.work_dir, std::path::Path::new("/var/lib/frd"));
    }

    #[test]
    fn base_url_can_be_overridden() {
        let cfg = load_config_str(
            r#"
            base_url = "http://localhost:8080/api"
            work_dir = "/tmp/frd"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = load_config_str("work_dir = \"/tmp\"\nuser = \"nope\"\n").unwrap_err();
        assert!(err.to_string().contains("parse sync config"));
    }
}
