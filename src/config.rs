use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use config::{Config, Environment};
use serde::Deserialize;

use crate::parser::extract::FieldPolicy;

/// Listing page read when no input is given.
pub const DEFAULT_INPUT: &str = "./boston_mpo.html";

const DEFAULT_BASE_URL: &str = "http://www.mhd.state.ma.us/ProjectInfo/";
const DEFAULT_USER_AGENT: &str = concat!("projis_dump/", env!("CARGO_PKG_VERSION"));

/// Settings read from `PROJIS_*` environment variables. Command-line flags
/// override them.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base for relative detail links.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub isolate_fields: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Settings {
    pub fn load() -> Result<Self> {
        let cfg = Config::builder()
            .add_source(Environment::with_prefix("PROJIS").try_parsing(true))
            .build()
            .context("Failed to read PROJIS_* environment")?;
        Self::from_config(cfg)
    }

    fn from_config(cfg: Config) -> Result<Self> {
        cfg.try_deserialize()
            .context("Invalid PROJIS_* configuration")
    }

    pub fn policy(&self) -> FieldPolicy {
        if self.isolate_fields {
            FieldPolicy::Isolated
        } else {
            FieldPolicy::WholeRecord
        }
    }
}

/// `./projis_dump_<month>_<day>_<year>.csv`, month and day not padded.
pub fn default_output(today: NaiveDate) -> PathBuf {
    PathBuf::from(format!(
        "./projis_dump_{}_{}_{}.csv",
        today.month(),
        today.day(),
        today.year()
    ))
}
