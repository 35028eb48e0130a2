use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    domain::IncomeScenario,
    errors::BudgetError,
    utils::{
        files::{ensure_dir, write_atomic},
        DEFAULT_LOG_FILTER,
    },
};

const APP_DIR_NAME: &str = "tiered_budget";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR: &str = "data";

/// User preferences for the budget core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory for the file-backed store. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
    /// Refresh the current month's snapshot after every mutation.
    #[serde(default)]
    pub snapshot_on_change: bool,
    /// Scenario used to turn income sources into the budget income figure;
    /// when unset the suggested scenario is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_scenario: Option<IncomeScenario>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_filter: Self::default_log_filter(),
            snapshot_on_change: false,
            income_scenario: None,
        }
    }
}

impl Config {
    pub fn default_log_filter() -> String {
        DEFAULT_LOG_FILTER.into()
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        app_base_dir().join(DATA_DIR)
    }
}

fn app_base_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, BudgetError> {
        Self::with_base_dir(app_base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, BudgetError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, BudgetError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), BudgetError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }
}
