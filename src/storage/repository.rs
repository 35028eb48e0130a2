//! Typed access to the budget keys. Reads never fail: a missing, unreadable or
//! malformed value falls back to its documented default.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    KeyValueStore, Result, BUDGET_DOCUMENT_KEY, INCOME_KEY, INCOME_SOURCES_KEY,
    LAST_SNAPSHOT_MONTH_KEY, SNAPSHOT_HISTORY_KEY, TIERS_KEY,
};
use crate::core::services::MAX_SNAPSHOT_HISTORY;
use crate::domain::{BudgetDocument, BudgetSnapshot, IncomeSource, Tier, TierId};
use crate::utils::input::{clamp_amount, whole_dollars};

pub struct BudgetRepository {
    store: Box<dyn KeyValueStore>,
}

impl BudgetRepository {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Monthly income figure; `0` when absent or unparseable.
    pub fn load_income(&self) -> u64 {
        let Some(raw) = self.read(INCOME_KEY) else {
            return 0;
        };
        let raw = raw.trim();
        if let Ok(value) = raw.parse::<i64>() {
            return clamp_amount(value);
        }
        match raw.parse::<f64>() {
            Ok(value) => whole_dollars(value),
            Err(err) => {
                debug!(key = INCOME_KEY, error = %err, "stored income is malformed; using 0");
                0
            }
        }
    }

    pub fn save_income(&self, income: u64) -> Result<()> {
        self.store.set(INCOME_KEY, &income.to_string())
    }

    /// Tier list normalised to exactly the four tiers in id order. Missing tiers are
    /// filled with empty defaults; duplicates keep their first occurrence.
    pub fn load_tiers(&self) -> Vec<Tier> {
        let stored: Vec<Tier> = self.read_json(TIERS_KEY).unwrap_or_default();
        normalize_tiers(stored)
    }

    pub fn save_tiers(&self, tiers: &[Tier]) -> Result<()> {
        self.write_json(TIERS_KEY, &tiers)
    }

    pub fn load_income_sources(&self) -> Vec<IncomeSource> {
        self.read_json(INCOME_SOURCES_KEY).unwrap_or_default()
    }

    pub fn save_income_sources(&self, sources: &[IncomeSource]) -> Result<()> {
        self.write_json(INCOME_SOURCES_KEY, &sources)
    }

    /// Snapshot history, newest first and capped.
    pub fn load_history(&self) -> Vec<BudgetSnapshot> {
        let mut history: Vec<BudgetSnapshot> =
            self.read_json(SNAPSHOT_HISTORY_KEY).unwrap_or_default();
        history.sort_by_key(|entry| Reverse(entry.timestamp));
        history.truncate(MAX_SNAPSHOT_HISTORY);
        history
    }

    pub fn save_history(&self, history: &[BudgetSnapshot]) -> Result<()> {
        self.write_json(SNAPSHOT_HISTORY_KEY, &history)
    }

    /// Month of the last recorded snapshot, if the marker holds a valid `YYYY-MM`.
    pub fn last_snapshot_month(&self) -> Option<String> {
        let raw = self.read(LAST_SNAPSHOT_MONTH_KEY)?;
        let month = raw.trim();
        let valid = month.len() == 7
            && NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok();
        if valid {
            Some(month.to_string())
        } else {
            debug!(
                key = LAST_SNAPSHOT_MONTH_KEY,
                value = month,
                "ignoring malformed month marker"
            );
            None
        }
    }

    pub fn save_last_snapshot_month(&self, month: &str) -> Result<()> {
        self.store.set(LAST_SNAPSHOT_MONTH_KEY, month)
    }

    /// Raw budget blob, if present and valid JSON.
    pub fn load_document_value(&self) -> Option<Value> {
        self.read_json(BUDGET_DOCUMENT_KEY)
    }

    pub fn save_document(&self, document: &BudgetDocument) -> Result<()> {
        self.write_json(BUDGET_DOCUMENT_KEY, document)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "failed to read stored value; using default");
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(key, error = %err, "stored JSON is malformed; using default");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }
}

fn normalize_tiers(stored: Vec<Tier>) -> Vec<Tier> {
    let mut tiers: Vec<Tier> = Vec::with_capacity(TierId::ALL.len());
    for id in TierId::ALL {
        let tier = stored
            .iter()
            .find(|tier| tier.id == id)
            .cloned()
            .unwrap_or_else(|| Tier::new(id));
        tiers.push(tier);
    }
    tiers
}
