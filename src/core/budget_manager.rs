use tracing::{debug, info};

use super::services::{
    AllocationService, GapMessage, GapService, IncomeService, MigrationOutcome, MigrationService,
    SnapshotService,
};
use super::time::{Clock, SystemClock};
use crate::config::Config;
use crate::domain::common::find_by_id;
use crate::domain::{
    BudgetSnapshot, BudgetTotals, ExpenseCategory, ExpenseItem, IncomeScenarios, IncomeSource,
    SnapshotComparison, Tier, TierId,
};
use crate::errors::BudgetError;
use crate::storage::{BudgetRepository, FileStore, KeyValueStore};
use crate::utils::input::sanitize_amount;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Single owner of the session's budget state.
///
/// Every mutation re-derives affordability for the whole tier list and persists it
/// before returning, so stored tiers never lag behind income or expense edits.
pub struct BudgetManager {
    repository: BudgetRepository,
    clock: Box<dyn Clock>,
    config: Config,
    income: u64,
    income_sources: Vec<IncomeSource>,
    tiers: Vec<Tier>,
    history: Vec<BudgetSnapshot>,
}

impl BudgetManager {
    /// Loads state from `store`, migrating a legacy budget blob first if one is present,
    /// and records this month's snapshot when one is due.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        config: Config,
    ) -> Result<Self> {
        let repository = BudgetRepository::new(store);
        Self::migrate_stored_document(&repository, clock.as_ref())?;

        let income_sources = repository.load_income_sources();
        let income = Self::current_income(&repository, &income_sources, clock.as_ref(), &config)?;
        let tiers = AllocationService::allocate(income, &repository.load_tiers());
        let mut manager = Self {
            income_sources,
            history: repository.load_history(),
            repository,
            clock,
            config,
            income,
            tiers,
        };
        manager.record_snapshot_if_due()?;
        Ok(manager)
    }

    /// Opens the file-backed store under the configured data directory.
    pub fn open_default(config: Config) -> Result<Self> {
        let store = FileStore::new(config.resolve_data_dir())?;
        Self::open(Box::new(store), Box::new(SystemClock), config)
    }

    /// Income for today. When income sources are stored they are authoritative and the
    /// figure is derived again, since their active windows may have opened or closed
    /// since the last save.
    fn current_income(
        repository: &BudgetRepository,
        sources: &[IncomeSource],
        clock: &dyn Clock,
        config: &Config,
    ) -> Result<u64> {
        let stored = repository.load_income();
        if sources.is_empty() {
            return Ok(stored);
        }
        let derived = IncomeService::budget_income(sources, clock.today(), config.income_scenario);
        if derived != stored {
            info!(stored, derived, "income sources changed the budget income");
            repository.save_income(derived)?;
        }
        Ok(derived)
    }

    /// Converts a legacy budget blob exactly once: the derived keys are written first
    /// and the blob is rewritten with its `version` last, so an interrupted run is
    /// simply repeated on the next open.
    fn migrate_stored_document(repository: &BudgetRepository, clock: &dyn Clock) -> Result<()> {
        let Some(value) = repository.load_document_value() else {
            return Ok(());
        };
        match MigrationService::migrate_value(&value, clock.now()) {
            MigrationOutcome::Migrated(document) => {
                let income = document.income();
                let tiers = AllocationService::allocate(income, &document.tiers());
                repository.save_income(income)?;
                repository.save_income_sources(&document.income_sources)?;
                repository.save_tiers(&tiers)?;
                repository.save_document(&document)?;
                info!(income, "legacy budget migrated to version {}", document.version);
            }
            MigrationOutcome::Current(document) => {
                debug!(version = document.version, "budget document already migrated");
            }
            MigrationOutcome::Unrecognized => {
                debug!("stored budget document has an unknown shape; ignoring it");
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn income(&self) -> u64 {
        self.income
    }

    pub fn income_sources(&self) -> &[IncomeSource] {
        &self.income_sources
    }

    /// Tiers in priority order with current affordability.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn tier(&self, id: TierId) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.id == id)
    }

    pub fn expense(&self, id: &str) -> Option<(TierId, &ExpenseItem)> {
        self.tiers
            .iter()
            .find_map(|tier| find_by_id(&tier.expenses, id).map(|item| (tier.id, item)))
    }

    pub fn totals(&self) -> BudgetTotals {
        AllocationService::totals(self.income, &self.tiers)
    }

    /// Framing for the money left after essentials.
    pub fn gap_message(&self) -> GapMessage {
        let totals = self.totals();
        let income = i64::try_from(self.income).unwrap_or(i64::MAX);
        GapService::classify(totals.flexible_money, income)
    }

    pub fn income_scenarios(&self) -> IncomeScenarios {
        IncomeService::monthly_income(&self.income_sources, self.clock.today())
    }

    /// Snapshot history, newest first.
    pub fn history(&self) -> &[BudgetSnapshot] {
        &self.history
    }

    /// Change between the two most recent snapshots.
    pub fn latest_comparison(&self) -> Option<SnapshotComparison> {
        let current = self.history.first()?;
        Some(SnapshotService::compare_snapshots(current, self.history.get(1)))
    }

    /// Sets income from raw user text; see [`sanitize_amount`].
    pub fn set_income(&mut self, raw: &str) -> Result<u64> {
        let income = sanitize_amount(raw);
        self.set_income_amount(income)?;
        Ok(income)
    }

    /// Sets a manual income figure. Any stored income sources are dropped so they
    /// cannot override the figure on the next open.
    pub fn set_income_amount(&mut self, income: u64) -> Result<()> {
        if !self.income_sources.is_empty() {
            self.repository.save_income_sources(&[])?;
            self.income_sources.clear();
            debug!("manual income replaces income sources");
        }
        self.apply_income(income)
    }

    /// Replaces the income sources and derives the income figure from them using the
    /// configured scenario, or the suggested one.
    pub fn set_income_sources(&mut self, sources: Vec<IncomeSource>) -> Result<u64> {
        let scenario = self.config.income_scenario;
        let income = IncomeService::budget_income(&sources, self.clock.today(), scenario);
        self.repository.save_income_sources(&sources)?;
        self.income_sources = sources;
        self.apply_income(income)?;
        Ok(income)
    }

    /// Adds an expense from raw user input and returns its id.
    pub fn add_expense(&mut self, tier: TierId, name: &str, raw_amount: &str) -> Result<String> {
        let item = ExpenseItem::new(name.trim(), sanitize_amount(raw_amount));
        self.add_expense_item(tier, item)
    }

    pub fn add_expense_item(&mut self, tier: TierId, item: ExpenseItem) -> Result<String> {
        item.validate()?;
        if self.expense(&item.id).is_some() {
            return Err(BudgetError::Validation(format!(
                "an expense with id `{}` already exists",
                item.id
            )));
        }
        let id = item.id.clone();
        self.tier_mut(tier)?.expenses.push(item);
        self.commit_tiers()?;
        Ok(id)
    }

    pub fn update_expense_amount(&mut self, id: &str, raw_amount: &str) -> Result<u64> {
        let amount = sanitize_amount(raw_amount);
        self.set_expense_amount(id, amount)?;
        Ok(amount)
    }

    pub fn set_expense_amount(&mut self, id: &str, amount: u64) -> Result<()> {
        self.expense_mut(id)?.amount = amount;
        self.commit_tiers()
    }

    pub fn set_expense_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        self.expense_mut(id)?.enabled = enabled;
        self.commit_tiers()
    }

    /// Flips the enabled flag and returns the new value.
    pub fn toggle_expense(&mut self, id: &str) -> Result<bool> {
        let item = self.expense_mut(id)?;
        item.enabled = !item.enabled;
        let enabled = item.enabled;
        self.commit_tiers()?;
        Ok(enabled)
    }

    pub fn rename_expense(&mut self, id: &str, name: &str) -> Result<()> {
        let mut updated = self.expense_mut(id)?.clone();
        updated.name = name.trim().to_string();
        self.replace_validated(updated)
    }

    pub fn set_expense_category(
        &mut self,
        id: &str,
        category: Option<ExpenseCategory>,
        savings_goal_id: Option<String>,
    ) -> Result<()> {
        let mut updated = self.expense_mut(id)?.clone();
        updated.category = category;
        updated.savings_goal_id = savings_goal_id;
        self.replace_validated(updated)
    }

    pub fn move_expense(&mut self, id: &str, to: TierId) -> Result<()> {
        let (from, _) = self
            .expense(id)
            .ok_or_else(|| BudgetError::ExpenseNotFound(id.to_string()))?;
        if from == to {
            return Ok(());
        }
        let item = self.take_expense(id)?;
        self.tier_mut(to)?.expenses.push(item);
        self.commit_tiers()
    }

    pub fn remove_expense(&mut self, id: &str) -> Result<ExpenseItem> {
        let item = self.take_expense(id)?;
        self.commit_tiers()?;
        Ok(item)
    }

    /// Records this month's snapshot if none exists for it yet.
    pub fn record_snapshot_if_due(&mut self) -> Result<Option<BudgetSnapshot>> {
        let last = self.repository.last_snapshot_month();
        if !SnapshotService::should_create_snapshot(last.as_deref(), self.clock.today()) {
            return Ok(None);
        }
        self.refresh_snapshot().map(Some)
    }

    /// Records (or replaces) the current month's snapshot from the live state.
    pub fn refresh_snapshot(&mut self) -> Result<BudgetSnapshot> {
        let snapshot =
            SnapshotService::create_snapshot(self.income, &self.tiers, self.clock.as_ref());
        let history = std::mem::take(&mut self.history);
        self.history = SnapshotService::add_snapshot(snapshot.clone(), history);
        self.repository.save_history(&self.history)?;
        self.repository.save_last_snapshot_month(&snapshot.date)?;
        info!(month = %snapshot.date, entries = self.history.len(), "recorded budget snapshot");
        Ok(snapshot)
    }

    fn apply_income(&mut self, income: u64) -> Result<()> {
        self.income = income;
        self.repository.save_income(income)?;
        self.commit_tiers()
    }

    fn commit_tiers(&mut self) -> Result<()> {
        self.tiers = AllocationService::allocate(self.income, &self.tiers);
        self.repository.save_tiers(&self.tiers)?;
        if self.config.snapshot_on_change {
            self.refresh_snapshot()?;
        }
        Ok(())
    }

    fn tier_mut(&mut self, id: TierId) -> Result<&mut Tier> {
        self.tiers
            .iter_mut()
            .find(|tier| tier.id == id)
            .ok_or(BudgetError::TierNotFound(id.as_u8()))
    }

    fn expense_mut(&mut self, id: &str) -> Result<&mut ExpenseItem> {
        self.tiers
            .iter_mut()
            .flat_map(|tier| tier.expenses.iter_mut())
            .find(|item| item.id == id)
            .ok_or_else(|| BudgetError::ExpenseNotFound(id.to_string()))
    }

    fn take_expense(&mut self, id: &str) -> Result<ExpenseItem> {
        for tier in &mut self.tiers {
            if let Some(index) = tier.expenses.iter().position(|item| item.id == id) {
                return Ok(tier.expenses.remove(index));
            }
        }
        Err(BudgetError::ExpenseNotFound(id.to_string()))
    }

    fn replace_validated(&mut self, updated: ExpenseItem) -> Result<()> {
        updated.validate()?;
        let slot = self.expense_mut(&updated.id)?;
        *slot = updated;
        self.commit_tiers()
    }
}
