//! In-memory store for Finboard
//!
//! `Storage` owns one [`Collection`] per entity type plus the audit log. It
//! is built once from a [`Fixtures`] seed and handed to services by
//! reference; `reset` puts it back to the seed.

pub mod collection;
pub mod fixtures;

pub use collection::Collection;
pub use fixtures::Fixtures;

use tracing::debug;

use crate::audit::AuditLogger;
use crate::error::FinboardResult;
use crate::models::{Account, Alert, Budget, Entity, Goal, Transaction};
use crate::reports::metrics;

/// Owner of every entity collection
#[derive(Debug)]
pub struct Storage {
    pub accounts: Collection<Account>,
    pub transactions: Collection<Transaction>,
    pub budgets: Collection<Budget>,
    pub goals: Collection<Goal>,
    pub alerts: Collection<Alert>,
    pub audit: AuditLogger,
    seed: Fixtures,
}

impl Storage {
    /// Build a store from a seed
    ///
    /// A budget's stored `spent` is never read; see [`Stored::derive`].
    pub fn from_fixtures(fixtures: Fixtures) -> Self {
        let seed = fixtures.clone();
        let Fixtures {
            accounts,
            transactions,
            budgets,
            goals,
            alerts,
        } = fixtures;

        debug!(
            accounts = accounts.len(),
            transactions = transactions.len(),
            budgets = budgets.len(),
            goals = goals.len(),
            alerts = alerts.len(),
            "store seeded"
        );

        Self {
            accounts: Collection::new(accounts),
            transactions: Collection::new(transactions),
            budgets: Collection::new(budgets),
            goals: Collection::new(goals),
            alerts: Collection::new(alerts),
            audit: AuditLogger::in_memory(),
            seed,
        }
    }

    /// Store seeded with the built-in fixtures
    pub fn seeded() -> FinboardResult<Self> {
        Ok(Self::from_fixtures(Fixtures::builtin()?))
    }

    /// Store with no records
    pub fn empty() -> Self {
        Self::from_fixtures(Fixtures::default())
    }

    /// Replace the audit logger (for example with a file-backed one)
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = audit;
        self
    }

    /// Restore every collection to the seed and clear the audit log
    pub fn reset(&self) -> FinboardResult<()> {
        self.accounts.reset(self.seed.accounts.clone())?;
        self.transactions.reset(self.seed.transactions.clone())?;
        self.budgets.reset(self.seed.budgets.clone())?;
        self.goals.reset(self.seed.goals.clone())?;
        self.alerts.reset(self.seed.alerts.clone())?;
        self.audit.clear()?;

        debug!("store reset to seed");
        Ok(())
    }

    /// The collection holding entity type `T`
    pub fn collection<T: Stored>(&self) -> &Collection<T> {
        T::collection(self)
    }
}

/// An entity with a home collection in [`Storage`]
pub trait Stored: Entity {
    fn collection(storage: &Storage) -> &Collection<Self>;

    /// Fill in fields computed from other collections before records leave
    /// the store
    fn derive(_records: &mut [Self], _storage: &Storage) -> FinboardResult<()> {
        Ok(())
    }
}

impl Stored for Account {
    fn collection(storage: &Storage) -> &Collection<Self> {
        &storage.accounts
    }
}

impl Stored for Transaction {
    fn collection(storage: &Storage) -> &Collection<Self> {
        &storage.transactions
    }
}

impl Stored for Budget {
    fn collection(storage: &Storage) -> &Collection<Self> {
        &storage.budgets
    }

    /// `spent` is the lifetime expense total of the budget's category
    fn derive(records: &mut [Self], storage: &Storage) -> FinboardResult<()> {
        let spending = metrics::category_spending(&storage.transactions.get_all()?);
        metrics::apply_category_spending(records, &spending);
        Ok(())
    }
}

impl Stored for Goal {
    fn collection(storage: &Storage) -> &Collection<Self> {
        &storage.goals
    }
}

impl Stored for Alert {
    fn collection(storage: &Storage) -> &Collection<Self> {
        &storage.alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Category, Money, NewAccount};

    #[test]
    fn test_budget_spent_is_derived_from_transactions() {
        let storage = Storage::seeded().unwrap();
        let mut budgets = storage.budgets.get_all().unwrap();
        Budget::derive(&mut budgets, &storage).unwrap();

        let dining = budgets.iter().find(|b| b.category == Category::Dining).unwrap();
        assert_eq!(dining.spent, Money::from_cents(1875 + 7640 + 6420));

        storage.transactions.reset(Vec::new()).unwrap();
        Budget::derive(&mut budgets, &storage).unwrap();
        assert!(budgets.iter().all(|b| b.spent.is_zero()));
    }

    #[test]
    fn test_reset_restores_seed() {
        let storage = Storage::seeded().unwrap();
        let draft = NewAccount::new("Extra", AccountType::Savings, Money::from_units(1));
        storage.accounts.insert(&draft).unwrap();
        storage.transactions.reset(Vec::new()).unwrap();

        storage.reset().unwrap();
        assert_eq!(storage.accounts.count().unwrap(), 5);
        assert_eq!(storage.transactions.count().unwrap(), 26);
        assert!(storage.audit.is_empty());
    }

    #[test]
    fn test_empty_store() {
        let storage = Storage::empty();
        assert_eq!(storage.collection::<Account>().count().unwrap(), 0);
        assert_eq!(storage.collection::<Alert>().count().unwrap(), 0);
    }
}
