//! Service layer for Finboard
//!
//! One [`EntityService`] per entity type wraps that type's collection in the
//! store. Every call awaits a simulated latency, returns copies of records,
//! and records mutations in the audit log. Entity-specific operations live
//! in the submodules as extra `impl` blocks on the matching service alias.

pub mod account;
pub mod alert;
pub mod budget;
pub mod goal;
pub mod latency;
pub mod transaction;

pub use latency::{CallKind, Latency};

use std::marker::PhantomData;

use tracing::{debug, info, warn};

use crate::audit::AuditEntry;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{Account, Alert, Budget, Goal, Transaction};
use crate::storage::{Collection, Storage, Stored};

pub type AccountService<'a> = EntityService<'a, Account>;
pub type TransactionService<'a> = EntityService<'a, Transaction>;
pub type BudgetService<'a> = EntityService<'a, Budget>;
pub type GoalService<'a> = EntityService<'a, Goal>;
pub type AlertService<'a> = EntityService<'a, Alert>;

/// Asynchronous CRUD access to one entity collection
pub struct EntityService<'a, T: Stored> {
    storage: &'a Storage,
    latency: Latency,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Stored> EntityService<'a, T> {
    pub fn new(storage: &'a Storage, latency: Latency) -> Self {
        Self {
            storage,
            latency,
            _entity: PhantomData,
        }
    }

    fn collection(&self) -> &'a Collection<T> {
        T::collection(self.storage)
    }

    fn not_found(key: T::Key) -> FinboardError {
        FinboardError::NotFound {
            entity_type: T::KIND.name(),
            identifier: key.to_string(),
        }
    }

    /// Stored records with their derived fields filled in
    fn current(&self) -> FinboardResult<Vec<T>> {
        let mut records = self.collection().get_all()?;
        T::derive(&mut records, self.storage)?;
        Ok(records)
    }

    fn derived(&self, mut record: T) -> FinboardResult<T> {
        T::derive(std::slice::from_mut(&mut record), self.storage)?;
        Ok(record)
    }

    /// Every record, in insertion order
    pub async fn get_all(&self) -> FinboardResult<Vec<T>> {
        self.latency.simulate(CallKind::List).await;
        let records = self.current()?;
        debug!(entity = %T::KIND, count = records.len(), "get_all");
        Ok(records)
    }

    /// The record with `key`, or `None` if there is none
    pub async fn get_by_id(&self, key: T::Key) -> FinboardResult<Option<T>> {
        self.latency.simulate(CallKind::Fetch).await;
        let record = self
            .collection()
            .get(key)?
            .map(|record| self.derived(record))
            .transpose()?;
        debug!(entity = %T::KIND, id = %key, found = record.is_some(), "get_by_id");
        Ok(record)
    }

    /// Build a record from `draft`, store it and return a copy
    ///
    /// The audit entry is written before the record is stored; if that
    /// fails the store is unchanged.
    pub async fn create(&self, draft: &T::Draft) -> FinboardResult<T> {
        self.latency.simulate(CallKind::Create).await;
        let record = self.collection().insert_with(draft, |record| {
            let record = self.derived(record.clone())?;
            self.storage.audit.log(AuditEntry::created(&record))
        })?;
        info!(entity = %T::KIND, id = %record.key(), "created");
        self.derived(record)
    }

    /// Overwrite the fields present in `patch`
    ///
    /// Fails with `NotFound` when no record has `key`; the store is then
    /// unchanged.
    pub async fn update(&self, key: T::Key, patch: &T::Patch) -> FinboardResult<T> {
        self.latency.simulate(CallKind::Update).await;
        self.apply(key, |record| record.apply_patch(patch))
    }

    /// Remove the record with `key`, returning it
    pub async fn delete(&self, key: T::Key) -> FinboardResult<T> {
        self.latency.simulate(CallKind::Delete).await;
        let removed = self.collection().remove_with(key, |record| {
            let record = self.derived(record.clone())?;
            self.storage.audit.log(AuditEntry::deleted(&record))
        })?;
        match removed {
            Some(record) => {
                info!(entity = %T::KIND, id = %key, "deleted");
                self.derived(record)
            }
            None => {
                warn!(entity = %T::KIND, id = %key, "delete of missing record");
                Err(Self::not_found(key))
            }
        }
    }

    /// Apply an audited change to one record
    fn apply<F>(&self, key: T::Key, change: F) -> FinboardResult<T>
    where
        F: FnOnce(&mut T) -> FinboardResult<()>,
    {
        let changed = self.collection().modify_with(key, change, |before, after| {
            let before = self.derived(before.clone())?;
            let after = self.derived(after.clone())?;
            self.storage.audit.log(AuditEntry::updated(&before, &after))
        })?;
        match changed {
            Some((_, after)) => {
                info!(entity = %T::KIND, id = %key, "updated");
                self.derived(after)
            }
            None => {
                warn!(entity = %T::KIND, id = %key, "update of missing record");
                Err(Self::not_found(key))
            }
        }
    }
}

/// A store paired with the latency its services simulate
#[derive(Debug)]
pub struct Backend {
    storage: Storage,
    latency: Latency,
}

impl Backend {
    pub fn new(storage: Storage, latency: Latency) -> Self {
        Self { storage, latency }
    }

    /// Built-in seed with no latency
    pub fn seeded() -> FinboardResult<Self> {
        Ok(Self::new(Storage::seeded()?, Latency::none()))
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    pub fn accounts(&self) -> AccountService<'_> {
        EntityService::new(&self.storage, self.latency)
    }

    pub fn transactions(&self) -> TransactionService<'_> {
        EntityService::new(&self.storage, self.latency)
    }

    pub fn budgets(&self) -> BudgetService<'_> {
        EntityService::new(&self.storage, self.latency)
    }

    pub fn goals(&self) -> GoalService<'_> {
        EntityService::new(&self.storage, self.latency)
    }

    pub fn alerts(&self) -> AlertService<'_> {
        EntityService::new(&self.storage, self.latency)
    }

    /// Put the store back to its seed
    pub fn reset(&self) -> FinboardResult<()> {
        self.storage.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::models::{
        AccountId, AccountPatch, AccountType, AlertType, Category, Money, NewAccount, NewAlert,
        NewTransaction, Priority, TransactionKind,
    };
    use tempfile::TempDir;

    fn backend() -> Backend {
        Backend::seeded().unwrap()
    }

    #[tokio::test]
    async fn test_get_all_preserves_insertion_order() {
        let backend = backend();
        let accounts = backend.accounts().get_all().await.unwrap();
        let ids: Vec<u64> = accounts.iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let backend = backend();
        let missing = backend.accounts().get_by_id(AccountId::new(99)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_net_effect_of_mutations() {
        let backend = backend();
        let service = backend.accounts();

        let a = service
            .create(&NewAccount::new("Travel", AccountType::Savings, Money::from_units(50)))
            .await
            .unwrap();
        let b = service
            .create(&NewAccount::new("Amex", AccountType::Credit, Money::from_units(10)))
            .await
            .unwrap();
        service
            .update(
                a.id,
                &AccountPatch {
                    balance: Some(Money::from_units(75)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        service.delete(AccountId::new(2)).await.unwrap();

        let all = service.get_all().await.unwrap();
        let ids: Vec<u64> = all.iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, a.id.value(), b.id.value()]);

        let travel = all.iter().find(|acc| acc.id == a.id).unwrap();
        assert_eq!(travel.balance, Money::from_units(75));
    }

    #[tokio::test]
    async fn test_update_missing_fails_and_leaves_store() {
        let backend = backend();
        let service = backend.accounts();
        let before = service.get_all().await.unwrap();

        let err = service
            .update(
                AccountId::new(404),
                &AccountPatch {
                    name: Some("Ghost".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(service.get_all().await.unwrap(), before);
        assert!(backend.storage().audit.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_fails() {
        let backend = backend();
        let err = backend.goals().delete(crate::models::GoalId::new(77)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Goal not found: goal-77");
    }

    #[tokio::test]
    async fn test_mutations_are_audited() {
        let backend = backend();
        let alert = backend
            .alerts()
            .create(&NewAlert::new(AlertType::Insight, Priority::Low, "Test"))
            .await
            .unwrap();
        backend.alerts().mark_as_read(alert.id).await.unwrap();
        backend.alerts().delete(alert.id).await.unwrap();

        let ops: Vec<Operation> = backend
            .storage()
            .audit
            .entries()
            .unwrap()
            .iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update, Operation::Delete]);
    }

    #[tokio::test]
    async fn test_failed_audit_write_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let audit = AuditLogger::with_file(dir.path().to_path_buf());
        let backend = Backend::new(Storage::seeded().unwrap().with_audit(audit), Latency::none());
        let service = backend.accounts();

        let draft = NewAccount::new("Travel", AccountType::Savings, Money::from_units(50));
        assert!(service.create(&draft).await.is_err());
        assert_eq!(service.get_all().await.unwrap().len(), 5);

        let patch = AccountPatch {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        assert!(service.update(AccountId::new(1), &patch).await.is_err());
        let first = service.get_by_id(AccountId::new(1)).await.unwrap().unwrap();
        assert_eq!(first.name, "Chase Checking");

        assert!(service.delete(AccountId::new(1)).await.is_err());
        assert!(service.get_by_id(AccountId::new(1)).await.unwrap().is_some());
        assert!(backend.storage().audit.is_empty());
    }

    #[tokio::test]
    async fn test_budget_spent_follows_transactions() {
        let backend = backend();
        let before = backend.budgets().get_total_spent().await.unwrap();

        let txn = backend
            .transactions()
            .create(&NewTransaction {
                account_id: AccountId::new(3),
                amount: Money::from_units(100),
                merchant: "Taqueria".into(),
                category: Category::Dining,
                kind: TransactionKind::Expense,
                date: None,
            })
            .await
            .unwrap();

        let after = backend.budgets().get_total_spent().await.unwrap();
        assert_eq!(after, before + Money::from_units(100));

        let dining = backend.budgets().get_by_category(Category::Dining).await.unwrap().unwrap();
        assert_eq!(dining.spent, Money::from_cents(1875 + 7640 + 6420 + 10_000));

        backend.transactions().delete(txn.id).await.unwrap();
        let budgets = backend.budgets().get_all().await.unwrap();
        let dining = budgets.iter().find(|b| b.category == Category::Dining).unwrap();
        assert_eq!(dining.spent, Money::from_cents(1875 + 7640 + 6420));
    }
}
