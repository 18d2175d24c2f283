//! Core data models for Finboard
//!
//! This module contains the record types served by the entity services:
//! accounts, transactions, budgets, goals and alerts, plus the value types
//! they share.

pub mod account;
pub mod alert;
pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountPatch, AccountType, NewAccount};
pub use alert::{Alert, AlertPatch, AlertType, NewAlert, Priority};
pub use budget::{Budget, BudgetPatch, BudgetPeriod, BudgetStatus, NewBudget};
pub use category::Category;
pub use goal::{Goal, GoalPatch, GoalType, NewGoal};
pub use ids::{AccountId, AlertId, GoalId, TransactionId};
pub use money::Money;
pub use transaction::{NewTransaction, Transaction, TransactionKind, TransactionPatch};

use std::fmt;

use serde::Serialize;

use crate::audit::EntityType;
use crate::error::FinboardResult;

/// A record type held in a store collection and served by an entity service
///
/// Each entity names its key, the draft it is created from and the patch it
/// is updated with. Construction and patching validate the result, so a
/// stored record is always valid.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    type Key: Copy + PartialEq + fmt::Display + Send + Sync;
    type Draft: Send + Sync;
    type Patch: Send + Sync;

    const KIND: EntityType;

    fn key(&self) -> Self::Key;

    /// The sequence number behind a synthetic id, if the entity has one
    fn sequence(&self) -> Option<u64> {
        None
    }

    /// Human-readable name used in audit entries
    fn label(&self) -> String;

    /// Fail with `Validation` if the record breaks a model rule
    fn check(&self) -> FinboardResult<()>;

    /// Build a new record. `sequence` is the next free id in the collection.
    fn from_draft(draft: &Self::Draft, sequence: u64) -> FinboardResult<Self>;

    /// Overwrite the fields present in `patch`. On error the record is left
    /// unchanged.
    fn apply_patch(&mut self, patch: &Self::Patch) -> FinboardResult<()>;
}
