//! Transaction model
//!
//! Represents income and expense transactions. The stored sign of `amount`
//! is derived from the transaction type every time the record is written:
//! income is positive, expenses are negative.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{AccountId, TransactionId};
use super::money::Money;
use super::Entity;
use crate::audit::EntityType;
use crate::error::{FinboardError, FinboardResult};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Apply this kind's sign convention to an amount of either sign
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount.abs(),
            Self::Expense => -amount.abs(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "inflow" => Some(Self::Income),
            "expense" | "outflow" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("Income"),
            Self::Expense => f.pad("Expense"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Signed amount (positive for income, negative for expenses)
    pub amount: Money,

    pub merchant: String,

    pub category: Category,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub date: NaiveDate,
}

impl Transaction {
    /// The unsigned amount used by every aggregation
    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Check whether the transaction falls in the same calendar month and
    /// year as `day`
    pub fn in_month_of(&self, day: NaiveDate) -> bool {
        self.date.year() == day.year() && self.date.month() == day.month()
    }

    /// Re-derive the stored sign from the transaction type
    pub fn normalize(&mut self) {
        self.amount = self.kind.signed(self.amount);
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.merchant.trim().is_empty() {
            return Err(TransactionValidationError::EmptyMerchant);
        }

        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.merchant, self.amount, self.category
        )
    }
}

/// Fields required to record a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: AccountId,
    /// Amount of either sign; the stored sign follows `kind`
    pub amount: Money,
    pub merchant: String,
    pub category: Category,
    pub kind: TransactionKind,
    /// Defaults to today when absent
    pub date: Option<NaiveDate>,
}

/// Partial update for a transaction; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub account_id: Option<AccountId>,
    pub amount: Option<Money>,
    pub merchant: Option<String>,
    pub category: Option<Category>,
    pub kind: Option<TransactionKind>,
    pub date: Option<NaiveDate>,
}

impl Entity for Transaction {
    type Key = TransactionId;
    type Draft = NewTransaction;
    type Patch = TransactionPatch;

    const KIND: EntityType = EntityType::Transaction;

    fn key(&self) -> TransactionId {
        self.id
    }

    fn sequence(&self) -> Option<u64> {
        Some(self.id.value())
    }

    fn label(&self) -> String {
        self.merchant.clone()
    }

    fn check(&self) -> FinboardResult<()> {
        self.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))
    }

    fn from_draft(draft: &NewTransaction, sequence: u64) -> FinboardResult<Self> {
        let mut txn = Self {
            id: TransactionId::new(sequence),
            account_id: draft.account_id,
            amount: draft.amount,
            merchant: draft.merchant.trim().to_string(),
            category: draft.category,
            kind: draft.kind,
            date: draft.date.unwrap_or_else(|| Utc::now().date_naive()),
        };
        txn.normalize();
        txn.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;
        Ok(txn)
    }

    fn apply_patch(&mut self, patch: &TransactionPatch) -> FinboardResult<()> {
        let mut next = self.clone();
        if let Some(account_id) = patch.account_id {
            next.account_id = account_id;
        }
        if let Some(amount) = patch.amount {
            next.amount = amount;
        }
        if let Some(merchant) = &patch.merchant {
            next.merchant = merchant.trim().to_string();
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(kind) = patch.kind {
            next.kind = kind;
        }
        if let Some(date) = patch.date {
            next.date = date;
        }
        next.normalize();
        next.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;
        *self = next;
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyMerchant,
    ZeroAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMerchant => write!(f, "Merchant cannot be empty"),
            Self::ZeroAmount => write!(f, "Transaction amount cannot be zero"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
