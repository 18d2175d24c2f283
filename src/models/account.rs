//! Account model
//!
//! Represents financial accounts (checking, savings, credit cards, investments)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;
use super::Entity;
use crate::audit::EntityType;
use crate::error::{FinboardError, FinboardResult};

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    /// Credit card; the balance is the debt owed
    Credit,
    Investment,
}

impl AccountType {
    /// Returns true if the balance of this account type is money owed
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::Credit)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            "investment" | "brokerage" => Some(Self::Investment),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Checking => "Checking",
            Self::Savings => "Savings",
            Self::Credit => "Credit Card",
            Self::Investment => "Investment",
        };
        f.pad(label)
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,

    /// Account name (e.g., "Chase Checking")
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Current balance. For credit accounts this is the non-negative debt
    /// magnitude.
    pub balance: Money,

    /// When the balance was last synchronized
    pub last_sync: DateTime<Utc>,
}

impl Account {
    /// The balance as it contributes to net worth (liabilities negated)
    pub fn net_worth_contribution(&self) -> Money {
        if self.account_type.is_liability() {
            -self.balance
        } else {
            self.balance
        }
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        if self.account_type.is_liability() && self.balance.is_negative() {
            return Err(AccountValidationError::NegativeDebt(self.balance));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Fields required to open a new account
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub account_type: AccountType,
    pub balance: Money,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, account_type: AccountType, balance: Money) -> Self {
        Self {
            name: name.into(),
            account_type,
            balance,
        }
    }
}

/// Partial update for an account; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
    pub balance: Option<Money>,
    pub last_sync: Option<DateTime<Utc>>,
}

impl Entity for Account {
    type Key = AccountId;
    type Draft = NewAccount;
    type Patch = AccountPatch;

    const KIND: EntityType = EntityType::Account;

    fn key(&self) -> AccountId {
        self.id
    }

    fn sequence(&self) -> Option<u64> {
        Some(self.id.value())
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn check(&self) -> FinboardResult<()> {
        self.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))
    }

    fn from_draft(draft: &NewAccount, sequence: u64) -> FinboardResult<Self> {
        let account = Self {
            id: AccountId::new(sequence),
            name: draft.name.trim().to_string(),
            account_type: draft.account_type,
            balance: draft.balance,
            last_sync: Utc::now(),
        };
        account
            .validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;
        Ok(account)
    }

    fn apply_patch(&mut self, patch: &AccountPatch) -> FinboardResult<()> {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.trim().to_string();
        }
        if let Some(account_type) = patch.account_type {
            next.account_type = account_type;
        }
        if let Some(balance) = patch.balance {
            next.balance = balance;
        }
        if let Some(last_sync) = patch.last_sync {
            next.last_sync = last_sync;
        }
        next.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;
        *self = next;
        Ok(())
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeDebt(Money),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::NegativeDebt(balance) => write!(
                f,
                "Credit balance must be the debt magnitude, got {}",
                balance
            ),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, account_type: AccountType, cents: i64) -> NewAccount {
        NewAccount::new(name, account_type, Money::from_cents(cents))
    }

    #[test]
    fn test_from_draft_sets_defaults() {
        let before = Utc::now();
        let account =
            Account::from_draft(&draft("  Checking ", AccountType::Checking, 1000), 4).unwrap();
        assert_eq!(account.id, AccountId::new(4));
        assert_eq!(account.name, "Checking");
        assert!(account.last_sync >= before);
    }

    #[test]
    fn test_validation() {
        let err = Account::from_draft(&draft("", AccountType::Checking, 0), 1).unwrap_err();
        assert!(err.is_validation());

        let err = Account::from_draft(&draft("Visa", AccountType::Credit, -500), 1).unwrap_err();
        assert!(err.is_validation());

        // Overdrawn checking is allowed
        assert!(Account::from_draft(&draft("Checking", AccountType::Checking, -500), 1).is_ok());
    }

    #[test]
    fn test_patch_is_shallow_and_atomic() {
        let mut account =
            Account::from_draft(&draft("Visa", AccountType::Credit, 25000), 1).unwrap();

        let patch = AccountPatch {
            balance: Some(Money::from_cents(-1)),
            name: Some("Renamed".into()),
            ..Default::default()
        };
        assert!(account.apply_patch(&patch).is_err());
        assert_eq!(account.name, "Visa");

        let patch = AccountPatch {
            name: Some("Travel Visa".into()),
            ..Default::default()
        };
        account.apply_patch(&patch).unwrap();
        assert_eq!(account.name, "Travel Visa");
        assert_eq!(account.balance.cents(), 25000);
    }

    #[test]
    fn test_net_worth_contribution() {
        let card = Account::from_draft(&draft("Visa", AccountType::Credit, 25000), 1).unwrap();
        let savings = Account::from_draft(&draft("Rainy", AccountType::Savings, 5000), 2).unwrap();
        assert_eq!(card.net_worth_contribution().cents(), -25000);
        assert_eq!(savings.net_worth_contribution().cents(), 5000);
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("checking"), Some(AccountType::Checking));
        assert_eq!(AccountType::parse("SAVINGS"), Some(AccountType::Savings));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::Credit));
        assert_eq!(AccountType::parse("cash"), None);
    }

    #[test]
    fn test_serialized_shape() {
        let account = Account::from_draft(&draft("Main", AccountType::Checking, 100), 1).unwrap();
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "checking");
        assert!(json.get("lastSync").is_some());
    }
}
