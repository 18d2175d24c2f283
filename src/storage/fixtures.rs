//! Seed data for the in-memory store
//!
//! The built-in seed is compiled into the binary from `fixtures/*.json`. A
//! directory holding files with the same names can be loaded instead.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{FinboardError, FinboardResult};
use crate::models::{Account, Alert, Budget, Entity, Goal, Transaction};

const ACCOUNTS_JSON: &str = include_str!("../../fixtures/accounts.json");
const TRANSACTIONS_JSON: &str = include_str!("../../fixtures/transactions.json");
const BUDGETS_JSON: &str = include_str!("../../fixtures/budgets.json");
const GOALS_JSON: &str = include_str!("../../fixtures/goals.json");
const ALERTS_JSON: &str = include_str!("../../fixtures/alerts.json");

pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const BUDGETS_FILE: &str = "budgets.json";
pub const GOALS_FILE: &str = "goals.json";
pub const ALERTS_FILE: &str = "alerts.json";

/// Initial records for every collection
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
    pub alerts: Vec<Alert>,
}

impl Fixtures {
    /// The seed shipped with the binary
    pub fn builtin() -> FinboardResult<Self> {
        Self {
            accounts: parse_embedded(ACCOUNTS_FILE, ACCOUNTS_JSON)?,
            transactions: parse_embedded(TRANSACTIONS_FILE, TRANSACTIONS_JSON)?,
            budgets: parse_embedded(BUDGETS_FILE, BUDGETS_JSON)?,
            goals: parse_embedded(GOALS_FILE, GOALS_JSON)?,
            alerts: parse_embedded(ALERTS_FILE, ALERTS_JSON)?,
        }
        .validated()
    }

    /// Load a seed from a directory. Missing files give empty collections.
    pub fn load_dir(dir: &Path) -> FinboardResult<Self> {
        if !dir.is_dir() {
            return Err(FinboardError::Config(format!(
                "Fixture directory not found: {}",
                dir.display()
            )));
        }

        debug!(dir = %dir.display(), "loading fixtures");

        Self {
            accounts: read_records(&dir.join(ACCOUNTS_FILE))?,
            transactions: read_records(&dir.join(TRANSACTIONS_FILE))?,
            budgets: read_records(&dir.join(BUDGETS_FILE))?,
            goals: read_records(&dir.join(GOALS_FILE))?,
            alerts: read_records(&dir.join(ALERTS_FILE))?,
        }
        .validated()
    }

    /// Re-derive transaction signs from their types, then check every
    /// record and key
    fn validated(mut self) -> FinboardResult<Self> {
        self.transactions.iter_mut().for_each(Transaction::normalize);

        check_records(&self.accounts)?;
        check_records(&self.transactions)?;
        check_records(&self.budgets)?;
        check_records(&self.goals)?;
        check_records(&self.alerts)?;
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
            && self.transactions.is_empty()
            && self.budgets.is_empty()
            && self.goals.is_empty()
            && self.alerts.is_empty()
    }
}

/// Records from a JSON array file; a missing file is an empty list
fn read_records<T: DeserializeOwned>(path: &Path) -> FinboardResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| FinboardError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| FinboardError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Seeded records must be valid and have unique keys
fn check_records<T: Entity>(records: &[T]) -> FinboardResult<()> {
    let mut seen = HashSet::new();

    for record in records {
        let key = record.key().to_string();
        record.check().map_err(|e| match e {
            FinboardError::Validation(message) => FinboardError::Validation(format!(
                "Seed {} {}: {}",
                T::KIND.name(),
                key,
                message
            )),
            other => other,
        })?;

        if !seen.insert(key.clone()) {
            return Err(FinboardError::Duplicate {
                entity_type: T::KIND.name(),
                identifier: key,
            });
        }
    }

    Ok(())
}

fn parse_embedded<T: DeserializeOwned>(name: &str, json: &str) -> FinboardResult<Vec<T>> {
    serde_json::from_str(json)
        .map_err(|e| FinboardError::Json(format!("Failed to parse built-in {}: {}", name, e)))
}
