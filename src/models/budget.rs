//! Budget model
//!
//! A budget caps spending for one category over a period. The category is
//! the budget's key. `spent` is derived from expense transactions and is
//! never accepted from callers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;
use super::Entity;
use crate::audit::EntityType;
use crate::error::{FinboardError, FinboardResult};

/// Utilization (percent) at which a budget is flagged as a warning
pub const WARNING_THRESHOLD: f64 = 75.0;

/// Utilization (percent) at which a budget is flagged as critical
pub const CRITICAL_THRESHOLD: f64 = 90.0;

/// Period a budget limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Weekly,
}

impl BudgetPeriod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Some(Self::Monthly),
            "weekly" | "week" => Some(Self::Weekly),
            _ => None,
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => f.pad("Monthly"),
            Self::Weekly => f.pad("Weekly"),
        }
    }
}

/// Classification of a budget's utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Normal,
    Warning,
    Critical,
}

impl BudgetStatus {
    /// Classify a utilization percentage
    pub fn from_utilization(percent: f64) -> Self {
        if percent >= CRITICAL_THRESHOLD {
            Self::Critical
        } else if percent >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.pad("normal"),
            Self::Warning => f.pad("warning"),
            Self::Critical => f.pad("critical"),
        }
    }
}

/// A spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,

    pub limit: Money,

    /// Spending to date, recomputed from transactions
    #[serde(default)]
    pub spent: Money,

    #[serde(default)]
    pub period: BudgetPeriod,
}

impl Budget {
    /// `spent / limit * 100`; zero when the limit is zero
    pub fn utilization(&self) -> f64 {
        self.spent.abs().percent_of(self.limit).unwrap_or(0.0)
    }

    pub fn status(&self) -> BudgetStatus {
        BudgetStatus::from_utilization(self.utilization())
    }

    /// Amount left before the limit is reached (negative when over)
    pub fn remaining(&self) -> Money {
        self.limit - self.spent.abs()
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }
        Ok(())
    }
}

/// Fields required to create a budget
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: Category,
    pub limit: Money,
    pub period: BudgetPeriod,
}

/// Partial update for a budget; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub limit: Option<Money>,
    pub period: Option<BudgetPeriod>,
}

impl Entity for Budget {
    type Key = Category;
    type Draft = NewBudget;
    type Patch = BudgetPatch;

    const KIND: EntityType = EntityType::Budget;

    fn key(&self) -> Category {
        self.category
    }

    fn label(&self) -> String {
        self.category.name().to_string()
    }

    fn check(&self) -> FinboardResult<()> {
        self.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))
    }

    fn from_draft(draft: &NewBudget, _sequence: u64) -> FinboardResult<Self> {
        let budget = Self {
            category: draft.category,
            limit: draft.limit,
            spent: Money::zero(),
            period: draft.period,
        };
        budget
            .validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;
        Ok(budget)
    }

    fn apply_patch(&mut self, patch: &BudgetPatch) -> FinboardResult<()> {
        let mut next = self.clone();
        if let Some(limit) = patch.limit {
            next.limit = limit;
        }
        if let Some(period) = patch.period {
            next.period = period;
        }
        next.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;
        *self = next;
        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be positive, got {}", limit)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(spent: i64, limit: i64) -> Budget {
        Budget {
            category: Category::Dining,
            limit: Money::from_units(limit),
            spent: Money::from_units(spent),
            period: BudgetPeriod::Monthly,
        }
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(budget(91, 100).status(), BudgetStatus::Critical);
        assert_eq!(budget(90, 100).status(), BudgetStatus::Critical);
        assert_eq!(budget(80, 100).status(), BudgetStatus::Warning);
        assert_eq!(budget(75, 100).status(), BudgetStatus::Warning);
        assert_eq!(budget(50, 100).status(), BudgetStatus::Normal);
    }

    #[test]
    fn test_remaining() {
        assert_eq!(budget(30, 100).remaining(), Money::from_units(70));
        assert_eq!(budget(130, 100).remaining(), Money::from_units(-30));
    }

    #[test]
    fn test_from_draft_starts_unspent() {
        let draft = NewBudget {
            category: Category::Gas,
            limit: Money::from_units(120),
            period: BudgetPeriod::Weekly,
        };
        let budget = Budget::from_draft(&draft, 0).unwrap();
        assert!(budget.spent.is_zero());
        assert_eq!(budget.key(), Category::Gas);
    }

    #[test]
    fn test_limit_must_be_positive() {
        let draft = NewBudget {
            category: Category::Gas,
            limit: Money::zero(),
            period: BudgetPeriod::Monthly,
        };
        assert!(Budget::from_draft(&draft, 0).unwrap_err().is_validation());

        let mut b = budget(10, 100);
        let patch = BudgetPatch {
            limit: Some(Money::from_units(-5)),
            ..Default::default()
        };
        assert!(b.apply_patch(&patch).is_err());
        assert_eq!(b.limit, Money::from_units(100));
    }
}
