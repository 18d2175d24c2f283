//! Financial goal model
//!
//! Goals track progress toward a target amount by a target date. Progress
//! only moves through [`Goal::add_progress`], which never overshoots the
//! target.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;
use super::Entity;
use crate::audit::EntityType;
use crate::error::{FinboardError, FinboardResult};

/// What the goal is working toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    #[default]
    Savings,
    /// Paying down a balance owed
    Debt,
    Investment,
}

impl GoalType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "saving" => Some(Self::Savings),
            "debt" => Some(Self::Debt),
            "investment" | "invest" => Some(Self::Investment),
            _ => None,
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => f.pad("Savings"),
            Self::Debt => f.pad("Debt"),
            Self::Investment => f.pad("Investment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,

    pub name: String,

    #[serde(rename = "type")]
    pub goal_type: GoalType,

    pub target_amount: Money,

    #[serde(default)]
    pub current_amount: Money,

    pub target_date: NaiveDate,
}

impl Goal {
    /// Percent complete, capped at 100
    pub fn progress_percent(&self) -> f64 {
        let percent = match self.current_amount.percent_of(self.target_amount) {
            Some(percent) => percent,
            None if self.current_amount.is_positive() => 100.0,
            None => 0.0,
        };
        percent.clamp(0.0, 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn remaining(&self) -> Money {
        self.target_amount - self.current_amount
    }

    /// Whole days from `today` until the target date (negative once past)
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.target_date - today).num_days()
    }

    /// Advance the current amount, clamping at the target
    pub fn add_progress(&mut self, amount: Money) {
        self.current_amount = (self.current_amount + amount).min(self.target_amount);
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target_amount));
        }
        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeProgress(self.current_amount));
        }
        if self.current_amount > self.target_amount {
            return Err(GoalValidationError::ProgressExceedsTarget {
                current: self.current_amount,
                target: self.target_amount,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} of {})",
            self.name, self.current_amount, self.target_amount
        )
    }
}

/// Fields required to create a goal
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub goal_type: GoalType,
    pub target_amount: Money,
    /// Starting progress; zero when absent
    pub current_amount: Option<Money>,
    pub target_date: NaiveDate,
}

/// Partial update for a goal. Progress is not patchable; use the progress
/// operation instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub goal_type: Option<GoalType>,
    pub target_amount: Option<Money>,
    pub target_date: Option<NaiveDate>,
}

impl Entity for Goal {
    type Key = GoalId;
    type Draft = NewGoal;
    type Patch = GoalPatch;

    const KIND: EntityType = EntityType::Goal;

    fn key(&self) -> GoalId {
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

    fn from_draft(draft: &NewGoal, sequence: u64) -> FinboardResult<Self> {
        let goal = Self {
            id: GoalId::new(sequence),
            name: draft.name.trim().to_string(),
            goal_type: draft.goal_type,
            target_amount: draft.target_amount,
            current_amount: draft.current_amount.unwrap_or_default(),
            target_date: draft.target_date,
        };
        goal.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;
        Ok(goal)
    }

    fn apply_patch(&mut self, patch: &GoalPatch) -> FinboardResult<()> {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.trim().to_string();
        }
        if let Some(goal_type) = patch.goal_type {
            next.goal_type = goal_type;
        }
        if let Some(target_amount) = patch.target_amount {
            next.target_amount = target_amount;
        }
        if let Some(target_date) = patch.target_date {
            next.target_date = target_date;
        }
        next.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;
        *self = next;
        Ok(())
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget(Money),
    NegativeProgress(Money),
    ProgressExceedsTarget { current: Money, target: Money },
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget(target) => {
                write!(f, "Goal target must be positive, got {}", target)
            }
            Self::NegativeProgress(current) => {
                write!(f, "Goal progress cannot be negative, got {}", current)
            }
            Self::ProgressExceedsTarget { current, target } => write!(
                f,
                "Goal progress {} exceeds target {}",
                current, target
            ),
        }
    }
}

impl std::error::Error for GoalValidationError {}
