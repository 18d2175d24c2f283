//! Alert model
//!
//! Alerts are created by rule evaluation (for example budget thresholds),
//! flipped to read by the user, and removed by explicit delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AlertId;
use super::Entity;
use crate::audit::EntityType;
use crate::error::{FinboardError, FinboardResult};

/// Source of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Budget,
    Goal,
    Insight,
    Market,
}

impl AlertType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Some(Self::Budget),
            "goal" => Some(Self::Goal),
            "insight" => Some(Self::Insight),
            "market" => Some(Self::Market),
            _ => None,
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Budget => f.pad("budget"),
            Self::Goal => f.pad("goal"),
            Self::Insight => f.pad("insight"),
            Self::Market => f.pad("market"),
        }
    }
}

/// Urgency of an alert or insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.pad("high"),
            Self::Medium => f.pad("medium"),
            Self::Low => f.pad("low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,

    #[serde(rename = "type")]
    pub alert_type: AlertType,

    pub priority: Priority,

    pub message: String,

    #[serde(default)]
    pub read: bool,

    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}] {}", self.alert_type, self.priority, self.message)
    }
}

/// Fields required to raise an alert
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub alert_type: AlertType,
    pub priority: Priority,
    pub message: String,
}

impl NewAlert {
    pub fn new(alert_type: AlertType, priority: Priority, message: impl Into<String>) -> Self {
        Self {
            alert_type,
            priority,
            message: message.into(),
        }
    }
}

/// Partial update for an alert
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertPatch {
    pub priority: Option<Priority>,
    pub message: Option<String>,
    pub read: Option<bool>,
}

impl Entity for Alert {
    type Key = AlertId;
    type Draft = NewAlert;
    type Patch = AlertPatch;

    const KIND: EntityType = EntityType::Alert;

    fn key(&self) -> AlertId {
        self.id
    }

    fn sequence(&self) -> Option<u64> {
        Some(self.id.value())
    }

    fn label(&self) -> String {
        self.message.clone()
    }

    fn check(&self) -> FinboardResult<()> {
        if self.message.trim().is_empty() {
            return Err(FinboardError::Validation(
                "Alert message cannot be empty".into(),
            ));
        }
        Ok(())
    }

    fn from_draft(draft: &NewAlert, sequence: u64) -> FinboardResult<Self> {
        let message = draft.message.trim();
        if message.is_empty() {
            return Err(FinboardError::Validation(
                "Alert message cannot be empty".into(),
            ));
        }
        Ok(Self {
            id: AlertId::new(sequence),
            alert_type: draft.alert_type,
            priority: draft.priority,
            message: message.to_string(),
            read: false,
            timestamp: Utc::now(),
        })
    }

    fn apply_patch(&mut self, patch: &AlertPatch) -> FinboardResult<()> {
        if let Some(message) = &patch.message {
            if message.trim().is_empty() {
                return Err(FinboardError::Validation(
                    "Alert message cannot be empty".into(),
                ));
            }
            self.message = message.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(read) = patch.read {
            self.read = read;
        }
        Ok(())
    }
}
