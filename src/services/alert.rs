//! Alert service operations

use tracing::info;

use super::{AlertService, CallKind};
use crate::error::FinboardResult;
use crate::models::{Alert, AlertId, Budget};
use crate::reports::insights;

impl AlertService<'_> {
    /// Flag an alert as read
    pub async fn mark_as_read(&self, id: AlertId) -> FinboardResult<Alert> {
        self.latency.simulate(CallKind::Update).await;
        self.apply(id, |alert| {
            alert.mark_read();
            Ok(())
        })
    }

    /// Number of alerts not yet read
    pub async fn get_unread_count(&self) -> FinboardResult<usize> {
        self.latency.simulate(CallKind::Aggregate).await;
        Ok(self.collection().filter(|a| !a.read)?.len())
    }

    /// Alerts not yet read, in insertion order
    pub async fn get_unread(&self) -> FinboardResult<Vec<Alert>> {
        self.latency.simulate(CallKind::List).await;
        self.collection().filter(|a| !a.read)
    }

    /// Raise alerts for budgets at warning or critical utilization
    ///
    /// A budget that already has an unread alert with the same message is
    /// skipped. Returns the alerts created.
    pub async fn raise_budget_alerts(&self, budgets: &[Budget]) -> FinboardResult<Vec<Alert>> {
        let existing = self.collection().get_all()?;
        let drafts = insights::budget_alerts(budgets, &existing);

        let mut raised = Vec::with_capacity(drafts.len());
        for draft in &drafts {
            raised.push(self.create(draft).await?);
        }

        if !raised.is_empty() {
            info!(count = raised.len(), "budget alerts raised");
        }
        Ok(raised)
    }
}
