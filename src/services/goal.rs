//! Goal service operations

use super::GoalService;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{Goal, GoalId, Money};

impl GoalService<'_> {
    /// Add `amount` to a goal's progress, clamped at the target
    pub async fn update_progress(&self, id: GoalId, amount: Money) -> FinboardResult<Goal> {
        self.latency.simulate(super::CallKind::Update).await;
        if amount.is_negative() {
            return Err(FinboardError::Validation(format!(
                "Progress amount cannot be negative, got {}",
                amount
            )));
        }
        self.apply(id, |goal| {
            goal.add_progress(amount);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalType, NewGoal};
    use crate::services::Backend;
    use chrono::NaiveDate;

    async fn goal_at(backend: &Backend, current: i64, target: i64) -> Goal {
        backend
            .goals()
            .create(&NewGoal {
                name: "New Car".into(),
                goal_type: GoalType::Savings,
                target_amount: Money::from_units(target),
                current_amount: Some(Money::from_units(current)),
                target_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_progress_clamped_at_target() {
        let backend = Backend::seeded().unwrap();
        let goal = goal_at(&backend, 900, 1000).await;

        let updated = backend
            .goals()
            .update_progress(goal.id, Money::from_units(500))
            .await
            .unwrap();
        assert_eq!(updated.current_amount, Money::from_units(1000));
        assert!(updated.is_complete());
    }

    #[tokio::test]
    async fn test_progress_adds() {
        let backend = Backend::seeded().unwrap();
        let goal = goal_at(&backend, 100, 1000).await;

        let updated = backend
            .goals()
            .update_progress(goal.id, Money::from_units(150))
            .await
            .unwrap();
        assert_eq!(updated.current_amount, Money::from_units(250));
    }

    #[tokio::test]
    async fn test_progress_missing_goal() {
        let backend = Backend::seeded().unwrap();
        let err = backend
            .goals()
            .update_progress(GoalId::new(404), Money::from_units(1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_negative_progress_rejected() {
        let backend = Backend::seeded().unwrap();
        let err = backend
            .goals()
            .update_progress(GoalId::new(1), Money::from_units(-10))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let goal = backend.goals().get_by_id(GoalId::new(1)).await.unwrap().unwrap();
        assert_eq!(goal.current_amount, Money::from_cents(1_250_000));
    }
}
