//! Account service operations

use tracing::debug;

use super::{AccountService, CallKind};
use crate::error::FinboardResult;
use crate::models::{Account, AccountType, Money};
use crate::reports::metrics;

impl AccountService<'_> {
    /// Net balance across all accounts, with credit balances subtracted
    pub async fn get_total_balance(&self) -> FinboardResult<Money> {
        self.latency.simulate(CallKind::Aggregate).await;
        let accounts = self.collection().get_all()?;
        let total = metrics::net_worth(&accounts);
        debug!(total = %total, "total balance");
        Ok(total)
    }

    /// Accounts of one type, in insertion order
    pub async fn get_by_type(&self, account_type: AccountType) -> FinboardResult<Vec<Account>> {
        self.latency.simulate(CallKind::List).await;
        self.collection()
            .filter(|a| a.account_type == account_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, AccountPatch, NewAccount};
    use crate::services::Backend;

    #[tokio::test]
    async fn test_total_balance_of_seed() {
        let backend = Backend::seeded().unwrap();
        let total = backend.accounts().get_total_balance().await.unwrap();
        assert_eq!(
            total,
            Money::from_cents(524_350 + 1_825_000 - 184_275 + 4_562_080 + 2_231_000)
        );
    }

    #[tokio::test]
    async fn test_create_sets_last_sync_and_keeps_draft() {
        let backend = Backend::seeded().unwrap();
        let draft = NewAccount::new("  Travel Fund ", AccountType::Savings, Money::from_units(20));

        let created = backend.accounts().create(&draft).await.unwrap();
        assert_eq!(created.id, AccountId::new(6));
        assert_eq!(created.name, "Travel Fund");
        assert_eq!(draft.name, "  Travel Fund ");
    }

    #[tokio::test]
    async fn test_credit_balance_cannot_go_negative() {
        let backend = Backend::seeded().unwrap();
        let patch = AccountPatch {
            balance: Some(Money::from_units(-5)),
            ..Default::default()
        };
        let err = backend
            .accounts()
            .update(AccountId::new(3), &patch)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_get_by_type() {
        let backend = Backend::seeded().unwrap();
        let investments = backend
            .accounts()
            .get_by_type(AccountType::Investment)
            .await
            .unwrap();
        let names: Vec<&str> = investments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Vanguard Brokerage", "Roth IRA"]);
    }
}
