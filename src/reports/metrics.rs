//! Aggregation functions
//!
//! Pure derivations of summary values from entity collections. Amounts are
//! always summed by magnitude, so a stray sign in the data never flips a
//! total.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Account, Budget, BudgetStatus, Category, Goal, Money, Transaction};

/// Category name to lifetime expense total
pub type CategorySpending = BTreeMap<Category, Money>;

/// Sum of non-liability balances
pub fn total_assets(accounts: &[Account]) -> Money {
    accounts
        .iter()
        .filter(|a| !a.account_type.is_liability())
        .map(|a| a.balance)
        .sum()
}

/// Sum of credit balances (as positive debt)
pub fn total_liabilities(accounts: &[Account]) -> Money {
    accounts
        .iter()
        .filter(|a| a.account_type.is_liability())
        .map(|a| a.balance)
        .sum()
}

/// Assets minus liabilities
pub fn net_worth(accounts: &[Account]) -> Money {
    accounts.iter().map(Account::net_worth_contribution).sum()
}

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub income: Money,
    pub expense: Money,
}

impl MonthlyTotals {
    pub fn net(&self) -> Money {
        self.income - self.expense
    }

    pub fn savings_rate(&self) -> f64 {
        savings_rate(self.income, self.expense)
    }
}

/// Totals for the calendar month and year containing `day`
pub fn monthly_totals(transactions: &[Transaction], day: NaiveDate) -> MonthlyTotals {
    transactions
        .iter()
        .filter(|t| t.in_month_of(day))
        .fold(MonthlyTotals::default(), |mut totals, t| {
            if t.is_income() {
                totals.income += t.magnitude();
            } else {
                totals.expense += t.magnitude();
            }
            totals
        })
}

/// `(income - expense) / income * 100`, or 0 when there is no income
pub fn savings_rate(income: Money, expense: Money) -> f64 {
    (income - expense).percent_of(income).unwrap_or(0.0)
}

/// Lifetime expense total per category. Income is ignored.
pub fn category_spending(transactions: &[Transaction]) -> CategorySpending {
    let mut spending = CategorySpending::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *spending.entry(txn.category).or_default() += txn.magnitude();
    }
    spending
}

/// Overwrite each budget's `spent` with its category total (zero if absent)
pub fn apply_category_spending(budgets: &mut [Budget], spending: &CategorySpending) {
    for budget in budgets {
        budget.spent = spending.get(&budget.category).copied().unwrap_or_default();
    }
}

/// `spent / limit * 100`
pub fn budget_utilization(budget: &Budget) -> f64 {
    budget.utilization()
}

/// Critical at 90% and above, warning at 75% and above
pub fn budget_status(budget: &Budget) -> BudgetStatus {
    budget.status()
}

pub fn total_budget(budgets: &[Budget]) -> Money {
    budgets.iter().map(|b| b.limit).sum()
}

pub fn total_spent(budgets: &[Budget]) -> Money {
    budgets.iter().map(|b| b.spent).sum()
}

/// Mean utilization across budgets; 0 when there are none
pub fn average_utilization(budgets: &[Budget]) -> f64 {
    if budgets.is_empty() {
        return 0.0;
    }
    budgets.iter().map(Budget::utilization).sum::<f64>() / budgets.len() as f64
}

/// Mean progress of goals not yet complete, or `None` if every goal is done
pub fn average_active_goal_progress(goals: &[Goal]) -> Option<f64> {
    let active: Vec<&Goal> = goals.iter().filter(|g| !g.is_complete()).collect();
    if active.is_empty() {
        return None;
    }
    Some(active.iter().map(|g| g.progress_percent()).sum::<f64>() / active.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccountId, AccountType, BudgetPeriod, GoalId, GoalType, TransactionId, TransactionKind,
    };
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(id: u64, cents: i64, category: Category, kind: TransactionKind, on: NaiveDate) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            account_id: AccountId::new(1),
            amount: Money::from_cents(cents),
            merchant: format!("Merchant {}", id),
            category,
            kind,
            date: on,
        }
    }

    fn account(account_type: AccountType, units: i64) -> Account {
        Account {
            id: AccountId::new(1),
            name: "Test".into(),
            account_type,
            balance: Money::from_units(units),
            last_sync: Utc::now(),
        }
    }

    fn budget(spent: i64, limit: i64) -> Budget {
        Budget {
            category: Category::Groceries,
            limit: Money::from_units(limit),
            spent: Money::from_units(spent),
            period: BudgetPeriod::Monthly,
        }
    }

    #[test]
    fn test_net_worth_subtracts_credit() {
        let accounts = vec![
            account(AccountType::Checking, 1000),
            account(AccountType::Investment, 5000),
            account(AccountType::Credit, 1500),
        ];
        assert_eq!(total_assets(&accounts), Money::from_units(6000));
        assert_eq!(total_liabilities(&accounts), Money::from_units(1500));
        assert_eq!(net_worth(&accounts), Money::from_units(4500));
    }

    #[test]
    fn test_category_spending_excludes_income() {
        let on = date(2025, 8, 1);
        let transactions = vec![
            txn(1, -40, Category::Gas, TransactionKind::Expense, on),
            txn(2, -10, Category::Gas, TransactionKind::Expense, on),
            txn(3, 500, Category::Gas, TransactionKind::Income, on),
        ];

        let spending = category_spending(&transactions);
        assert_eq!(spending.len(), 1);
        assert_eq!(spending[&Category::Gas], Money::from_cents(50));
    }

    #[test]
    fn test_category_spending_uses_magnitude() {
        let on = date(2025, 8, 1);
        // A positive expense amount still counts as spending
        let transactions = vec![
            txn(1, 25, Category::Dining, TransactionKind::Expense, on),
            txn(2, -75, Category::Dining, TransactionKind::Expense, on),
        ];
        assert_eq!(category_spending(&transactions)[&Category::Dining], Money::from_cents(100));
    }

    #[test]
    fn test_monthly_totals_only_current_month() {
        let transactions = vec![
            txn(1, 300_000, Category::Salary, TransactionKind::Income, date(2025, 8, 1)),
            txn(2, -50_000, Category::Rent, TransactionKind::Expense, date(2025, 8, 2)),
            txn(3, -9_999, Category::Dining, TransactionKind::Expense, date(2025, 7, 31)),
            txn(4, -1_000, Category::Dining, TransactionKind::Expense, date(2024, 8, 15)),
        ];

        let totals = monthly_totals(&transactions, date(2025, 8, 20));
        assert_eq!(totals.income, Money::from_cents(300_000));
        assert_eq!(totals.expense, Money::from_cents(50_000));
        assert_eq!(totals.net(), Money::from_cents(250_000));
    }

    #[test]
    fn test_savings_rate_zero_income() {
        let rate = savings_rate(Money::zero(), Money::zero());
        assert_eq!(rate, 0.0);
        assert!(!rate.is_nan());
        assert_eq!(savings_rate(Money::zero(), Money::from_units(100)), 0.0);
    }

    #[test]
    fn test_savings_rate() {
        assert_eq!(savings_rate(Money::from_units(4000), Money::from_units(3000)), 25.0);
        assert_eq!(savings_rate(Money::from_units(1000), Money::from_units(1500)), -50.0);
    }

    #[test]
    fn test_budget_status_thresholds() {
        assert_eq!(budget_status(&budget(91, 100)), BudgetStatus::Critical);
        assert_eq!(budget_status(&budget(90, 100)), BudgetStatus::Critical);
        assert_eq!(budget_status(&budget(80, 100)), BudgetStatus::Warning);
        assert_eq!(budget_status(&budget(75, 100)), BudgetStatus::Warning);
        assert_eq!(budget_status(&budget(50, 100)), BudgetStatus::Normal);
        assert_eq!(budget_utilization(&budget(50, 200)), 25.0);
    }

    #[test]
    fn test_apply_category_spending_zeroes_missing() {
        let mut budgets = vec![budget(999, 1000)];
        apply_category_spending(&mut budgets, &CategorySpending::new());
        assert!(budgets[0].spent.is_zero());
    }

    #[test]
    fn test_budget_totals_and_average() {
        let budgets = vec![budget(50, 100), budget(100, 200), budget(0, 100)];
        assert_eq!(total_budget(&budgets), Money::from_units(400));
        assert_eq!(total_spent(&budgets), Money::from_units(150));
        assert!((average_utilization(&budgets) - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(average_utilization(&[]), 0.0);
    }

    #[test]
    fn test_average_active_goal_progress() {
        let goal = |current: i64, target: i64| Goal {
            id: GoalId::new(1),
            name: "G".into(),
            goal_type: GoalType::Savings,
            target_amount: Money::from_units(target),
            current_amount: Money::from_units(current),
            target_date: date(2026, 1, 1),
        };

        let goals = vec![goal(250, 1000), goal(750, 1000), goal(500, 500)];
        assert_eq!(average_active_goal_progress(&goals), Some(50.0));
        assert_eq!(average_active_goal_progress(&[goal(1, 1)]), None);
    }
}
