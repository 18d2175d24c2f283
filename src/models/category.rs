//! Spending and income categories
//!
//! Categories are a fixed enumerated set shared by transactions and budgets.
//! A budget uses its category as its primary key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label classifying a transaction or budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Gas,
    Salary,
    Dining,
    Rent,
    Transfer,
    Utilities,
    Entertainment,
    Shopping,
    Health,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 10] = [
        Category::Groceries,
        Category::Gas,
        Category::Salary,
        Category::Dining,
        Category::Rent,
        Category::Transfer,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Health,
    ];

    /// The display name, which is also the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Gas => "Gas",
            Self::Salary => "Salary",
            Self::Dining => "Dining",
            Self::Rent => "Rent",
            Self::Transfer => "Transfer",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
        }
    }

    /// Parse a category from its name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Category::parse("groceries"), Some(Category::Groceries));
        assert_eq!(Category::parse(" GAS "), Some(Category::Gas));
        assert_eq!(Category::parse("Travel"), None);
    }

    #[test]
    fn test_serialized_form_matches_name() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
        }
    }
}
