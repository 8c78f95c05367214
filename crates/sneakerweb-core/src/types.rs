//! Basic types for transaction records

use serde::{Deserialize, Serialize};

/// Transaction identifier, assigned by the store
pub type TransactionId = u64;

/// Brands offered by the brand selector when no configuration overrides them
pub const SUGGESTED_BRANDS: [&str; 3] = ["Nike", "Adidas", "Resale"];

/// Transaction type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money received (e.g. a pair sold)
    Income,
    /// Money spent (e.g. a pair bought)
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Expense
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brand label.
///
/// The UI suggests a fixed set but any text is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brand(String);

impl Brand {
    pub fn new(name: impl Into<String>) -> Self {
        Brand(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the brand is one of the built-in suggestions
    pub fn is_suggested(&self) -> bool {
        SUGGESTED_BRANDS.contains(&self.0.as_str())
    }
}

impl Default for Brand {
    fn default() -> Self {
        Brand::new(SUGGESTED_BRANDS[0])
    }
}

impl From<&str> for Brand {
    fn from(s: &str) -> Self {
        Brand::new(s)
    }
}

impl From<String> for Brand {
    fn from(s: String) -> Self {
        Brand(s)
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
