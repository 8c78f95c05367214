//! Core data models for transaction records

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::types::{Brand, TransactionId, TransactionType};

/// Amount as entered by the user.
///
/// The text is kept verbatim; it is only parsed when totals are computed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn new(raw: impl Into<String>) -> Self {
        Amount(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when nothing but whitespace was entered
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Numeric value, if the text parses as a number
    pub fn value(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::new(s)
    }
}

impl From<String> for Amount {
    fn from(s: String) -> Self {
        Amount(s)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// JSON clients send either "150" or 150
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(s) => Amount(s),
            RawAmount::Number(n) => Amount(n.to_string()),
        })
    }
}

/// Committed transaction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier, never changes
    pub id: TransactionId,
    /// Transaction date (YYYY-MM-DD as entered)
    pub date: String,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub brand: Brand,
}

impl Transaction {
    /// Build a record from a draft and an assigned id
    pub fn from_draft(id: TransactionId, draft: TransactionDraft) -> Self {
        Self {
            id,
            date: draft.date,
            amount: draft.amount,
            kind: draft.kind,
            brand: draft.brand,
        }
    }

    /// Copy of the editable fields
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            date: self.date.clone(),
            amount: self.amount.clone(),
            kind: self.kind,
            brand: self.brand.clone(),
        }
    }

    /// Parse the date
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

/// Working copy of a record while the form dialog is open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: Amount,
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    #[serde(default)]
    pub brand: Brand,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            date: String::new(),
            amount: Amount::default(),
            kind: TransactionType::Expense,
            brand: Brand::default(),
        }
    }
}

impl TransactionDraft {
    pub fn new(
        date: impl Into<String>,
        amount: impl Into<Amount>,
        kind: TransactionType,
        brand: impl Into<Brand>,
    ) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
            kind,
            brand: brand.into(),
        }
    }

    /// Names of required fields that are still blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.date.trim().is_empty() {
            missing.push("date");
        }
        if self.amount.is_empty() {
            missing.push("amount");
        }
        missing
    }
}

/// Aggregate figures shown above the transaction list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total_transactions: usize,
    pub income_count: usize,
    pub expense_count: usize,
    /// Sum of parseable income amounts
    pub income_total: f64,
    /// Sum of parseable expense amounts
    pub expense_total: f64,
    pub net: f64,
}

impl TransactionStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut stats = TransactionStats {
            total_transactions: transactions.len(),
            ..Default::default()
        };
        for tx in transactions {
            let value = tx.amount.value().unwrap_or(0.0);
            match tx.kind {
                TransactionType::Income => {
                    stats.income_count += 1;
                    stats.income_total += value;
                }
                TransactionType::Expense => {
                    stats.expense_count += 1;
                    stats.expense_total += value;
                }
            }
        }
        stats.net = stats.income_total - stats.expense_total;
        stats
    }
}
