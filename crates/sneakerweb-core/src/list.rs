//! Transaction list projection
//!
//! Turns the store's collection into display rows. Order is preserved and
//! nothing is filtered.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sneakerweb_config::{DisplayConfig, SymbolPosition};
use sneakerweb_utils::format_amount;

use crate::models::Transaction;
use crate::types::TransactionId;

/// Per-row action trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "id", rename_all = "lowercase")]
pub enum RowAction {
    /// Open the dialog seeded with this record
    Edit(TransactionId),
    /// Remove this record
    Delete(TransactionId),
}

impl RowAction {
    pub fn id(&self) -> TransactionId {
        match self {
            RowAction::Edit(id) | RowAction::Delete(id) => *id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit(_) => "Edit",
            RowAction::Delete(_) => "Delete",
        }
    }

    /// HTTP method the trigger issues
    pub fn method(&self) -> &'static str {
        match self {
            RowAction::Edit(_) => "GET",
            RowAction::Delete(_) => "DELETE",
        }
    }

    pub fn path(&self) -> String {
        match self {
            RowAction::Edit(id) => format!("/transactions/{}/edit", id),
            RowAction::Delete(id) => format!("/transactions/{}", id),
        }
    }
}

/// One display row of the transaction table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub date: String,
    pub amount: String,
    pub kind: String,
    pub brand: String,
    pub edit: RowAction,
    pub delete: RowAction,
}

/// Format a stored date as YYYY-MM-DD.
///
/// Text that is not a recognisable date is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Project a single record
pub fn render_row(tx: &Transaction, display: &DisplayConfig) -> TransactionRow {
    TransactionRow {
        id: tx.id,
        date: format_date(&tx.date),
        amount: format_amount(
            tx.amount.as_str(),
            &display.currency_symbol,
            display.symbol_position == SymbolPosition::Before,
        ),
        kind: tx.kind.to_string(),
        brand: tx.brand.to_string(),
        edit: RowAction::Edit(tx.id),
        delete: RowAction::Delete(tx.id),
    }
}

/// Project the whole collection, in order
pub fn render_rows(transactions: &[Transaction], display: &DisplayConfig) -> Vec<TransactionRow> {
    transactions.iter().map(|tx| render_row(tx, display)).collect()
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionType;

    fn tx(id: TransactionId, date: &str, amount: &str, kind: TransactionType, brand: &str) -> Transaction {
        Transaction {
            id,
            date: date.to_string(),
            amount: amount.into(),
            kind,
            brand: brand.into(),
        }
    }

    #[test]
    fn test_rows_preserve_order_and_labels() {
        let records = vec![
            tx(3, "2023-10-10", "300", TransactionType::Income, "Resale"),
            tx(1, "2023-10-01", "200", TransactionType::Expense, "Nike"),
        ];
        let rows = render_rows(&records, &DisplayConfig::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 3);
        assert_eq!(rows[0].amount, "$300");
        assert_eq!(rows[0].kind, "Income");
        assert_eq!(rows[0].brand, "Resale");
        assert_eq!(rows[1].id, 1);
        assert_eq!(rows[1].date, "2023-10-01");
    }

    #[test]
    fn test_row_actions_target_record() {
        let row = render_row(
            &tx(7, "2024-03-01", "80", TransactionType::Expense, "Adidas"),
            &DisplayConfig::default(),
        );
        assert_eq!(row.edit, RowAction::Edit(7));
        assert_eq!(row.edit.path(), "/transactions/7/edit");
        assert_eq!(row.delete.method(), "DELETE");
        assert_eq!(row.delete.path(), "/transactions/7");
        assert_eq!(row.delete.label(), "Delete");
        assert_eq!(row.delete.id(), 7);
    }

    #[test]
    fn test_symbol_after_amount() {
        let display = DisplayConfig {
            currency_symbol: "€".to_string(),
            symbol_position: SymbolPosition::After,
        };
        let row = render_row(&tx(1, "2024-03-01", "80", TransactionType::Expense, "Nike"), &display);
        assert_eq!(row.amount, "80 €");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2023-10-05"), "2023-10-05");
        assert_eq!(format_date("2023-10-05T14:30:00Z"), "2023-10-05");
        assert_eq!(format_date("2023-10-05T14:30"), "2023-10-05");
        assert_eq!(format_date("next friday"), "next friday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_row_action_serialization() {
        let json = serde_json::to_value(RowAction::Delete(4)).unwrap();
        assert_eq!(json, serde_json::json!({ "action": "delete", "id": 4 }));
    }
}
