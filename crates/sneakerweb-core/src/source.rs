//! Initial data sources for a session

use async_trait::async_trait;
use sneakerweb_config::DataConfig;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::models::Transaction;
use crate::types::TransactionType;

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Supplies the records a session starts with
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Load records in display order
    async fn load(&self) -> CoreResult<Vec<Transaction>>;

    /// Short name for log output
    fn name(&self) -> &'static str;
}

/// The three demo records shown on a fresh page
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderSource;

#[async_trait]
impl TransactionSource for PlaceholderSource {
    async fn load(&self) -> CoreResult<Vec<Transaction>> {
        Ok(placeholder_transactions())
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}

/// Starts with no records
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySource;

#[async_trait]
impl TransactionSource for EmptySource {
    async fn load(&self) -> CoreResult<Vec<Transaction>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "empty"
    }
}

pub fn placeholder_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            date: "2023-10-01".to_string(),
            amount: "200".into(),
            kind: TransactionType::Expense,
            brand: "Nike".into(),
        },
        Transaction {
            id: 2,
            date: "2023-10-05".to_string(),
            amount: "150".into(),
            kind: TransactionType::Expense,
            brand: "Adidas".into(),
        },
        Transaction {
            id: 3,
            date: "2023-10-10".to_string(),
            amount: "300".into(),
            kind: TransactionType::Income,
            brand: "Resale".into(),
        },
    ]
}

/// Pick the source named by the data configuration
pub fn source_for(config: &DataConfig) -> SourceRef {
    if config.seed_placeholders {
        Arc::new(PlaceholderSource)
    } else {
        Arc::new(EmptySource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_source() {
        let records = PlaceholderSource.load().await.unwrap();
        let ids: Vec<_> = records.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[2].kind, TransactionType::Income);
    }

    #[tokio::test]
    async fn test_source_for_config() {
        let source = source_for(&DataConfig { seed_placeholders: false });
        assert_eq!(source.name(), "empty");
        assert!(source.load().await.unwrap().is_empty());

        let source = source_for(&DataConfig::default());
        assert_eq!(source.name(), "placeholder");
    }
}
