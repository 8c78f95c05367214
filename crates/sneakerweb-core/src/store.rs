//! In-memory transaction store
//!
//! The collection is held as an immutable snapshot. Every mutation builds a
//! new vector and swaps it in, so snapshots handed out earlier never change.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::models::{Transaction, TransactionDraft, TransactionStats};
use crate::types::TransactionId;

/// Ordered collection of committed transactions
#[derive(Debug, Clone)]
pub struct TransactionStore {
    records: Arc<Vec<Transaction>>,
    /// Next id to hand out; only ever increases
    next_id: TransactionId,
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(Vec::new()),
            next_id: 1,
        }
    }

    /// Create a store holding existing records, in the given order.
    ///
    /// Ids must be unique. New ids continue after the highest one present.
    pub fn with_records(records: Vec<Transaction>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for tx in &records {
            if !seen.insert(tx.id) {
                return Err(CoreError::DuplicateEntry {
                    entry: format!("transaction id {}", tx.id),
                });
            }
        }
        let next_id = records.iter().map(|t| t.id).max().map_or(1, |max| max + 1);
        Ok(Self {
            records: Arc::new(records),
            next_id,
        })
    }

    /// Current snapshot of the collection
    pub fn snapshot(&self) -> Arc<Vec<Transaction>> {
        Arc::clone(&self.records)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.records
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.records.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next `add` will assign
    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    /// Append a new record built from `draft` and return it
    pub fn add(&mut self, draft: TransactionDraft) -> Transaction {
        let id = self.next_id;
        self.next_id += 1;

        let tx = Transaction::from_draft(id, draft);
        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.extend(self.records.iter().cloned());
        records.push(tx.clone());
        self.records = Arc::new(records);

        log::debug!("Added transaction {} ({} total)", id, self.records.len());
        tx
    }

    /// Replace the record whose id matches `record.id`.
    ///
    /// Returns the replaced record. When nothing matches, the collection is
    /// left untouched and `None` is returned.
    pub fn update(&mut self, record: Transaction) -> Option<Transaction> {
        let pos = match self.records.iter().position(|t| t.id == record.id) {
            Some(pos) => pos,
            None => {
                log::warn!("Update ignored: no transaction with id {}", record.id);
                return None;
            }
        };

        let mut records: Vec<Transaction> = self.records.iter().cloned().collect();
        let previous = std::mem::replace(&mut records[pos], record);
        self.records = Arc::new(records);

        log::debug!("Updated transaction {}", previous.id);
        Some(previous)
    }

    /// Remove the record with `id`, returning it if it was present
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let pos = self.records.iter().position(|t| t.id == id)?;

        let mut records: Vec<Transaction> = self.records.iter().cloned().collect();
        let removed = records.remove(pos);
        self.records = Arc::new(records);

        log::debug!("Removed transaction {} ({} left)", id, self.records.len());
        Some(removed)
    }

    pub fn stats(&self) -> TransactionStats {
        TransactionStats::from_transactions(&self.records)
    }
}

// ==================== Tests ====================
