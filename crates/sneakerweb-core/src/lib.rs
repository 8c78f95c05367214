//! Core transaction state: store, form controller and list projection
//!
//! A [`Session`] owns one store and one form controller. Request handlers
//! receive the session explicitly; nothing here is global.

pub mod error;
pub mod form;
pub mod list;
pub mod models;
pub mod source;
pub mod store;
pub mod types;

use sneakerweb_config::DisplayConfig;

pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use form::{DialogState, DraftField, FormController, FormMode, FormSnapshot, SubmitOutcome};
pub use list::{format_date, render_row, render_rows, RowAction, TransactionRow};
pub use models::{Amount, Transaction, TransactionDraft, TransactionStats};
pub use source::{source_for, EmptySource, PlaceholderSource, SourceRef, TransactionSource};
pub use store::TransactionStore;
pub use types::{Brand, TransactionId, TransactionType, SUGGESTED_BRANDS};

/// Page-level state for the transactions view
#[derive(Debug, Clone)]
pub struct Session {
    store: TransactionStore,
    form: FormController,
    display: DisplayConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}

impl Session {
    /// Create an empty session
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            store: TransactionStore::new(),
            form: FormController::new(),
            display,
        }
    }

    /// Create a session around an existing store
    pub fn with_store(store: TransactionStore, display: DisplayConfig) -> Self {
        Self {
            store,
            form: FormController::new(),
            display,
        }
    }

    /// Replace the collection with the records from `source`
    pub async fn load(&mut self, source: &dyn TransactionSource) -> CoreResult<usize> {
        let store = match source.load().await.and_then(TransactionStore::with_records) {
            Ok(store) => store,
            Err(e) => {
                DefaultErrorLogger.log_error(
                    &e,
                    &ErrorContext::new("load").with_data("source", serde_json::json!(source.name())),
                );
                return Err(e);
            }
        };
        self.store = store;
        self.form = FormController::new();
        log::info!("Loaded {} transaction(s) from {} source", self.store.len(), source.name());
        Ok(self.store.len())
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Open the dialog in add mode
    pub fn open_add(&mut self) -> &FormController {
        self.form.begin_add();
        &self.form
    }

    /// Open the dialog seeded from the record with `id`
    pub fn open_edit(&mut self, id: TransactionId) -> CoreResult<&FormController> {
        let record = self.store.get(id).ok_or(CoreError::TransactionNotFound { id })?;
        self.form.begin_edit(record);
        Ok(&self.form)
    }

    /// Apply input changes to the draft; a rejected input leaves it untouched
    pub fn set_fields<'a>(&mut self, inputs: impl IntoIterator<Item = (&'a str, &'a str)>) -> CoreResult<()> {
        self.form.set_fields(inputs)
    }

    /// Submit the current draft to the store
    pub fn submit(&mut self) -> CoreResult<SubmitOutcome> {
        let outcome = self.form.submit(&mut self.store)?;
        if let SubmitOutcome::Unmatched(id) = outcome {
            DefaultErrorLogger.log_warning(
                "edited transaction no longer exists; nothing was updated",
                &ErrorContext::new("submit").with_data("id", serde_json::json!(id)),
            );
        }
        Ok(outcome)
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    /// Add a record directly, bypassing the form
    pub fn add(&mut self, draft: TransactionDraft) -> Transaction {
        self.store.add(draft)
    }

    /// Replace a record directly, bypassing the form
    pub fn update(&mut self, record: Transaction) -> Option<Transaction> {
        self.store.update(record)
    }

    /// Remove a record; a no-op when the id is unknown
    pub fn delete(&mut self, id: TransactionId) -> Option<Transaction> {
        self.store.remove(id)
    }

    /// Display rows for the current collection
    pub fn rows(&self) -> Vec<TransactionRow> {
        render_rows(self.store.transactions(), &self.display)
    }

    pub fn stats(&self) -> TransactionStats {
        self.store.stats()
    }
}

// ==================== Tests ====================
