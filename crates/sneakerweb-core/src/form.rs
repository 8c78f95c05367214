//! Transaction form controller
//!
//! Holds the draft behind the add/edit dialog. The controller is in add mode
//! unless it was seeded from an existing record, and always falls back to add
//! mode with an empty draft once the dialog is submitted or cancelled.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::{Transaction, TransactionDraft};
use crate::store::TransactionStore;
use crate::types::{TransactionId, TransactionType};

/// Editable draft fields, named as the form inputs are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Date,
    Amount,
    Type,
    Brand,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [DraftField::Date, DraftField::Amount, DraftField::Type, DraftField::Brand];

    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Date => "date",
            DraftField::Amount => "amount",
            DraftField::Type => "type",
            DraftField::Brand => "brand",
        }
    }
}

impl std::str::FromStr for DraftField {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(DraftField::Date),
            "amount" => Ok(DraftField::Amount),
            "type" => Ok(DraftField::Type),
            "brand" => Ok(DraftField::Brand),
            _ => Err(CoreError::InvalidField { field: s.to_string() }),
        }
    }
}

/// Whether a submission creates or replaces a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Add,
    Edit,
}

impl std::fmt::Display for FormMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormMode::Add => write!(f, "add"),
            FormMode::Edit => write!(f, "edit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogState {
    Open,
    Closed,
}

/// What a successful submit did to the store
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A new record was appended
    Added(Transaction),
    /// The record with this id was replaced
    Updated(Transaction),
    /// Edit mode, but the record was gone; the store is unchanged
    Unmatched(TransactionId),
}

/// Serializable view of the controller, used by the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub mode: FormMode,
    pub dialog: DialogState,
    pub editing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TransactionId>,
    pub draft: TransactionDraft,
}

/// Draft state for the add/edit dialog
#[derive(Debug, Clone)]
pub struct FormController {
    draft: TransactionDraft,
    /// Id of the record being edited; `None` in add mode
    editing: Option<TransactionId>,
    dialog: DialogState,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            draft: TransactionDraft::default(),
            editing: None,
            dialog: DialogState::Closed,
        }
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    pub fn editing_id(&self) -> Option<TransactionId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn mode(&self) -> FormMode {
        if self.is_editing() {
            FormMode::Edit
        } else {
            FormMode::Add
        }
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    pub fn is_open(&self) -> bool {
        self.dialog == DialogState::Open
    }

    /// Dialog heading for the current mode
    pub fn title(&self) -> &'static str {
        match self.mode() {
            FormMode::Add => "Add Transaction",
            FormMode::Edit => "Edit Transaction",
        }
    }

    /// Submit button label for the current mode
    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            FormMode::Add => "Add Transaction",
            FormMode::Edit => "Update Transaction",
        }
    }

    /// Open the dialog with an empty draft in add mode
    pub fn begin_add(&mut self) {
        self.reset();
        self.dialog = DialogState::Open;
    }

    /// Open the dialog seeded with a copy of `record`
    pub fn begin_edit(&mut self, record: &Transaction) {
        self.draft = record.to_draft();
        self.editing = Some(record.id);
        self.dialog = DialogState::Open;
        log::debug!("Editing transaction {}", record.id);
    }

    /// Merge one field into the draft.
    ///
    /// Date, amount and brand are stored exactly as given. The type must name
    /// one of the known transaction types.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> CoreResult<()> {
        let value = value.into();
        match field {
            DraftField::Date => self.draft.date = value,
            DraftField::Amount => self.draft.amount = value.into(),
            DraftField::Brand => self.draft.brand = value.into(),
            DraftField::Type => {
                self.draft.kind = value.parse::<TransactionType>().map_err(|_| CoreError::InvalidValue {
                    field: field.name().to_string(),
                    value,
                })?;
            }
        }
        Ok(())
    }

    /// Merge named inputs into the draft.
    ///
    /// Either every input is applied or the draft is left as it was.
    pub fn set_fields<'a>(&mut self, inputs: impl IntoIterator<Item = (&'a str, &'a str)>) -> CoreResult<()> {
        let mut staged = inputs
            .into_iter()
            .map(|(name, value)| Ok((name.parse::<DraftField>()?, value)))
            .collect::<CoreResult<Vec<_>>>()?;
        staged.sort_by_key(|(field, _)| DraftField::ALL.iter().position(|f| f == field));

        let previous = self.draft.clone();
        for (field, value) in staged {
            if let Err(e) = self.set_field(field, value) {
                self.draft = previous;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Hand the draft to the store and reset.
    ///
    /// Blank date or amount blocks the submit: nothing changes and a
    /// validation error is returned.
    pub fn submit(&mut self, store: &mut TransactionStore) -> CoreResult<SubmitOutcome> {
        let missing = self.draft.missing_required();
        if !missing.is_empty() {
            return Err(CoreError::ValidationError {
                message: format!("Missing required field(s): {}", missing.join(", ")),
            });
        }

        let draft = std::mem::take(&mut self.draft);
        let outcome = match self.editing {
            Some(id) => {
                let record = Transaction::from_draft(id, draft);
                match store.update(record.clone()) {
                    Some(_) => SubmitOutcome::Updated(record),
                    None => SubmitOutcome::Unmatched(id),
                }
            }
            None => SubmitOutcome::Added(store.add(draft)),
        };

        self.reset();
        Ok(outcome)
    }

    /// Close the dialog and drop the draft
    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            mode: self.mode(),
            dialog: self.dialog,
            editing: self.is_editing(),
            id: self.editing,
            draft: self.draft.clone(),
        }
    }

    fn reset(&mut self) {
        self.draft = TransactionDraft::default();
        self.editing = None;
        self.dialog = DialogState::Closed;
    }
}

// ==================== Tests ====================
