//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: All transactions (JSON)
//! - api_transaction_detail: Single transaction (JSON)
//! - api_transaction_create / update / delete: Direct store access (JSON)
//! - api_summary: Aggregate figures (JSON)
//! - api_form: Current dialog state (JSON)
//! - htmx_transactions_list: Transaction table (HTML fragment)
//! - htmx_transaction_create_form / edit_form: Open the dialog (HTML fragment)
//! - htmx_transaction_draft: Apply one input change (HTML fragment)
//! - htmx_transaction_submit / cancel: Close the dialog (HTML fragment)
//! - htmx_transaction_delete: Remove a row (HTML fragment)

use crate::routes::transactions::page::{render_form_modal, render_stats_cards, render_transactions_table};
use crate::{error_alert, ApiError, AppState};
use axum::extract::{Form, Path};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use sneakerweb_core::{
    CoreError, CoreResult, FormSnapshot, Session, SubmitOutcome, Transaction, TransactionDraft,
    TransactionId, TransactionStats,
};
use std::collections::HashMap;

// ==================== JSON API ====================

/// Get all transactions in display order (JSON API)
pub async fn api_transactions(state: axum::extract::State<AppState>) -> Json<Vec<Transaction>> {
    let snapshot = state.session.read().await.store().snapshot();
    Json(snapshot.to_vec())
}

/// Get single transaction (JSON API)
pub async fn api_transaction_detail(
    state: axum::extract::State<AppState>,
    path: Path<TransactionId>,
) -> Result<Json<Transaction>, ApiError> {
    let session = state.session.read().await;
    let id = path.0;
    session
        .store()
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| CoreError::TransactionNotFound { id }.into())
}

/// Add a transaction (JSON API); responds with the assigned record
pub async fn api_transaction_create(
    state: axum::extract::State<AppState>,
    body: Json<TransactionDraft>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let draft = body.0;
    require_fields(&draft)?;

    let mut session = state.session.write().await;
    let tx = session.add(draft);
    log::info!("Created transaction {} via API", tx.id);
    Ok((StatusCode::CREATED, Json(tx)))
}

/// Replace a transaction (JSON API); the path id is authoritative
pub async fn api_transaction_update(
    state: axum::extract::State<AppState>,
    path: Path<TransactionId>,
    body: Json<TransactionDraft>,
) -> Result<Json<Transaction>, ApiError> {
    let id = path.0;
    let draft = body.0;
    require_fields(&draft)?;

    let record = Transaction::from_draft(id, draft);
    let mut session = state.session.write().await;
    match session.update(record.clone()) {
        Some(_) => Ok(Json(record)),
        None => Err(CoreError::TransactionNotFound { id }.into()),
    }
}

/// Remove a transaction (JSON API); responds with the removed record
pub async fn api_transaction_delete(
    state: axum::extract::State<AppState>,
    path: Path<TransactionId>,
) -> Result<Json<Transaction>, ApiError> {
    let id = path.0;
    let mut session = state.session.write().await;
    session
        .delete(id)
        .map(Json)
        .ok_or_else(|| CoreError::TransactionNotFound { id }.into())
}

/// Get transaction summary (JSON API)
pub async fn api_summary(state: axum::extract::State<AppState>) -> Json<TransactionStats> {
    let session = state.session.read().await;
    Json(session.stats())
}

/// Get the current dialog state (JSON API)
pub async fn api_form(state: axum::extract::State<AppState>) -> Json<FormSnapshot> {
    let session = state.session.read().await;
    Json(session.form().snapshot())
}

fn require_fields(draft: &TransactionDraft) -> CoreResult<()> {
    let missing = draft.missing_required();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::ValidationError {
            message: format!("Missing required field(s): {}", missing.join(", ")),
        })
    }
}

// ==================== HTMX fragments ====================

/// Merge submitted inputs into the draft; any rejected input leaves it untouched
fn apply_fields(session: &mut Session, params: &HashMap<String, String>) -> CoreResult<()> {
    session.set_fields(params.iter().map(|(name, value)| (name.as_str(), value.as_str())))
}

/// Out-of-band stats refresh
fn stats_oob(session: &Session) -> String {
    format!(
        "<div id='transactions-stats' hx-swap-oob='innerHTML'>{}</div>",
        render_stats_cards(&session.stats(), session.display())
    )
}

/// HTMX: Transaction table
pub async fn htmx_transactions_list(state: axum::extract::State<AppState>) -> Html<String> {
    let session = state.session.read().await;
    Html(render_transactions_table(&session.rows()))
}

/// HTMX: Open the dialog in add mode
pub async fn htmx_transaction_create_form(state: axum::extract::State<AppState>) -> Html<String> {
    let mut session = state.session.write().await;
    let form = session.open_add();
    Html(render_form_modal(form, &state.config.form.brands, None))
}

/// HTMX: Open the dialog seeded from an existing record
pub async fn htmx_transaction_edit_form(
    state: axum::extract::State<AppState>,
    path: Path<TransactionId>,
) -> Html<String> {
    let mut session = state.session.write().await;
    match session.open_edit(path.0) {
        Ok(form) => Html(render_form_modal(form, &state.config.form.brands, None)),
        Err(e) => Html(error_alert("Cannot edit transaction", &e.to_string())),
    }
}

/// HTMX: Apply input changes to the draft
pub async fn htmx_transaction_draft(
    state: axum::extract::State<AppState>,
    params: Form<HashMap<String, String>>,
) -> Html<String> {
    let mut session = state.session.write().await;
    match apply_fields(&mut session, &params.0) {
        Ok(()) => Html(String::new()),
        Err(e) => Html(error_alert("Invalid input", &e.to_string())),
    }
}

/// HTMX: Submit the dialog.
///
/// On success the dialog slot is emptied and the table and stats are
/// refreshed out of band. On failure the dialog is re-rendered with the
/// error and the store is untouched.
pub async fn htmx_transaction_submit(
    state: axum::extract::State<AppState>,
    params: Form<HashMap<String, String>>,
) -> Html<String> {
    let mut session = state.session.write().await;
    let result = apply_fields(&mut session, &params.0).and_then(|_| session.submit());

    match result {
        Ok(outcome) => {
            match &outcome {
                SubmitOutcome::Added(tx) => log::info!("Added transaction {}", tx.id),
                SubmitOutcome::Updated(tx) => log::info!("Updated transaction {}", tx.id),
                SubmitOutcome::Unmatched(_) => {}
            }
            Html(format!(
                "<div id='transactions-content' hx-swap-oob='innerHTML'>{}</div>{}",
                render_transactions_table(&session.rows()),
                stats_oob(&session)
            ))
        }
        Err(e) => {
            let feedback = error_alert("Save failed", &e.to_string());
            Html(render_form_modal(session.form(), &state.config.form.brands, Some(&feedback)))
        }
    }
}

/// HTMX: Close the dialog and drop the draft
pub async fn htmx_transaction_cancel(state: axum::extract::State<AppState>) -> Html<String> {
    let mut session = state.session.write().await;
    session.cancel();
    Html(String::new())
}

/// HTMX: Remove a row and re-render the table
pub async fn htmx_transaction_delete(
    state: axum::extract::State<AppState>,
    path: Path<TransactionId>,
) -> Html<String> {
    let mut session = state.session.write().await;
    match session.delete(path.0) {
        Some(tx) => log::info!("Deleted transaction {}", tx.id),
        None => log::warn!("Delete ignored: no transaction with id {}", path.0),
    }
    Html(format!("{}{}", render_transactions_table(&session.rows()), stats_oob(&session)))
}

// ==================== Tests ====================
