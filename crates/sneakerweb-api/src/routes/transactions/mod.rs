//! Transaction routes - table, add/edit dialog, removal
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_form,
    api_summary,
    api_transaction_create,
    api_transaction_delete,
    api_transaction_detail,
    api_transaction_update,
    api_transactions,
    htmx_transaction_cancel,
    htmx_transaction_create_form,
    htmx_transaction_delete,
    htmx_transaction_draft,
    htmx_transaction_edit_form,
    htmx_transaction_submit,
    htmx_transactions_list,
};

pub use page::{
    page_transactions,
    render_form_modal,
    render_stats_cards,
    render_transactions_table,
};
