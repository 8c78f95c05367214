//! Transactions page rendering - Full page endpoints
//!
//! Endpoints:
//! - page_transactions: Main transactions page
//!
//! Helper functions:
//! - render_stats_cards: Summary cards above the table
//! - render_transactions_table: The table of rows with Edit/Delete triggers
//! - render_form_modal: Add/edit dialog bound to the form controller

use crate::AppState;
use sneakerweb_config::{DisplayConfig, SymbolPosition};
use sneakerweb_core::{FormController, TransactionRow, TransactionStats, TransactionType};
use sneakerweb_utils::{escape_html, format_amount, format_number};

/// Transactions page - header, stats, table and an empty dialog slot
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let session = state.session.read().await;
    let stats = session.stats();
    let rows = session.rows();

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transactions</h2>
            <button hx-get='/transactions/create' hx-target='#modal-container' hx-swap='innerHTML'
                class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 flex items-center gap-2'>
                <svg xmlns='http://www.w3.org/2000/svg' class='h-5 w-5' fill='none' viewBox='0 0 24 24' stroke='currentColor'>
                    <path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='M12 4v16m8-8H4'/>
                </svg>
                Add Transaction
            </button>
        </div>
        <div id='transactions-stats'>{}</div>
        <div id='transactions-content' class='bg-white rounded-xl shadow-sm p-6'>{}</div>
        <div id='modal-container'></div>
        <script>
        function closeCreateModal() {{
            htmx.ajax('POST', '/transactions/cancel', {{target: '#modal-container', swap: 'innerHTML'}});
        }}
        document.addEventListener('keydown', function(e) {{
            if (e.key === 'Escape' && document.getElementById('create-modal')) closeCreateModal();
        }});
        </script>"#,
        render_stats_cards(&stats, session.display()),
        render_transactions_table(&rows)
    );

    axum::response::Html(crate::page_response(&headers, "Transactions", "/transactions", &inner_content))
}

fn money(value: f64, display: &DisplayConfig) -> String {
    format_amount(
        &format_number(format!("{:.2}", value)),
        &display.currency_symbol,
        display.symbol_position == SymbolPosition::Before,
    )
}

/// Summary cards: count, income, expense, net
pub fn render_stats_cards(stats: &TransactionStats, display: &DisplayConfig) -> String {
    let net_class = if stats.net >= 0.0 { "text-green-700" } else { "text-red-700" };
    format!(
        r#"<div class='grid grid-cols-2 md:grid-cols-4 gap-3 mb-4'>
            <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>Transactions</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>Income</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-orange-50 p-3 rounded-lg border border-orange-100'><p class='text-xs text-orange-600'>Expenses</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-purple-50 p-3 rounded-lg border border-purple-100'><p class='text-xs text-purple-600'>Net</p><p class='text-xl font-bold {}'>{}</p></div>
        </div>"#,
        stats.total_transactions,
        escape_html(&money(stats.income_total, display)),
        escape_html(&money(stats.expense_total, display)),
        net_class,
        escape_html(&money(stats.net, display)),
    )
}

/// Table of display rows, in store order
pub fn render_transactions_table(rows: &[TransactionRow]) -> String {
    if rows.is_empty() {
        return "<p class='text-gray-500 text-center py-8'>No transactions yet</p>".to_string();
    }

    let body: String = rows
        .iter()
        .map(|row| {
            let kind_class = if row.kind == TransactionType::Income.as_str() {
                "bg-green-100 text-green-700"
            } else {
                "bg-red-100 text-red-700"
            };
            format!(
                r#"<tr id='transaction-{}' class='border-b hover:bg-gray-50'>
                    <td class='px-4 py-3 font-mono text-sm'>{}</td>
                    <td class='px-4 py-3 font-mono'>{}</td>
                    <td class='px-4 py-3'><span class='px-2 py-0.5 rounded text-xs {}'>{}</span></td>
                    <td class='px-4 py-3'>{}</td>
                    <td class='px-4 py-3'>
                        <div class='flex gap-2'>
                            <button hx-{}='{}' hx-target='#modal-container' hx-swap='innerHTML'
                                class='px-3 py-1.5 text-sm border rounded-lg hover:bg-gray-50'>{}</button>
                            <button hx-{}='{}' hx-target='#transactions-content' hx-swap='innerHTML'
                                class='px-3 py-1.5 text-sm bg-red-600 text-white rounded-lg hover:bg-red-700'>{}</button>
                        </div>
                    </td>
                </tr>"#,
                row.id,
                escape_html(&row.date),
                escape_html(&row.amount),
                kind_class,
                escape_html(&row.kind),
                escape_html(&row.brand),
                row.edit.method().to_lowercase(),
                row.edit.path(),
                row.edit.label(),
                row.delete.method().to_lowercase(),
                row.delete.path(),
                row.delete.label(),
            )
        })
        .collect();

    format!(
        r#"<table class='w-full text-left'>
            <thead>
                <tr class='border-b text-sm text-gray-600'>
                    <th class='px-4 py-2'>Date</th>
                    <th class='px-4 py-2'>Amount</th>
                    <th class='px-4 py-2'>Type</th>
                    <th class='px-4 py-2'>Brand</th>
                    <th class='px-4 py-2'>Actions</th>
                </tr>
            </thead>
            <tbody>{}</tbody>
        </table>"#,
        body
    )
}

/// Add/edit dialog for the current form state.
///
/// Every input posts its change to `/transactions/draft`; the form itself
/// posts to `/transactions/submit`. `feedback` is shown above the buttons.
pub fn render_form_modal(form: &FormController, brands: &[String], feedback: Option<&str>) -> String {
    let draft = form.draft();

    let type_options: String = TransactionType::ALL
        .iter()
        .map(|kind| {
            let selected = if *kind == draft.kind { " selected" } else { "" };
            format!("<option value='{}'{}>{}</option>", kind.as_str(), selected, kind.as_str())
        })
        .collect();

    let mut brand_options = String::new();
    if !brands.iter().any(|b| b == draft.brand.as_str()) {
        let brand = escape_html(draft.brand.as_str());
        brand_options.push_str(&format!("<option value='{}' selected>{}</option>", brand, brand));
    }
    for brand in brands {
        let selected = if brand == draft.brand.as_str() { " selected" } else { "" };
        let brand = escape_html(brand);
        brand_options.push_str(&format!("<option value='{}'{}>{}</option>", brand, selected, brand));
    }

    let draft_attrs = "hx-post='/transactions/draft' hx-trigger='change' hx-target='#form-feedback' hx-swap='innerHTML'";

    format!(
        r#"<div id='create-modal' class='fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center' onclick='if(event.target.id === "create-modal") closeCreateModal()'>
    <div class='bg-white rounded-xl shadow-2xl w-full max-w-lg overflow-hidden' onclick='event.stopPropagation()'>
        <div class='flex items-center justify-between px-6 py-4 border-b'>
            <h2 class='text-xl font-bold'>{}</h2>
            <button onclick='closeCreateModal()' class='text-gray-500 hover:text-gray-700 p-2'>
                <svg class='w-6 h-6' fill='none' stroke='currentColor' viewBox='0 0 24 24'>
                    <path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='M6 18L18 6M6 6l12 12'/>
                </svg>
            </button>
        </div>
        <form hx-post='/transactions/submit' hx-target='#modal-container' hx-swap='innerHTML' class='p-6 space-y-4'>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Date</label>
                <input type='date' name='date' value='{}' required {} class='w-full px-3 py-2.5 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Amount</label>
                <input type='number' step='any' name='amount' value='{}' required {} class='w-full px-3 py-2.5 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Type</label>
                <select name='type' {} class='w-full px-3 py-2.5 border rounded-lg focus:ring-2 focus:ring-indigo-500'>{}</select>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Brand</label>
                <select name='brand' {} class='w-full px-3 py-2.5 border rounded-lg focus:ring-2 focus:ring-indigo-500'>{}</select>
            </div>
            <div id='form-feedback'>{}</div>
            <div class='flex items-center gap-4'>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>{}</button>
                <button type='button' hx-post='/transactions/cancel' hx-target='#modal-container' hx-swap='innerHTML' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Cancel</button>
            </div>
        </form>
    </div>
</div>"#,
        form.title(),
        escape_html(&draft.date),
        draft_attrs,
        escape_html(draft.amount.as_str()),
        draft_attrs,
        draft_attrs,
        type_options,
        draft_attrs,
        brand_options,
        feedback.unwrap_or(""),
        form.submit_label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sneakerweb_core::{render_rows, Transaction};

    fn brands() -> Vec<String> {
        vec!["Nike".to_string(), "Adidas".to_string(), "Resale".to_string()]
    }

    #[test]
    fn test_table_lists_rows_in_order() {
        let records = vec![
            Transaction {
                id: 2,
                date: "2023-10-05".to_string(),
                amount: "150".into(),
                kind: TransactionType::Expense,
                brand: "Adidas".into(),
            },
            Transaction {
                id: 1,
                date: "2023-10-01".to_string(),
                amount: "200".into(),
                kind: TransactionType::Expense,
                brand: "<b>Nike</b>".into(),
            },
        ];
        let html = render_transactions_table(&render_rows(&records, &DisplayConfig::default()));

        let first = html.find("transaction-2").unwrap();
        let second = html.find("transaction-1").unwrap();
        assert!(first < second);
        assert!(html.contains("$150"));
        assert!(html.contains("hx-get='/transactions/2/edit'"));
        assert!(html.contains("hx-delete='/transactions/1'"));
        assert!(html.contains("&lt;b&gt;Nike&lt;/b&gt;"));
        for header in ["Date", "Amount", "Type", "Brand", "Actions"] {
            assert!(html.contains(&format!(">{}</th>", header)));
        }
    }

    #[test]
    fn test_row_buttons_follow_action_method() {
        let records = vec![Transaction {
            id: 7,
            date: "2023-10-01".to_string(),
            amount: "200".into(),
            kind: TransactionType::Income,
            brand: "Nike".into(),
        }];
        let rows = render_rows(&records, &DisplayConfig::default());
        let html = render_transactions_table(&rows);

        for action in [&rows[0].edit, &rows[0].delete] {
            let attr = format!("hx-{}='{}'", action.method().to_lowercase(), action.path());
            assert_eq!(html.matches(&attr).count(), 1, "missing {}", attr);
        }
        assert!(!html.contains("hx-post"));
    }

    #[test]
    fn test_empty_table() {
        assert!(render_transactions_table(&[]).contains("No transactions yet"));
    }

    #[test]
    fn test_add_modal_defaults() {
        let mut form = FormController::new();
        form.begin_add();
        let html = render_form_modal(&form, &brands(), None);

        assert!(html.contains("Add Transaction</h2>"));
        assert!(html.contains(">Add Transaction</button>"));
        assert!(html.contains("<option value='Expense' selected>"));
        assert!(html.contains("<option value='Nike' selected>"));
        assert!(html.contains("name='date' value=''"));
    }

    #[test]
    fn test_edit_modal_keeps_unlisted_brand() {
        let mut form = FormController::new();
        form.begin_edit(&Transaction {
            id: 4,
            date: "2024-01-02".to_string(),
            amount: "90".into(),
            kind: TransactionType::Income,
            brand: "Puma".into(),
        });
        let html = render_form_modal(&form, &brands(), Some("<p>note</p>"));

        assert!(html.contains("Edit Transaction</h2>"));
        assert!(html.contains(">Update Transaction</button>"));
        assert!(html.contains("<option value='Puma' selected>"));
        assert!(html.contains("<option value='Income' selected>"));
        assert!(html.contains("name='amount' value='90'"));
        assert!(html.contains("<p>note</p>"));
    }

    #[test]
    fn test_stats_cards() {
        let stats = TransactionStats {
            total_transactions: 3,
            income_count: 1,
            expense_count: 2,
            income_total: 300.0,
            expense_total: 1350.0,
            net: -1050.0,
        };
        let html = render_stats_cards(&stats, &DisplayConfig::default());
        assert!(html.contains("$300.00"));
        assert!(html.contains("$1,350.00"));
        assert!(html.contains("text-red-700"));
    }
}
