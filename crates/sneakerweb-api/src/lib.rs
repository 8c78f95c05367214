//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: transaction table, add/edit dialog, JSON API

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sneakerweb_config::Config;
use sneakerweb_core::Session;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub config: Config,
}

impl AppState {
    pub fn new(session: Session, config: Config) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{
        api_form, api_summary, api_transaction_create, api_transaction_delete, api_transaction_detail,
        api_transaction_update, api_transactions, htmx_transaction_cancel, htmx_transaction_create_form,
        htmx_transaction_delete, htmx_transaction_draft, htmx_transaction_edit_form, htmx_transaction_submit,
        htmx_transactions_list, page_transactions,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions).post(api_transaction_create))
        .route(
            "/api/transactions/:id",
            get(api_transaction_detail)
                .put(api_transaction_update)
                .delete(api_transaction_delete),
        )
        .route("/api/summary", get(api_summary))
        .route("/api/form", get(api_form))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/transactions", get(page_transactions))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/create", get(htmx_transaction_create_form))
        .route("/transactions/:id/edit", get(htmx_transaction_edit_form))
        .route("/transactions/draft", post(htmx_transaction_draft))
        .route("/transactions/submit", post(htmx_transaction_submit))
        .route("/transactions/cancel", post(htmx_transaction_cancel))
        .route("/transactions/:id", delete(htmx_transaction_delete))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Sneaker Accounting</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [("/", "Home", "home"), ("/transactions", "Transactions", "transactions")];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Sneaker Accounting</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, id) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        let icon = match *id {
            "home" => "🏠",
            "transactions" => "👟",
            _ => "📄",
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Whether the request came from HTMX
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").map(|v| v == "true").unwrap_or(false)
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Inline red alert box for failed fragment requests
pub fn error_alert(title: &str, message: &str) -> String {
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-red-600'>✗</span><span class='font-medium text-red-800'>{}</span></div><p class='text-sm text-red-600 mt-1'>{}</p></div>"#,
        sneakerweb_utils::escape_html(title),
        sneakerweb_utils::escape_html(message)
    )
}

/// Landing page
async fn index_page(headers: axum::http::HeaderMap) -> axum::response::Html<String> {
    let inner_content = r#"<div class='flex flex-col items-center justify-center min-h-[70vh] text-center'>
            <h1 class='text-4xl font-bold mb-4'>Sneaker Accounting</h1>
            <p class='text-xl text-gray-600 mb-8'>Track your sneaker transactions with ease.</p>
            <a href='/transactions' class='px-6 py-3 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>View Transactions</a>
        </div>"#;

    axum::response::Html(page_response(&headers, "Home", "/", inner_content))
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the listener fails.
pub async fn start_server(config: Config, session: Arc<RwLock<Session>>) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState { session, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Sneaker Accounting server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Home)");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /api/* (JSON API endpoints)");

    match axum::serve(listener, router).await {
        Ok(_) => {
            log::info!("Server stopped gracefully");
            Ok(())
        }
        Err(e) => {
            log::error!("Server error: {}", e);
            Err(e.into())
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn test_server() -> TestServer {
        let state = AppState::new(Session::default(), Config::default());
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server();
        let response = server.get("/api/health").await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_landing_page_links_to_transactions() {
        let server = test_server();
        let response = server.get("/").await;
        response.assert_status(StatusCode::OK);

        let body = response.text();
        assert!(body.contains("<!DOCTYPE html>"));
        assert!(body.contains("Sneaker Accounting"));
        assert!(body.contains("Track your sneaker transactions with ease."));
        assert!(body.contains("href='/transactions'"));
        assert!(body.contains("View Transactions"));
    }

    #[tokio::test]
    async fn test_view_transactions_keeps_sidebar() {
        let server = test_server();
        let landing = server.get("/").await.text();
        assert!(!landing.contains("hx-target='body'"));
        assert!(landing.contains("<a href='/transactions' class="));

        // A plain link is a full page load, so the layout comes back whole
        let page = server.get("/transactions").await.text();
        assert!(page.contains("<aside"));
        assert!(page.contains("href='/'"));
        assert!(page.contains("Add Transaction"));
    }

    #[test]
    fn test_page_response_htmx_partial() {
        let mut headers = axum::http::HeaderMap::new();
        let full = page_response(&headers, "T", "/", "<p>x</p>");
        assert!(full.contains("<aside"));

        headers.insert("hx-request", axum::http::HeaderValue::from_static("true"));
        let partial = page_response(&headers, "T", "/", "<p>x</p>");
        assert!(!partial.contains("<aside"));
        assert!(!partial.contains("<!DOCTYPE html>"));
        assert!(partial.contains("<p>x</p>"));
    }

    #[test]
    fn test_nav_marks_active_link() {
        let nav = nav_sidebar("/transactions");
        assert!(nav.contains("href='/transactions' class='flex items-center gap-2 px-3 py-2 rounded-lg bg-indigo-50"));
        assert!(nav.contains("href='/' class='flex items-center gap-2 px-3 py-2 rounded-lg text-gray-600"));
    }

    #[test]
    fn test_error_alert_escapes() {
        let html = error_alert("Failed", "<script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("bg-red-50"));
    }
}
