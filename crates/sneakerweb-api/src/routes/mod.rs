//! Route modules for the API server
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and HTMX fragments
//! - page.rs: Full page rendering and shared markup

pub mod transactions;
