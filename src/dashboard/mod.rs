//! Dashboard module
//!
//! Provides the main page showing per-category summary cards, charts, and
//! the expense table.

mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
