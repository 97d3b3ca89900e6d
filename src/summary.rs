//! Per-category expense aggregation and the summary API route.
//!
//! The summary is recomputed from the expense table on every request so that
//! it always agrees with the expense list.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::{Map, Number, Value};

use crate::{AppState, Error};

/// The aggregated amount spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category label, e.g., 'Food'.
    pub category: String,

    /// The sum of all expense amounts in this category.
    pub total: f64,
}

/// Aggregate expense amounts by category.
///
/// Categories are ordered by the first expense recorded in each, so the
/// summary order matches the order categories first appeared in the expense
/// list.
///
/// # Errors
/// Returns [Error::SqlError] if there is an unexpected SQL error.
pub fn get_summary(connection: &Connection) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT category, SUM(amount)
            FROM expense
            GROUP BY category
            ORDER BY MIN(id)",
        )?
        .query_map((), |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .map(|result| result.map_err(Error::from))
        .collect()
}

/// Sum of all category totals, which equals the sum of all expense amounts.
pub fn summary_total(summary: &[CategoryTotal]) -> f64 {
    summary.iter().map(|entry| entry.total).sum()
}

/// Route handler for getting the per-category summary as a JSON object.
///
/// The object's keys appear in summary order (categories ordered by first
/// appearance in the expense list).
pub async fn get_summary_endpoint(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    let summary = match get_summary(&connection) {
        Ok(summary) => summary,
        Err(error) => {
            tracing::error!("could not get summary: {error}");
            return error.into_api_response();
        }
    };

    let mut object = Map::new();

    for entry in summary {
        let amount = Number::from_f64(entry.total)
            // `get_summary` only ever aggregates finite amounts.
            .unwrap_or_else(|| Number::from(0));
        object.insert(entry.category, Value::Number(amount));
    }

    Json(Value::Object(object)).into_response()
}
