//! The API route for adding a single expense manually.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState, Error,
    expense::{NewExpense, create_expense},
};

/// The request body for adding an expense manually.
#[derive(Debug, Deserialize)]
pub struct ManualExpenseForm {
    /// What the money was spent on.
    pub description: String,

    /// How much was spent.
    pub amount: f64,
}

/// Route handler for adding a single expense from a JSON request.
///
/// The description and amount are validated before anything is stored: an
/// empty description or a non-finite amount is rejected with a 400 response
/// and a JSON `{"error": ...}` payload.
pub async fn create_manual_expense(
    State(state): State<AppState>,
    Json(form): Json<ManualExpenseForm>,
) -> Response {
    let expense = match NewExpense::build(&form.description, form.amount) {
        Ok(expense) => expense,
        Err(error) => {
            tracing::debug!("rejected manual expense: {error}");
            return error.into_api_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match create_expense(expense, &connection) {
        Ok(expense) => {
            tracing::info!(
                "added expense '{}' ({}) to category {}",
                expense.description,
                expense.amount,
                expense.category
            );
            Json(json!({ "message": "Expense added successfully" })).into_response()
        }
        Err(error) => {
            tracing::error!("could not create expense: {error}");
            error.into_api_response()
        }
    }
}
