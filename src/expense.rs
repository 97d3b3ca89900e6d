//! This file defines the `Expense` type, the types needed to create an
//! expense and the API routes for listing and clearing expenses.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, Row};
use serde::Serialize;
use serde_json::json;

use crate::{AppState, Error, categorize::categorize};

/// Alias for the integer type used for expense database IDs.
pub type ExpenseId = i64;

/// A single recorded transaction, e.g., 'Lunch, $12.50, Food'.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    /// The ID of the expense. Not part of the JSON representation.
    #[serde(skip_serializing)]
    pub id: ExpenseId,

    /// What the money was spent on.
    pub description: String,

    /// How much was spent.
    pub amount: f64,

    /// The category assigned from the description, e.g., 'Food'.
    pub category: String,
}

/// An expense that has been validated but not yet stored.
///
/// The description is guaranteed to be non-empty and the amount finite, and
/// the category has already been derived from the description.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    description: String,
    amount: f64,
    category: String,
}

impl NewExpense {
    /// Validate `description` and `amount` and assign a category.
    ///
    /// Leading and trailing whitespace is trimmed from the description.
    ///
    /// # Errors
    /// Returns [Error::EmptyDescription] if the trimmed description is empty,
    /// or [Error::NonFiniteAmount] if the amount is NaN or infinite.
    pub fn build(description: &str, amount: f64) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        if !amount.is_finite() {
            return Err(Error::NonFiniteAmount);
        }

        Ok(Self {
            description: description.to_owned(),
            amount,
            category: categorize(description).to_owned(),
        })
    }

    /// The category derived from the description.
    #[cfg(test)]
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Route handler for listing all expenses as JSON.
///
/// Expenses are returned in insertion order.
pub async fn get_expenses_endpoint(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match get_all_expenses(&connection) {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => {
            tracing::error!("could not get expenses: {error}");
            error.into_api_response()
        }
    }
}

/// Route handler for deleting all expenses.
pub async fn clear_expenses_endpoint(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match delete_all_expenses(&connection) {
        Ok(count) => {
            tracing::info!("cleared {count} expenses");
            Json(json!({ "message": "All expenses cleared" })).into_response()
        }
        Err(error) => {
            tracing::error!("could not clear expenses: {error}");
            error.into_api_response()
        }
    }
}

/// Create the SQL table for expenses if it does not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Insert a validated expense into the database.
///
/// # Errors
/// Returns [Error::SqlError] if there is an unexpected SQL error.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (description, amount, category) VALUES (?1, ?2, ?3)",
        (&expense.description, expense.amount, &expense.category),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        description: expense.description,
        amount: expense.amount,
        category: expense.category,
    })
}

/// Get all expenses in insertion order.
///
/// # Errors
/// Returns [Error::SqlError] if there is an unexpected SQL error.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, description, amount, category FROM expense ORDER BY id")?
        .query_map((), map_expense_row)?
        .map(|result| result.map_err(Error::from))
        .collect()
}

/// Delete all expenses, returning the number of deleted rows.
///
/// # Errors
/// Returns [Error::SqlError] if there is an unexpected SQL error.
pub fn delete_all_expenses(connection: &Connection) -> Result<usize, Error> {
    let count = connection.execute("DELETE FROM expense", ())?;

    Ok(count)
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
    })
}
