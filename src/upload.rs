//! The API route for importing expenses from an uploaded CSV file.
//!
//! The CSV header is matched case-insensitively against a small set of
//! accepted column names so that exports from different tools can be
//! ingested without editing: the amount can live in a column named amount,
//! price, cost, or value, and the description in description, item, name, or
//! details. Every row is categorized from its description on import.

use axum::{
    Json,
    extract::{Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    expense::{NewExpense, create_expense},
};

/// Accepted header names for the amount column.
const AMOUNT_COLUMNS: &[&str] = &["amount", "price", "cost", "value"];

/// Accepted header names for the description column.
const DESCRIPTION_COLUMNS: &[&str] = &["description", "item", "name", "details"];

/// Route handler for importing expenses from an uploaded CSV file.
///
/// Expects a multipart form with a `file` field holding a CSV document.
/// All rows are inserted in a single SQL transaction, so a row that fails to
/// parse rejects the whole file and nothing is stored.
pub async fn import_expenses(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let csv_data = match read_expense_file(&mut multipart).await {
        Ok(csv_data) => csv_data,
        Err(error) => {
            tracing::debug!("rejected upload: {error}");
            return error.into_api_response();
        }
    };

    let expenses = match parse_expenses_csv(&csv_data) {
        Ok(expenses) => expenses,
        Err(error) => {
            tracing::debug!("could not parse uploaded CSV: {error}");
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

    match import_expense_list(expenses, &connection) {
        Ok(count) => {
            tracing::info!("imported {count} expenses from CSV");
            (
                StatusCode::CREATED,
                Json(json!({ "message": format!("Imported {count} expenses") })),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not import expenses: {error}");
            error.into_api_response()
        }
    }
}

/// Read the CSV text from the multipart form's `file` field.
///
/// # Errors
/// Returns [Error::MissingFilePart] if there is no `file` field,
/// [Error::EmptyFileName] if no file was selected, [Error::NotCsv] if the
/// file is not a CSV file, or [Error::MultipartError] if the form could not
/// be read.
async fn read_expense_file(multipart: &mut Multipart) -> Result<String, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))?
    {
        if field.name() == Some("file") {
            return read_csv_field(field).await;
        }
    }

    Err(Error::MissingFilePart)
}

async fn read_csv_field(field: Field<'_>) -> Result<String, Error> {
    let file_name = field.file_name().unwrap_or_default();

    if file_name.is_empty() {
        return Err(Error::EmptyFileName);
    }

    if !file_name.to_lowercase().ends_with(".csv") {
        return Err(Error::NotCsv);
    }

    field
        .text()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))
}

/// Parse CSV text into a list of validated expenses.
///
/// # Errors
/// Returns [Error::InvalidCsv] if the required columns cannot be identified
/// or if a row cannot be parsed.
pub fn parse_expenses_csv(text: &str) -> Result<Vec<NewExpense>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| Error::InvalidCsv(error.to_string()))?
        .clone();

    let description_column = find_column(&headers, DESCRIPTION_COLUMNS);
    let amount_column = find_column(&headers, AMOUNT_COLUMNS);

    let (Some(description_column), Some(amount_column)) = (description_column, amount_column)
    else {
        return Err(Error::InvalidCsv(
            "CSV must have Description and Amount columns".to_owned(),
        ));
    };

    let mut expenses = Vec::new();

    for (row_number, record) in reader.records().enumerate() {
        // Line 1 is the header, so data rows start at line 2.
        let line_number = row_number + 2;

        let record = record.map_err(|error| Error::InvalidCsv(error.to_string()))?;

        let description = record.get(description_column).unwrap_or_default();
        let amount_text = record.get(amount_column).unwrap_or_default();

        let amount: f64 = amount_text.parse().map_err(|_| {
            Error::InvalidCsv(format!(
                "could not parse amount '{amount_text}' on line {line_number}"
            ))
        })?;

        let expense = NewExpense::build(description, amount).map_err(|error| {
            Error::InvalidCsv(format!("invalid expense on line {line_number}: {error}"))
        })?;

        expenses.push(expense);
    }

    Ok(expenses)
}

/// Insert a list of expenses in a single SQL transaction.
///
/// Returns the number of inserted expenses.
///
/// # Errors
/// Returns [Error::SqlError] if any insert fails, in which case the whole
/// transaction is rolled back.
fn import_expense_list(expenses: Vec<NewExpense>, connection: &Connection) -> Result<usize, Error> {
    let tx = connection.unchecked_transaction()?;

    let mut count = 0;

    for expense in expenses {
        create_expense(expense, &tx)?;
        count += 1;
    }

    tx.commit()?;

    Ok(count)
}

/// Find the index of the first header matching one of `candidates`,
/// comparing case-insensitively.
fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| candidates.contains(&header.trim().to_lowercase().as_str()))
}
