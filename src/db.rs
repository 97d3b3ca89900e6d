//! Database initialization for the application's domain models.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Create the tables for the application's domain models.
///
/// Safe to call against an existing database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    Ok(())
}
