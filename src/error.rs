//! Defines the app level error type and conversions to HTML pages and JSON error payloads.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{html::error_view, not_found::get_404_not_found_response};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty or whitespace-only string was used as an expense description.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// A NaN or infinite number was used as an expense amount.
    ///
    /// Amounts must survive aggregation and display formatting, so only
    /// finite values are accepted.
    #[error("Invalid amount format")]
    NonFiniteAmount,

    /// The multipart form did not contain a field named `file`.
    #[error("No file part")]
    MissingFilePart,

    /// The multipart `file` field had an empty file name.
    #[error("No selected file")]
    EmptyFileName,

    /// The uploaded file was not a CSV file.
    #[error("Invalid file type")]
    NotCsv,

    /// The CSV had issues that prevented it from being parsed.
    #[error("Error processing file: {0}")]
    InvalidCsv(String),

    /// The multipart form could not be parsed.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Internal Server Error",
                        "500",
                        "Something went wrong on our end.",
                        "Please try again later.",
                    ),
                )
                    .into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with a JSON `{"error": ...}` payload.
    ///
    /// Validation errors map to 400 Bad Request with the error's display text.
    /// Everything else maps to 500 Internal Server Error with a generic
    /// message, since the details are only useful in the server logs.
    pub fn into_api_response(self) -> Response {
        match self {
            Error::EmptyDescription
            | Error::NonFiniteAmount
            | Error::MissingFilePart
            | Error::EmptyFileName
            | Error::NotCsv
            | Error::InvalidCsv(_)
            | Error::MultipartError(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "An unexpected error occurred, please try again later"
                    })),
                )
                    .into_response()
            }
        }
    }
}
