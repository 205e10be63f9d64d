//! Unified application error type.
//! All modules (db, core, export, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Attendance already recorded for student '{student_id}' on {day}")]
    ConstraintViolation { student_id: String, day: String },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid sort key: {0} (use order_id, student_id, name or timestamp)")]
    InvalidSortKey(String),

    #[error("Invalid sort order: {0} (use asc or desc)")]
    InvalidSortOrder(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
