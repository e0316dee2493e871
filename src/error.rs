//! Error types for the tinysql engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SqlError>;

/// Every error is local to the statement that produced it; none terminate
/// the session. `Display` strings are the single-line diagnostics handed
/// back to the shell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SqlError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    #[error("Table '{0}' already exists")]
    DuplicateTable(String),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Type coercion error: {0}")]
    TypeCoercion(String),

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Division by zero")]
    DivisionByZero,
}
