//! Error types for the webshop analyzer.

use std::num::ParseIntError;
use thiserror::Error;

/// Result type alias for phase and report operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that end a whole ingestion phase or report.
///
/// These never abort the run: the driver turns them into diagnostics and
/// moves on to the next phase or report.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader or writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Why a single input line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid amount {value:?}: {source}")]
    InvalidAmount {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("card payment has a bank account but no card number")]
    InconsistentCardPayment,

    #[error("transfer payment has a card number but no bank account")]
    InconsistentTransferPayment,

    #[error("invalid payment method {0:?}")]
    InvalidPaymentMethod(String),

    #[error("customer {0} not found")]
    CustomerNotFound(String),

    #[error("webshop {0} not found")]
    WebshopNotFound(String),

    /// The line could not be decoded at all (e.g. not valid UTF-8)
    #[error("malformed line: {0}")]
    Malformed(String),
}
