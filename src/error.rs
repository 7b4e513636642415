use crate::domain::region::Region;
use serde::Serialize;
use thiserror::Error;

/// Errors reported by a payment strategy.
///
/// The dispatcher treats these as opaque and never retries them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("payment declined: {0}")]
    Declined(String),
    #[error("processor unreachable: {0}")]
    Network(String),
    #[error("payment attempt cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Unrecognized region: {0:?}")]
    UnrecognizedRegion(String),
    #[error("A strategy is already registered for {0}")]
    DuplicateStrategy(Region),
    #[error("No strategy registered for {0}")]
    UnroutablePayment(Region),
    #[error("Strategy for {region} failed: {source}")]
    StrategyFailure {
        region: Region,
        #[source]
        source: StrategyError,
    },
    #[error("Payment in {0} was cancelled")]
    Cancelled(Region),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse classification of a [`PaymentError`], used for outcome rows and
/// failure events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnrecognizedRegion,
    DuplicateStrategy,
    UnroutablePayment,
    StrategyFailure,
    Cancelled,
    InvalidIntent,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnrecognizedRegion => "unrecognized_region",
            ErrorKind::DuplicateStrategy => "duplicate_strategy",
            ErrorKind::UnroutablePayment => "unroutable_payment",
            ErrorKind::StrategyFailure => "strategy_failure",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::InvalidIntent => "invalid_intent",
            ErrorKind::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PaymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::UnrecognizedRegion(_) => ErrorKind::UnrecognizedRegion,
            PaymentError::DuplicateStrategy(_) => ErrorKind::DuplicateStrategy,
            PaymentError::UnroutablePayment(_) => ErrorKind::UnroutablePayment,
            PaymentError::StrategyFailure { .. } => ErrorKind::StrategyFailure,
            PaymentError::Cancelled(_) => ErrorKind::Cancelled,
            PaymentError::ValidationError(_) => ErrorKind::InvalidIntent,
            PaymentError::CsvError(_) | PaymentError::IoError(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
