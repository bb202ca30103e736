//! The module contains the errors the engine can throw.
//!
//! All of them are recoverable at the point of detection: the worst outcome
//! anywhere in the engine is "operation rejected, state unchanged".
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),
    #[error("Stale selection: {0}")]
    StaleSelection(String),
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidBounds(a), Self::InvalidBounds(b)) => a == b,
            (Self::StaleSelection(a), Self::StaleSelection(b)) => a == b,
            (Self::TypeMismatch(a), Self::TypeMismatch(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            _ => false,
        }
    }
}
