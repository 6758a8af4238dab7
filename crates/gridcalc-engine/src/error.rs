//! Error types for the formula engine.

use thiserror::Error;

/// Boxed failure reported by an expression parser.
pub type ParseFailure = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building formulas or decoding references.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Cannot parse formula `{expression}`: {cause}")]
    FormulaParse {
        expression: String,
        #[source]
        cause: ParseFailure,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
