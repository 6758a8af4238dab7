//! Error types for gridcalc core.

use thiserror::Error;

use gridcalc_engine::EngineError;
use gridcalc_engine::engine::Position;

/// Usage errors reported by sheet operations.
///
/// Computation errors (`#REF!`, `#VALUE!`, `#DIV/0!`) are not errors at this
/// level; they are values stored in cells.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid position: ({}, {})", .0.row, .0.col)]
    InvalidPosition(Position),

    #[error("Circular dependency detected at {0}")]
    CircularDependency(Position),

    #[error(transparent)]
    Formula(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
