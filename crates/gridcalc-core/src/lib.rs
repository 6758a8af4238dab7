//! gridcalc-core - Sheet model: cell storage, dependency graph, value caching.

pub mod config;
pub mod error;
pub mod sheet;

pub use config::SheetConfig;
pub use error::{Result, SheetError};
pub use sheet::{Cell, CellContent, CellView, Sheet};

pub use gridcalc_engine::engine::{FormulaError, Position, Size, Value};
