//! gridcalc - In-memory spreadsheet evaluation core.
//!
//! ```
//! use gridcalc::{Position, Sheet, Value};
//!
//! let mut sheet = Sheet::new();
//! sheet.set_cell(Position::from_a1("A1"), "10").unwrap();
//! sheet.set_cell(Position::from_a1("B1"), "=A1 * 2").unwrap();
//! assert_eq!(sheet.value(Position::from_a1("B1")).unwrap(), Value::Number(20.0));
//! ```

pub use gridcalc_core::{
    Cell, CellContent, CellView, Result, Sheet, SheetConfig, SheetError, config, error, sheet,
};
pub use gridcalc_engine::{EngineError, ParseFailure};
pub use gridcalc_engine::engine::{
    CellLookup, Expression, ExpressionParser, Formula, FormulaError, Position, RhaiParser, Size,
    Value,
};

/// Lower-level formula engine API.
pub mod engine {
    pub use gridcalc_engine::engine::*;
}
