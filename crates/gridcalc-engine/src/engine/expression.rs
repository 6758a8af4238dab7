//! The contract between the sheet and a formula expression implementation.
//!
//! The sheet never looks inside an expression. It only needs the positions an
//! expression reads, a way to evaluate it against the current cell values and
//! a canonical text rendering. [`RhaiParser`](super::RhaiParser) is the
//! default implementation; hosts may plug in their own.

use std::fmt;

use super::format::parse_number;
use super::{FormulaError, Position, Value};
use crate::error::ParseFailure;

/// Read access to evaluated cell values.
pub trait CellLookup {
    /// Value of the cell at `pos`, or `None` when no cell is stored there.
    fn lookup(&self, pos: Position) -> Option<Value>;
}

/// A parsed formula expression.
pub trait Expression: fmt::Debug {
    /// Every position the expression reads, in source order. May contain
    /// duplicates and [`Position::NONE`] for references outside the grid.
    fn referenced_cells(&self) -> Vec<Position>;

    /// Evaluate against the given cells.
    fn evaluate(&self, lookup: &dyn CellLookup) -> Result<f64, FormulaError>;

    /// Re-render in canonical form.
    fn render(&self) -> String;
}

/// Turns formula source (without the leading marker) into an [`Expression`].
pub trait ExpressionParser {
    fn parse(&self, source: &str) -> Result<Box<dyn Expression>, ParseFailure>;
}

/// Resolve the cell at `pos` as an arithmetic operand.
///
/// - invalid position: `#REF!`
/// - missing cell or empty text: `0`
/// - text that reads as a number: that number, otherwise `#VALUE!`
/// - an error value propagates unchanged
pub fn numeric_operand(lookup: &dyn CellLookup, pos: Position) -> Result<f64, FormulaError> {
    if !pos.is_valid() {
        return Err(FormulaError::Ref);
    }
    match lookup.lookup(pos) {
        None => Ok(0.0),
        Some(Value::Number(n)) => Ok(n),
        Some(Value::Text(text)) if text.is_empty() => Ok(0.0),
        Some(Value::Text(text)) => parse_number(&text).ok_or(FormulaError::Value),
        Some(Value::Error(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapLookup(HashMap<Position, Value>);

    impl CellLookup for MapLookup {
        fn lookup(&self, pos: Position) -> Option<Value> {
            self.0.get(&pos).cloned()
        }
    }

    #[test]
    fn test_numeric_operand_conversions() {
        let mut cells = HashMap::new();
        cells.insert(Position::new(0, 0), Value::from(2.5));
        cells.insert(Position::new(0, 1), Value::from("42"));
        cells.insert(Position::new(0, 2), Value::from("forty"));
        cells.insert(Position::new(0, 3), Value::empty());
        cells.insert(Position::new(0, 4), Value::from(FormulaError::Div0));
        let lookup = MapLookup(cells);

        assert_eq!(numeric_operand(&lookup, Position::new(0, 0)), Ok(2.5));
        assert_eq!(numeric_operand(&lookup, Position::new(0, 1)), Ok(42.0));
        assert_eq!(
            numeric_operand(&lookup, Position::new(0, 2)),
            Err(FormulaError::Value)
        );
        assert_eq!(numeric_operand(&lookup, Position::new(0, 3)), Ok(0.0));
        assert_eq!(
            numeric_operand(&lookup, Position::new(0, 4)),
            Err(FormulaError::Div0)
        );
        assert_eq!(numeric_operand(&lookup, Position::new(9, 9)), Ok(0.0));
        assert_eq!(
            numeric_operand(&lookup, Position::NONE),
            Err(FormulaError::Ref)
        );
    }
}
