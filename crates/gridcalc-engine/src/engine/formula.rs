//! The formula wrapper stored in formula cells.

use super::expression::{CellLookup, Expression, ExpressionParser};
use super::{Position, Value};
use crate::error::{EngineError, Result};

/// A parsed formula together with its canonical reference list.
#[derive(Debug)]
pub struct Formula {
    expression: Box<dyn Expression>,
    references: Vec<Position>,
}

impl Formula {
    /// Parse `source` (without the leading formula marker).
    pub fn parse(source: &str, parser: &dyn ExpressionParser) -> Result<Formula> {
        let expression = parser
            .parse(source)
            .map_err(|cause| EngineError::FormulaParse {
                expression: source.to_string(),
                cause,
            })?;

        let mut references: Vec<Position> = expression
            .referenced_cells()
            .into_iter()
            .filter(Position::is_valid)
            .collect();
        references.sort_unstable();
        references.dedup();

        Ok(Formula {
            expression,
            references,
        })
    }

    /// Evaluate against the given cells. Computation errors come back as
    /// [`Value::Error`].
    pub fn evaluate(&self, lookup: &dyn CellLookup) -> Value {
        match self.expression.evaluate(lookup) {
            Ok(n) => Value::Number(n),
            Err(e) => Value::Error(e),
        }
    }

    /// The canonical text of the expression, without the formula marker.
    pub fn expression(&self) -> String {
        self.expression.render()
    }

    /// Valid referenced positions, sorted and without duplicates.
    pub fn referenced_cells(&self) -> &[Position] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FormulaError, RhaiParser};

    struct NoCells;

    impl CellLookup for NoCells {
        fn lookup(&self, _pos: Position) -> Option<Value> {
            None
        }
    }

    #[test]
    fn test_references_are_sorted_deduplicated_and_valid() {
        let formula = Formula::parse("C1 + A2 + ZZZZ9 + A2 + B1", &RhaiParser::new()).unwrap();
        assert_eq!(
            formula.referenced_cells(),
            &[Position::new(0, 1), Position::new(0, 2), Position::new(1, 0)]
        );
    }

    #[test]
    fn test_parse_error_wraps_cause() {
        let err = Formula::parse("1 + * 2", &RhaiParser::new()).unwrap_err();
        match &err {
            EngineError::FormulaParse { expression, .. } => assert_eq!(expression, "1 + * 2"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_evaluate_returns_error_values() {
        let formula = Formula::parse("1 / A1", &RhaiParser::new()).unwrap();
        assert_eq!(formula.evaluate(&NoCells), Value::Error(FormulaError::Div0));
        assert_eq!(formula.expression(), "1/A1");
    }
}
