//! Evaluated cell values and the formula error model.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::format::format_number;

/// A computation error produced by evaluating a formula.
///
/// These are values, not failures: they are cached and shown in the cell,
/// and a formula reading an erroring cell yields the same error.
#[derive(Error, Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum FormulaError {
    /// Dangling or out-of-range reference.
    #[error("#REF!")]
    Ref,
    /// Operand is not a number.
    #[error("#VALUE!")]
    Value,
    /// Division by zero.
    #[error("#DIV/0!")]
    Div0,
}

/// The result of reading a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Text(String),
    Error(FormulaError),
}

impl Value {
    pub fn empty() -> Value {
        Value::Text(String::new())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<FormulaError> {
        match self {
            Value::Error(e) => Some(*e),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<FormulaError> for Value {
    fn from(e: FormulaError) -> Self {
        Value::Error(e)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Error(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_strings() {
        assert_eq!(FormulaError::Ref.to_string(), "#REF!");
        assert_eq!(FormulaError::Value.to_string(), "#VALUE!");
        assert_eq!(FormulaError::Div0.to_string(), "#DIV/0!");
        assert_eq!(Value::from(FormulaError::Div0).to_string(), "#DIV/0!");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(0.25).to_string(), "0.25");
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::empty().to_string(), "");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(2.5).as_number(), Some(2.5));
        assert_eq!(Value::from("2.5").as_number(), None);
        assert_eq!(
            Value::from(FormulaError::Ref).as_error(),
            Some(FormulaError::Ref)
        );
        assert_eq!(Value::from(1.0).as_error(), None);
    }
}
