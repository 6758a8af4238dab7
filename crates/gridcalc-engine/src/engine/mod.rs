//! Formula engine API.
//!
//! This module provides everything a sheet needs to evaluate formulas:
//!
//! - [`Position`], [`Size`] - Cell coordinates and A1 notation conversion
//! - [`Value`], [`FormulaError`] - Evaluated values and the error model
//! - [`Expression`], [`ExpressionParser`], [`CellLookup`] - The contract for formula expressions
//! - [`RhaiParser`] - The default, Rhai-backed expression implementation
//! - [`Formula`] - The wrapper stored in formula cells
//! - [`format_number`] - Format values for display

mod deps;
mod eval;
mod expression;
mod format;
mod formula;
mod position;
mod preprocess;
mod value;

pub use deps::{ReferenceToken, extract_references};
pub use eval::{RhaiExpression, RhaiParser, create_engine};
pub use expression::{CellLookup, Expression, ExpressionParser, numeric_operand};
pub use format::{format_number, parse_number};
pub use formula::Formula;
pub use position::{Position, Size};
pub use preprocess::{canonical_expression, promote_integer_literals, strip_comments};
pub use value::{FormulaError, Value};

pub use rhai::Engine;
