//! Rhai-backed formula expressions.
//!
//! Formulas are compiled as Rhai expressions. Each cell reference in the
//! source (`A1`, `BC12`) is a plain Rhai variable: at evaluation time every
//! reference is resolved to a number and pushed into the scope as a
//! constant, so the Rhai engine never touches the sheet itself. Integer
//! literals are compiled as floats; every number in a sheet is an `f64`.

use rhai::{AST, Dynamic, Engine, EvalAltResult, Scope};
use std::fmt;
use std::sync::Arc;

use super::deps::{ReferenceToken, extract_references};
use super::expression::{CellLookup, Expression, ExpressionParser, numeric_operand};
use super::preprocess::{canonical_expression, promote_integer_literals, strip_comments};
use super::{FormulaError, Position};
use crate::error::ParseFailure;

/// Create a Rhai engine configured for formula evaluation.
pub fn create_engine() -> Engine {
    let mut engine = Engine::new();
    // Formulas are pure expressions; keep them away from stdout.
    engine.on_print(|_| {});
    engine.on_debug(|_, _, _| {});
    engine.set_max_expr_depths(128, 32);
    engine
}

/// Parses formula source into Rhai expressions.
#[derive(Clone)]
pub struct RhaiParser {
    engine: Arc<Engine>,
}

impl RhaiParser {
    pub fn new() -> Self {
        Self::with_engine(create_engine())
    }

    /// Use a caller-configured engine, e.g. one with extra functions registered.
    pub fn with_engine(engine: Engine) -> Self {
        RhaiParser {
            engine: Arc::new(engine),
        }
    }
}

impl Default for RhaiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RhaiParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RhaiParser").finish_non_exhaustive()
    }
}

impl ExpressionParser for RhaiParser {
    fn parse(&self, source: &str) -> Result<Box<dyn Expression>, ParseFailure> {
        let source = strip_comments(source);
        let ast = self
            .engine
            .compile_expression(&promote_integer_literals(&source))?;
        let references = extract_references(&source);
        // One scope binding per distinct name, first occurrence wins.
        let mut seen = std::collections::HashSet::new();
        let bindings = references
            .iter()
            .filter(|token| seen.insert(token.name.clone()))
            .cloned()
            .collect();

        Ok(Box::new(RhaiExpression {
            engine: Arc::clone(&self.engine),
            ast,
            canonical: canonical_expression(&source),
            references,
            bindings,
        }))
    }
}

/// A compiled formula expression.
pub struct RhaiExpression {
    engine: Arc<Engine>,
    ast: AST,
    canonical: String,
    references: Vec<ReferenceToken>,
    bindings: Vec<ReferenceToken>,
}

impl fmt::Debug for RhaiExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RhaiExpression")
            .field("canonical", &self.canonical)
            .field("references", &self.references)
            .finish_non_exhaustive()
    }
}

impl Expression for RhaiExpression {
    fn referenced_cells(&self) -> Vec<Position> {
        self.references.iter().map(|token| token.position).collect()
    }

    fn evaluate(&self, lookup: &dyn CellLookup) -> Result<f64, FormulaError> {
        let mut scope = Scope::new();
        for token in &self.bindings {
            let operand = numeric_operand(lookup, token.position)?;
            scope.push_constant(token.name.as_str(), operand);
        }

        let result = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut scope, &self.ast)
            .map_err(|err| classify_eval_error(&err))?;

        let number = if let Ok(n) = result.as_float() {
            n
        } else if let Ok(n) = result.as_int() {
            n as f64
        } else {
            return Err(FormulaError::Value);
        };

        if number.is_finite() {
            Ok(number)
        } else {
            Err(FormulaError::Div0)
        }
    }

    fn render(&self) -> String {
        self.canonical.clone()
    }
}

/// Map a Rhai runtime failure onto the spreadsheet error model.
fn classify_eval_error(err: &EvalAltResult) -> FormulaError {
    match err {
        EvalAltResult::ErrorArithmetic(message, _) if message.starts_with("Division by zero") => {
            FormulaError::Div0
        }
        EvalAltResult::ErrorVariableNotFound(..) => FormulaError::Ref,
        _ => FormulaError::Value,
    }
}
