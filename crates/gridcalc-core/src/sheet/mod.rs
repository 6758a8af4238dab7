//! Sheet state and logic.
//!
//! A [`Sheet`] owns every cell. Dependency edges between cells are stored
//! as positions, so they never own or borrow the cells they name.

mod cell;
pub mod graph;
mod ops;
mod print;
mod row;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use gridcalc_engine::engine::{CellLookup, ExpressionParser, Position, RhaiParser, Value};

use crate::config::SheetConfig;
use crate::error::{Result, SheetError};

pub use cell::{Cell, CellContent, CellView};
use row::Row;

/// Sparse spreadsheet grid.
pub struct Sheet {
    rows: HashMap<i32, Row>,
    /// Rows holding at least one non-empty cell; drives the printable height.
    non_empty_rows: BTreeSet<i32>,
    config: SheetConfig,
    parser: Box<dyn ExpressionParser>,
}

impl Sheet {
    /// An empty sheet with default markers and Rhai formulas.
    pub fn new() -> Self {
        Self::with_config(SheetConfig::default())
    }

    pub fn with_config(config: SheetConfig) -> Self {
        Self::with_parser(config, Box::new(RhaiParser::new()))
    }

    /// Use a custom expression implementation for formulas.
    pub fn with_parser(config: SheetConfig, parser: Box<dyn ExpressionParser>) -> Self {
        Sheet {
            rows: HashMap::new(),
            non_empty_rows: BTreeSet::new(),
            config,
            parser,
        }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Number of stored cells, including empty placeholders kept for their
    /// dependents.
    pub fn len(&self) -> usize {
        self.rows.values().map(Row::cell_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_position(pos: Position) -> Result<()> {
        if pos.is_valid() {
            Ok(())
        } else {
            Err(SheetError::InvalidPosition(pos))
        }
    }

    pub(crate) fn stored(&self, pos: Position) -> Option<&Cell> {
        self.rows.get(&pos.row)?.get(pos.col)
    }

    pub(crate) fn stored_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.rows.get_mut(&pos.row)?.get_mut(pos.col)
    }

    /// Materialize an empty cell at `pos` if none is stored there.
    pub(crate) fn cell_or_create(&mut self, pos: Position) -> &mut Cell {
        self.rows.entry(pos.row).or_default().get_or_create(pos.col)
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sheet")
            .field("cells", &self.len())
            .field("printable_size", &self.printable_size())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CellLookup for Sheet {
    fn lookup(&self, pos: Position) -> Option<Value> {
        let cell = self.stored(pos)?;
        Some(self.cell_value(pos, cell))
    }
}
