//! Cell data structures.
//!
//! - [`CellContent`] - What a cell holds (empty, text, or formula with its cache)
//! - [`Cell`] - Content plus the inverse dependency edges
//! - [`CellView`] - Read-only handle to a stored cell

use std::cell::OnceCell;
use std::collections::BTreeSet;

use gridcalc_engine::engine::{Formula, Position, Value};

use super::Sheet;
use crate::config::SheetConfig;

/// The content stored in a cell.
#[derive(Debug, Default)]
pub enum CellContent {
    #[default]
    Empty,
    Text(String),
    Formula {
        formula: Formula,
        /// Filled on first read, emptied when anything upstream changes.
        cache: OnceCell<Value>,
    },
}

impl CellContent {
    pub fn formula(formula: Formula) -> CellContent {
        CellContent::Formula {
            formula,
            cache: OnceCell::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    /// The text a user would type to reproduce this content.
    pub fn text(&self, config: &SheetConfig) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(text) => text.clone(),
            CellContent::Formula { formula, .. } => {
                format!("{}{}", config.formula_marker, formula.expression())
            }
        }
    }

    pub fn referenced_cells(&self) -> &[Position] {
        match self {
            CellContent::Formula { formula, .. } => formula.referenced_cells(),
            _ => &[],
        }
    }
}

/// A cell in the sheet.
///
/// Outgoing edges are the formula's referenced cells; `referenced_by` holds
/// the incoming ones. The sheet keeps both sides in sync.
#[derive(Debug, Default)]
pub struct Cell {
    pub(crate) content: CellContent,
    pub(crate) referenced_by: BTreeSet<Position>,
}

impl Cell {
    pub fn content(&self) -> &CellContent {
        &self.content
    }

    pub fn is_referenced(&self) -> bool {
        !self.referenced_by.is_empty()
    }

    /// A cell may leave storage once nothing is stored in it and nothing reads it.
    pub(crate) fn is_disposable(&self) -> bool {
        self.content.is_empty() && !self.is_referenced()
    }

    pub(crate) fn invalidate(&mut self) -> bool {
        match &mut self.content {
            CellContent::Formula { cache, .. } => cache.take().is_some(),
            _ => false,
        }
    }
}

/// Read-only handle to a cell stored in a [`Sheet`].
#[derive(Clone, Copy)]
pub struct CellView<'a> {
    sheet: &'a Sheet,
    pos: Position,
    cell: &'a Cell,
}

impl<'a> CellView<'a> {
    pub(crate) fn new(sheet: &'a Sheet, pos: Position, cell: &'a Cell) -> Self {
        CellView { sheet, pos, cell }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// The evaluated value; formulas are computed and cached on first read.
    pub fn value(&self) -> Value {
        self.sheet.cell_value(self.pos, self.cell)
    }

    pub fn text(&self) -> String {
        self.cell.content.text(self.sheet.config())
    }

    /// Referenced positions, sorted and without duplicates.
    pub fn referenced_cells(&self) -> &'a [Position] {
        self.cell.content.referenced_cells()
    }

    pub fn is_referenced(&self) -> bool {
        self.cell.is_referenced()
    }

    /// Positions of the formulas that read this cell.
    pub fn dependents(&self) -> impl Iterator<Item = Position> + 'a {
        self.cell.referenced_by.iter().copied()
    }

    pub fn has_cached_value(&self) -> bool {
        match &self.cell.content {
            CellContent::Formula { cache, .. } => cache.get().is_some(),
            _ => false,
        }
    }

    pub fn content(&self) -> &'a CellContent {
        &self.cell.content
    }
}

impl std::fmt::Debug for CellView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellView")
            .field("pos", &self.pos)
            .field("cell", self.cell)
            .finish()
    }
}
