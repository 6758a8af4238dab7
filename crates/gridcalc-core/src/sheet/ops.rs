//! Editing and reading cells, with graph upkeep and lazy evaluation.

use gridcalc_engine::engine::{CellLookup, Formula, Position, Value};

use super::cell::{Cell, CellContent, CellView};
use super::{Sheet, graph};
use crate::error::{Result, SheetError};

impl Sheet {
    /// Set cell contents from input text.
    ///
    /// Writing the text the cell already shows is a no-op. A formula that
    /// would close a dependency cycle, or that does not parse, is rejected and
    /// the sheet is left exactly as it was.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        Self::check_position(pos)?;

        match self.stored(pos) {
            Some(cell) if cell.content.text(&self.config) == text => return Ok(()),
            None if text.is_empty() => return Ok(()),
            _ => {}
        }

        let content = self.classify(text)?;
        if let CellContent::Formula { formula, .. } = &content
            && graph::creates_cycle(pos, formula.referenced_cells(), |p| self.references_of(p))
        {
            log::debug!("rejected formula for {pos}: circular dependency");
            return Err(SheetError::CircularDependency(pos));
        }

        self.commit(pos, content);
        log::debug!("set {pos} to {text:?}");
        Ok(())
    }

    /// Clear the specified cell.
    ///
    /// The cell leaves storage unless other formulas still read it, in which
    /// case it stays behind as an empty placeholder.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        Self::check_position(pos)?;
        if self.stored(pos).is_some() {
            self.commit(pos, CellContent::Empty);
            log::debug!("cleared {pos}");
        }
        Ok(())
    }

    /// Look up a stored cell.
    pub fn cell(&self, pos: Position) -> Result<Option<CellView<'_>>> {
        Self::check_position(pos)?;
        Ok(self
            .stored(pos)
            .map(|cell| CellView::new(self, pos, cell)))
    }

    /// Evaluated value at `pos`; absent cells read as empty text.
    pub fn value(&self, pos: Position) -> Result<Value> {
        Self::check_position(pos)?;
        Ok(self.lookup(pos).unwrap_or_default())
    }

    /// Input text at `pos`; absent cells read as empty text.
    pub fn text(&self, pos: Position) -> Result<String> {
        Self::check_position(pos)?;
        Ok(self
            .stored(pos)
            .map(|cell| cell.content.text(&self.config))
            .unwrap_or_default())
    }

    fn classify(&self, text: &str) -> Result<CellContent> {
        let mut chars = text.chars();
        match chars.next() {
            None => Ok(CellContent::Empty),
            Some(marker) if marker == self.config.formula_marker && !chars.as_str().is_empty() => {
                let formula = Formula::parse(chars.as_str(), self.parser.as_ref())?;
                Ok(CellContent::formula(formula))
            }
            Some(_) => Ok(CellContent::Text(text.to_string())),
        }
    }

    /// Install new content at `pos` and bring the graph up to date.
    fn commit(&mut self, pos: Position, content: CellContent) {
        let old_refs: Vec<Position> = self
            .stored(pos)
            .map(|cell| cell.content.referenced_cells().to_vec())
            .unwrap_or_default();
        let new_refs = content.referenced_cells().to_vec();
        let occupied = !content.is_empty();

        for &target in &old_refs {
            if let Some(cell) = self.stored_mut(target) {
                cell.referenced_by.remove(&pos);
            }
            self.remove_if_disposable(target);
        }

        self.cell_or_create(pos).content = content;

        for &target in &new_refs {
            self.cell_or_create(target).referenced_by.insert(pos);
        }

        self.invalidate_from(pos);
        self.set_occupied(pos, occupied);
        if !occupied {
            self.remove_if_disposable(pos);
        }
    }

    /// Drop cached values of `pos` and everything downstream of it.
    fn invalidate_from(&mut self, pos: Position) {
        let affected = graph::dependents_closure(pos, |p| self.dependents_of(p));
        let mut cleared = 0usize;
        for p in &affected {
            if let Some(cell) = self.stored_mut(*p)
                && cell.invalidate()
            {
                cleared += 1;
            }
        }
        log::trace!(
            "invalidated {cleared} cached value(s) across {} cell(s) from {pos}",
            affected.len()
        );
    }

    fn set_occupied(&mut self, pos: Position, occupied: bool) {
        if let Some(row) = self.rows.get_mut(&pos.row) {
            row.set_occupied(pos.col, occupied);
        }
        self.refresh_row_tracking(pos.row);
    }

    fn remove_if_disposable(&mut self, pos: Position) {
        let Some(row) = self.rows.get_mut(&pos.row) else {
            return;
        };
        if row.get(pos.col).is_some_and(Cell::is_disposable) {
            row.remove(pos.col);
            if row.is_unused() {
                self.rows.remove(&pos.row);
            }
            self.refresh_row_tracking(pos.row);
        }
    }

    fn refresh_row_tracking(&mut self, row: i32) {
        if self.rows.get(&row).is_some_and(|r| r.has_content()) {
            self.non_empty_rows.insert(row);
        } else {
            self.non_empty_rows.remove(&row);
        }
    }

    pub(crate) fn references_of(&self, pos: Position) -> Vec<Position> {
        self.stored(pos)
            .map(|cell| cell.content.referenced_cells().to_vec())
            .unwrap_or_default()
    }

    pub(crate) fn dependents_of(&self, pos: Position) -> Vec<Position> {
        self.stored(pos)
            .map(|cell| cell.referenced_by.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Value of a stored cell, evaluating and caching formulas as needed.
    pub(crate) fn cell_value(&self, pos: Position, cell: &Cell) -> Value {
        match &cell.content {
            CellContent::Empty => Value::empty(),
            CellContent::Text(text) => Value::Text(
                text.strip_prefix(self.config.escape_marker)
                    .unwrap_or(text.as_str())
                    .to_string(),
            ),
            CellContent::Formula { formula, cache } => {
                if let Some(value) = cache.get() {
                    return value.clone();
                }
                self.populate_caches(pos);
                cache.get_or_init(|| formula.evaluate(self)).clone()
            }
        }
    }

    /// Evaluate every uncached formula `root` depends on, deepest first, so
    /// that no evaluation has to recurse into another.
    fn populate_caches(&self, root: Position) {
        let order = graph::evaluation_order(root, |p| match self.stored(p).map(Cell::content) {
            Some(CellContent::Formula { formula, cache }) if cache.get().is_none() => {
                Some(formula.referenced_cells().to_vec())
            }
            _ => None,
        });
        for p in &order {
            if let Some(CellContent::Formula { formula, cache }) = self.stored(*p).map(Cell::content) {
                cache.get_or_init(|| formula.evaluate(self));
            }
        }
        log::trace!("evaluated {} formula(s) to read {root}", order.len());
    }
}
