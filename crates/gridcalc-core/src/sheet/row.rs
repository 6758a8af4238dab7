//! Sparse row storage.

use std::collections::{BTreeSet, HashMap};
use std::io::{self, Write};

use super::cell::Cell;

/// Sparse storage for one row of cells.
#[derive(Debug, Default)]
pub(crate) struct Row {
    cells: HashMap<i32, Cell>,
    /// Columns holding non-empty cells; drives the printable width.
    non_empty: BTreeSet<i32>,
}

impl Row {
    pub(crate) fn get(&self, col: i32) -> Option<&Cell> {
        self.cells.get(&col)
    }

    pub(crate) fn get_mut(&mut self, col: i32) -> Option<&mut Cell> {
        self.cells.get_mut(&col)
    }

    pub(crate) fn get_or_create(&mut self, col: i32) -> &mut Cell {
        self.cells.entry(col).or_default()
    }

    pub(crate) fn remove(&mut self, col: i32) -> Option<Cell> {
        self.non_empty.remove(&col);
        self.cells.remove(&col)
    }

    pub(crate) fn set_occupied(&mut self, col: i32, occupied: bool) {
        if occupied {
            self.non_empty.insert(col);
        } else {
            self.non_empty.remove(&col);
        }
    }

    pub(crate) fn has_content(&self) -> bool {
        !self.non_empty.is_empty()
    }

    pub(crate) fn is_unused(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns needed to print every non-empty cell in the row.
    pub(crate) fn width(&self) -> usize {
        self.non_empty
            .last()
            .map_or(0, |&col| col as usize + 1)
    }

    /// Write one tab-separated line, rendering each stored cell with `render`.
    pub(crate) fn write_line<W, F>(&self, out: &mut W, cols: usize, render: F) -> io::Result<()>
    where
        W: Write + ?Sized,
        F: Fn(i32, &Cell) -> String,
    {
        for col in 0..cols {
            if col > 0 {
                out.write_all(b"\t")?;
            }
            if let Some(cell) = self.cells.get(&(col as i32)) {
                out.write_all(render(col as i32, cell).as_bytes())?;
            }
        }
        out.write_all(b"\n")
    }

    /// Write a line for a row with no stored cells.
    pub(crate) fn write_empty_line<W: Write + ?Sized>(out: &mut W, cols: usize) -> io::Result<()> {
        for _ in 1..cols {
            out.write_all(b"\t")?;
        }
        out.write_all(b"\n")
    }
}
