//! Tab-separated printing of values and texts.

use std::io::Write;

use gridcalc_engine::engine::{Position, Size};

use super::Sheet;
use super::cell::Cell;
use super::row::Row;
use crate::error::Result;

impl Sheet {
    /// Smallest rectangle from the origin that holds every non-empty cell.
    pub fn printable_size(&self) -> Size {
        let Some(&last_row) = self.non_empty_rows.last() else {
            return Size::default();
        };
        let cols = self.rows.values().map(Row::width).max().unwrap_or(0);
        Size::new(last_row as usize + 1, cols)
    }

    /// Write evaluated values as tab-separated lines.
    pub fn print_values<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.print_with(out, |pos, cell| self.cell_value(pos, cell).to_string())
    }

    /// Write input texts as tab-separated lines.
    pub fn print_texts<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.print_with(out, |_, cell| cell.content.text(&self.config))
    }

    fn print_with<W, F>(&self, out: &mut W, render: F) -> Result<()>
    where
        W: Write + ?Sized,
        F: Fn(Position, &Cell) -> String,
    {
        let size = self.printable_size();
        for row_idx in 0..size.rows {
            let row_idx = row_idx as i32;
            match self.rows.get(&row_idx) {
                Some(row) => row.write_line(out, size.cols, |col, cell| {
                    render(Position::new(row_idx, col), cell)
                })?,
                None => Row::write_empty_line(out, size.cols)?,
            }
        }
        Ok(())
    }
}
