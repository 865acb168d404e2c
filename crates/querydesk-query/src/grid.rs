//! Result grid rendering
//!
//! Maps returned rows back onto the slot layout: one grid column per slot,
//! in slot order, regardless of each slot's show flag. Hidden slots render
//! as blank cells rather than being omitted.

use crate::spec::ColumnSpec;
use querydesk_core::{Row, Value};

/// Display surface a form shell implements.
///
/// An execute cycle emits one clear instruction, then one cell instruction
/// per (row, slot) of the new grid. The clear always arrives first, so a
/// smaller result never leaves residue from a larger predecessor.
pub trait DisplaySurface {
    /// Remove every previously rendered result cell
    fn clear_results(&mut self);

    /// Place text at (row, slot)
    fn set_cell(&mut self, row: usize, slot: usize, text: &str);
}

/// Cell text for a value; NULL collapses to a blank cell
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Render rows onto the slot layout.
///
/// Cell = the row's value under the slot's field, blank when the row does
/// not carry that field. Column order follows slot order, not projection
/// order.
pub fn render_grid(slots: &[ColumnSpec], rows: &[Row]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            slots
                .iter()
                .map(|slot| {
                    row.get_by_name(&slot.field)
                        .map(cell_text)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

/// Repaint a surface: clear, then emit every cell of the new grid
pub fn paint(surface: &mut dyn DisplaySurface, slots: &[ColumnSpec], rows: &[Row]) {
    surface.clear_results();
    for (row_idx, cells) in render_grid(slots, rows).iter().enumerate() {
        for (slot_idx, text) in cells.iter().enumerate() {
            surface.set_cell(row_idx, slot_idx, text);
        }
    }
}
