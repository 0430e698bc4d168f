// third-party imports
use serde::Deserialize;
use strum::{Display, EnumString};

// ---

/// Address in the unbounded text space, before wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LogicalPosition {
    pub row: usize,
    pub col: usize,
}

impl LogicalPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Address on the character grid, `col` is always below the grid width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PhysicalPosition {
    pub row: usize,
    pub col: usize,
}

impl PhysicalPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// ---

/// How logical columns beyond the grid width are placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MapMode {
    /// Columns are written as is, anything past the right edge is clipped.
    None,
    /// Columns continue on the next row.
    #[default]
    WrapAround,
}

/// Translates logical positions into physical ones for a given grid width.
///
/// The width is never stored, callers pass the current one on each call so
/// that a resize takes effect on the very next mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mapper {
    mode: MapMode,
}

impl Mapper {
    pub fn new(mode: MapMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MapMode {
        self.mode
    }

    pub fn row(&self, row: usize, col: usize, width: usize) -> usize {
        match self.mode {
            MapMode::None => row,
            MapMode::WrapAround => map_row(row, col, width),
        }
    }

    pub fn col(&self, row: usize, col: usize, width: usize) -> usize {
        match self.mode {
            MapMode::None => col,
            MapMode::WrapAround => map_col(row, col, width),
        }
    }

    pub fn map(&self, pos: LogicalPosition, width: usize) -> PhysicalPosition {
        PhysicalPosition {
            row: self.row(pos.row, pos.col, width),
            col: self.col(pos.row, pos.col, width),
        }
    }

    /// Number of physical rows taken by a logical line of `len` cells, at least one.
    pub fn rows_spanned(&self, len: usize, width: usize) -> usize {
        match self.mode {
            MapMode::None => 1,
            MapMode::WrapAround => map_row(0, len.saturating_sub(1), width) + 1,
        }
    }
}

/// Physical row of a logical position in wrap-around mode.
pub fn map_row(row: usize, col: usize, width: usize) -> usize {
    row + col / width.max(1)
}

/// Physical column of a logical position in wrap-around mode.
pub fn map_col(_row: usize, col: usize, width: usize) -> usize {
    col % width.max(1)
}
