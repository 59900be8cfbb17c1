//! Grid cells and their mapping onto display coordinates
//!
//! Cells are signed: a freshly reset snake on a narrow grid may trail one
//! segment past the left edge until its first move.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Playing field dimensions in cells, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Every cell of the grid, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}

/// Converts cells to pixel coordinates for a given square cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    cell_size: u32,
}

impl GridGeometry {
    pub fn new(cell_size: u32) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Top-left pixel of a cell
    pub fn cell_to_pixel(&self, cell: Position) -> (i32, i32) {
        let size = self.cell_size as i32;
        (cell.x * size, cell.y * size)
    }

    /// Pixel extent of a whole grid
    pub fn pixel_size(&self, grid: Grid) -> (u32, u32) {
        (
            grid.width as u32 * self.cell_size,
            grid.height as u32 * self.cell_size,
        )
    }
}
