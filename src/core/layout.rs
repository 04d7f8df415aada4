//! Layout of the Sudoku grid onto a flat population of neurons.
//!
//! Cell `(x, y)` owns the contiguous block of `n_cell` nodes starting at
//! `(y * 9 + x) * n_cell`. The block is split into 9 digit sub-groups of `n_cell / 9` nodes;
//! sub-group `d` (0-indexed, i.e., digit `d + 1`) occupies the local indices
//! `[d * n_N, (d + 1) * n_N)`.
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::core::{BOX_SIZE, GRID_SIZE, NUM_CELLS, NUM_DIGITS};
use crate::error::SNNError;

/// A cell of the Sudoku grid, `x` is the column and `y` the row counted from the bottom.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    /// Create a new cell, returns an error if it falls outside of the grid.
    pub fn new(x: usize, y: usize) -> Result<Self, SNNError> {
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return Err(SNNError::OutOfBounds(format!(
                "Cell ({}, {}) is outside of the {}x{} grid",
                x, y, GRID_SIZE, GRID_SIZE
            )));
        }
        Ok(Cell { x, y })
    }

    /// All cells of the grid, `x` in the outer loop and `y` in the inner loop.
    pub fn all() -> impl Iterator<Item = Cell> {
        iproduct!(0..GRID_SIZE, 0..GRID_SIZE).map(|(x, y)| Cell { x, y })
    }

    /// The position of the cell block in the population.
    pub fn index(&self) -> usize {
        self.y * GRID_SIZE + self.x
    }

    /// Inverse of [`Cell::index`].
    pub fn from_index(index: usize) -> Result<Self, SNNError> {
        if index >= NUM_CELLS {
            return Err(SNNError::OutOfBounds(format!(
                "Cell index {} exceeds the {} cells of the grid",
                index, NUM_CELLS
            )));
        }
        Ok(Cell {
            x: index % GRID_SIZE,
            y: index / GRID_SIZE,
        })
    }

    /// Returns true if both cells are distinct and share a row, a column or a box.
    pub fn is_peer(&self, other: &Cell) -> bool {
        self != other
            && (self.x == other.x
                || self.y == other.y
                || (self.x / BOX_SIZE == other.x / BOX_SIZE
                    && self.y / BOX_SIZE == other.y / BOX_SIZE))
    }

    /// The peers of the cell: its row mates, then its column mates, then the box mates sharing
    /// neither the row nor the column (the others were already listed).
    /// Every peer appears exactly once.
    pub fn peers(&self) -> impl Iterator<Item = Cell> {
        let Cell { x, y } = *self;
        let row = (0..GRID_SIZE).filter(move |&r| r != x).map(move |r| Cell { x: r, y });
        let column = (0..GRID_SIZE).filter(move |&c| c != y).map(move |c| Cell { x, y: c });
        let (box_x, box_y) = (BOX_SIZE * (x / BOX_SIZE), BOX_SIZE * (y / BOX_SIZE));
        let square = iproduct!(box_x..box_x + BOX_SIZE, box_y..box_y + BOX_SIZE)
            .filter(move |&(r, c)| r != x && c != y)
            .map(|(r, c)| Cell { x: r, y: c });
        row.chain(column).chain(square)
    }
}

/// How many neurons a cell has and how they split into digit sub-groups.
/// Serialized as the number of neurons per cell, which is validated again on deserialization.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CellLayout {
    n_cell: usize,
    n_per_digit: usize,
}

impl CellLayout {
    /// Create a layout of `n_cell` neurons per cell.
    /// Returns an error unless `n_cell` is a positive multiple of 9.
    pub fn build(n_cell: usize) -> Result<Self, SNNError> {
        if n_cell == 0 || n_cell % NUM_DIGITS != 0 {
            return Err(SNNError::InvalidCellSize { n_cell });
        }
        Ok(CellLayout {
            n_cell,
            n_per_digit: n_cell / NUM_DIGITS,
        })
    }

    /// Number of neurons per cell.
    pub fn n_cell(&self) -> usize {
        self.n_cell
    }

    /// Number of neurons per digit sub-group.
    pub fn n_per_digit(&self) -> usize {
        self.n_per_digit
    }

    /// Number of neurons in the whole grid.
    pub fn num_nodes(&self) -> usize {
        NUM_CELLS * self.n_cell
    }

    /// The first node of the cell block.
    pub fn base(&self, cell: &Cell) -> usize {
        cell.index() * self.n_cell
    }

    /// The digit sub-group (0-indexed) of a local index.
    pub fn digit_of(&self, local: usize) -> usize {
        local / self.n_per_digit
    }

    /// Local indices of the digit sub-group `digit` (0-indexed).
    pub fn local_digit_range(&self, digit: usize) -> Range<usize> {
        self.n_per_digit * digit..self.n_per_digit * (digit + 1)
    }

    /// Global node ids of the digit sub-group `digit` (0-indexed) of a cell.
    pub fn digit_range(&self, cell: &Cell, digit: usize) -> Range<usize> {
        let base = self.base(cell);
        let local = self.local_digit_range(digit);
        base + local.start..base + local.end
    }

    /// Map a node id back to its cell and its digit sub-group (0-indexed).
    pub fn decode(&self, node: usize) -> Result<(Cell, usize), SNNError> {
        if node >= self.num_nodes() {
            return Err(SNNError::OutOfBounds(format!(
                "Node {} exceeds the {} nodes of the cell population",
                node,
                self.num_nodes()
            )));
        }
        let cell = Cell::from_index(node / self.n_cell)?;
        Ok((cell, self.digit_of(node % self.n_cell)))
    }
}

impl TryFrom<usize> for CellLayout {
    type Error = SNNError;

    fn try_from(n_cell: usize) -> Result<Self, Self::Error> {
        CellLayout::build(n_cell)
    }
}

impl From<CellLayout> for usize {
    fn from(layout: CellLayout) -> Self {
        layout.n_cell
    }
}
