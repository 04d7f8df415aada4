//! Core module defining the building blocks shared by every network builder.
//!
//! - [`connection`]: synaptic connections, i.e., `(source, target, weight, delay)` edges
//! - [`layout`]: the 9x9 grid of cells, their node blocks, digit sub-groups and peers
//! - [`projection`]: populations and labelled groups of connections handed to a simulator
//!
//! # Examples
//!
//! ```
//! use sudoku_snn::core::layout::{Cell, CellLayout};
//!
//! // A cell of 45 neurons, i.e., 5 neurons per digit
//! let layout = CellLayout::build(45).unwrap();
//! let cell = Cell::new(4, 7).unwrap();
//!
//! assert_eq!(layout.n_per_digit(), 5);
//! assert_eq!(layout.base(&cell), (7 * 9 + 4) * 45);
//! assert_eq!(layout.digit_range(&cell, 2), layout.base(&cell) + 10..layout.base(&cell) + 15);
//! assert_eq!(cell.peers().count(), 20);
//! ```
pub mod connection;
pub mod layout;
pub mod projection;

/// Side length of the Sudoku grid.
pub const GRID_SIZE: usize = 9;
/// Side length of a box of the Sudoku grid.
pub const BOX_SIZE: usize = 3;
/// Number of cells in the Sudoku grid.
pub const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;
/// Number of candidate digits, i.e., of sub-groups in a cell.
pub const NUM_DIGITS: usize = 9;
/// Number of peers of any cell (8 in its row, 8 in its column, 4 more in its box).
pub const NUM_PEERS: usize = 20;
/// Minimum number of cell nodes to consider parallel generation.
pub const MIN_PARALLEL_NODES: usize = 10_000;
