//! This crate compiles spiking neural networks into connection lists ready to be handed to a
//! simulator.
//!
//! # Solving Sudoku
//!
//! Each of the 81 cells of the grid is a population of neurons split into 9 digit sub-groups.
//! Sub-groups of a cell inhibit each other, each sub-group inhibits the same digit in the 20 peers
//! of its cell, and every clue is enforced by a block of stimulation neurons exciting its digit.
//!
//! ```rust
//! use sudoku_snn::sudoku::network::SudokuNetwork;
//! use sudoku_snn::sudoku::params::SudokuParams;
//! use sudoku_snn::sudoku::puzzle::Puzzle;
//!
//! let puzzle: Puzzle = "
//!     8........
//!     ..36.....
//!     .7..9.2..
//!     .5...7...
//!     ....457..
//!     ...1...3.
//!     ..1....68
//!     ..85...1.
//!     .9....4.."
//!     .parse()
//!     .unwrap();
//!
//! let network = SudokuNetwork::build(&puzzle, &SudokuParams::with_neurons_per_digit(2)).unwrap();
//!
//! assert_eq!(network.population("Cells").unwrap().size, 81 * 18);
//! assert_eq!(network.population("Stim").unwrap().size, 21 * 30);
//! ```
//!
//! # Balanced Random Networks
//!
//! ```rust
//! use sudoku_snn::sampler::network::{BalancedRandomNetwork, BalancedRandomParams};
//!
//! let params = BalancedRandomParams { n_neurons: 100, seed: 42, ..Default::default() };
//! let network = BalancedRandomNetwork::sample(&params).unwrap();
//!
//! assert_eq!(network.projections.len(), 7);
//! ```

pub mod core;
pub mod error;
pub mod sampler;
pub mod sudoku;
pub mod visualiser;
