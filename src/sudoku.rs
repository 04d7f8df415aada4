//! Sudoku-solving spiking network.
//!
//! - [`puzzle`]: puzzles, presets and their sources (JSON files, 81-character strings)
//! - [`params`]: sizes, weights, delay and rates of the network
//! - [`compiler`]: generation of the inhibitory constraint connections and of the clue stimulation
//! - [`network`]: assembly into populations and projections
//!
//! # Examples
//!
//! ```
//! use sudoku_snn::sudoku::compiler::ConstraintCompiler;
//! use sudoku_snn::sudoku::params::SudokuParams;
//! use sudoku_snn::sudoku::puzzle::{Preset, Puzzle};
//!
//! let compiler = ConstraintCompiler::build(&SudokuParams::default()).unwrap();
//! let graph = compiler.compile(&Puzzle::preset(Preset::WorldsHardest));
//!
//! // 45 neurons per cell, 5 per digit
//! assert_eq!(graph.intra_cell.len(), 81 * 1800);
//! assert_eq!(graph.inter_cell.len(), 81 * 20 * 45 * 5);
//! // 21 clues, each stimulated by a block of 30 neurons
//! assert_eq!(graph.num_stim_blocks, 21);
//! assert_eq!(graph.stimulation.len(), 21 * 30 * 5);
//! ```
pub mod compiler;
pub mod network;
pub mod params;
pub mod puzzle;
