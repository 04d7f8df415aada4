//! Compiler from a Sudoku puzzle to the connections of a constraint network.
//!
//! Each cell is a winner-take-all circuit: its digit sub-groups inhibit one another, and each digit
//! sub-group inhibits the same digit in the 20 peers of the cell. Clues are encoded as
//! stimulation blocks exciting the digit sub-group of the clued cell.
use itertools::iproduct;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::connection::Connection;
use crate::core::layout::{Cell, CellLayout};
use crate::core::MIN_PARALLEL_NODES;
use crate::error::SNNError;
use crate::sudoku::params::SudokuParams;
use crate::sudoku::puzzle::Puzzle;

/// The connections compiled from a puzzle.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ConstraintGraph {
    /// Inhibition between the digit sub-groups of each cell.
    pub intra_cell: Vec<Connection>,
    /// Inhibition between the same digit sub-groups of peer cells.
    pub inter_cell: Vec<Connection>,
    /// Excitation from the stimulation blocks to the clued digit sub-groups.
    pub stimulation: Vec<Connection>,
    /// Number of stimulation blocks, one per clue.
    pub num_stim_blocks: usize,
}

impl ConstraintGraph {
    /// All inhibitory connections, within cells first.
    pub fn inhibition(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.intra_cell.iter().chain(self.inter_cell.iter())
    }

    /// The number of inhibitory connections.
    pub fn num_inhibitory(&self) -> usize {
        self.intra_cell.len() + self.inter_cell.len()
    }
}

/// Generates the connections of the Sudoku network for a fixed cell layout and synapse parameters.
#[derive(Debug, PartialEq, Clone)]
pub struct ConstraintCompiler {
    layout: CellLayout,
    n_stim: usize,
    weight_cell: f64,
    weight_stim: f64,
    delay: f64,
    parallel: bool,
}

impl ConstraintCompiler {
    /// Create a compiler from (validated) parameters.
    /// Generation runs in parallel over cells if the network has at least
    /// [`MIN_PARALLEL_NODES`] cell nodes.
    pub fn build(params: &SudokuParams) -> Result<Self, SNNError> {
        let layout = params.layout()?;
        Ok(ConstraintCompiler {
            layout,
            n_stim: params.n_stim,
            weight_cell: params.weight_cell,
            weight_stim: params.weight_stim,
            delay: params.delay,
            parallel: layout.num_nodes() >= MIN_PARALLEL_NODES,
        })
    }

    /// Force parallel (or sequential) generation. The output does not depend on it.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    pub fn n_stim(&self) -> usize {
        self.n_stim
    }

    /// Inhibition within one cell: every node inhibits every node of the other digit sub-groups.
    /// Pairs within the same sub-group (self-loops included) are left out.
    pub fn cell_inhibition(&self, cell: &Cell) -> impl Iterator<Item = Connection> + '_ {
        let base = self.layout.base(cell);
        let n_cell = self.layout.n_cell();
        iproduct!(0..n_cell, 0..n_cell)
            .filter(move |&(i, j)| self.layout.digit_of(i) != self.layout.digit_of(j))
            .map(move |(i, j)| Connection::new(base + i, base + j, self.weight_cell, self.delay))
    }

    /// Inhibition from a cell to another: every node inhibits all the nodes of the same digit
    /// sub-group in the destination cell.
    pub fn pair_inhibition(
        &self,
        source: &Cell,
        dest: &Cell,
    ) -> impl Iterator<Item = Connection> + '_ {
        let base_source = self.layout.base(source);
        let base_dest = self.layout.base(dest);
        (0..self.layout.n_cell()).flat_map(move |i| {
            self.layout
                .local_digit_range(self.layout.digit_of(i))
                .map(move |j| {
                    Connection::new(base_source + i, base_dest + j, self.weight_cell, self.delay)
                })
        })
    }

    /// Inhibition from a cell to each of its peers.
    pub fn peer_inhibition(&self, cell: &Cell) -> impl Iterator<Item = Connection> + '_ {
        let source = *cell;
        source
            .peers()
            .flat_map(move |dest| self.pair_inhibition(&source, &dest))
    }

    /// Inhibition within every cell of the grid.
    pub fn intra_cell_inhibition(&self) -> Vec<Connection> {
        self.for_each_cell(|cell| self.cell_inhibition(cell).collect())
    }

    /// Inhibition between every ordered pair of peer cells.
    pub fn inter_cell_inhibition(&self) -> Vec<Connection> {
        self.for_each_cell(|cell| self.peer_inhibition(cell).collect())
    }

    /// Excitation encoding the clues of a puzzle.
    /// Returns the connections and the number of stimulation blocks; block `s` (in the order of
    /// [`Puzzle::clues`]) owns the stimulation nodes `[s * n_stim, (s + 1) * n_stim)`.
    pub fn stimulation(&self, puzzle: &Puzzle) -> (Vec<Connection>, usize) {
        let (weight, delay) = (self.weight_stim, self.delay);
        let connections = puzzle
            .clues()
            .enumerate()
            .flat_map(|(block, (cell, digit))| {
                let stim_base = block * self.n_stim;
                iproduct!(
                    stim_base..stim_base + self.n_stim,
                    self.layout.digit_range(&cell, digit as usize - 1)
                )
                .map(move |(i, j)| Connection::new(i, j, weight, delay))
            })
            .collect();
        (connections, puzzle.num_clues())
    }

    /// Compile a puzzle into the connections of the constraint network.
    pub fn compile(&self, puzzle: &Puzzle) -> ConstraintGraph {
        log::info!("Setting up cell inhibition...");
        let intra_cell = self.intra_cell_inhibition();
        log::debug!("{} intra-cell connections", intra_cell.len());

        log::info!("Setting up inhibition between cells...");
        let inter_cell = self.inter_cell_inhibition();
        log::debug!("{} inter-cell connections", inter_cell.len());

        log::info!("Fixing initial numbers...");
        let (stimulation, num_stim_blocks) = self.stimulation(puzzle);
        log::debug!(
            "{} stimulation connections from {} blocks",
            stimulation.len(),
            num_stim_blocks
        );

        ConstraintGraph {
            intra_cell,
            inter_cell,
            stimulation,
            num_stim_blocks,
        }
    }

    /// Concatenate the connections generated for each cell, in the order of [`Cell::all`].
    fn for_each_cell<F>(&self, generate: F) -> Vec<Connection>
    where
        F: Fn(&Cell) -> Vec<Connection> + Sync,
    {
        let cells: Vec<Cell> = Cell::all().collect();
        if self.parallel {
            cells.par_iter().flat_map_iter(|cell| generate(cell)).collect()
        } else {
            cells.iter().flat_map(|cell| generate(cell)).collect()
        }
    }
}
