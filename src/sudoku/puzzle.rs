//! Sudoku puzzles, i.e., 9x9 grids of clues.
//!
//! The matrix is stored the way it is written down: row 0 is the top row.
//! Cells are addressed from the bottom, so cell `(x, y)` reads the entry `grid[8 - y][x]`.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::core::layout::Cell;
use crate::core::{GRID_SIZE, NUM_CELLS, NUM_DIGITS};
use crate::error::SNNError;

/// The rows of a puzzle, top row first.
pub type Grid = [[u8; GRID_SIZE]; GRID_SIZE];

/// A Sudoku puzzle, blanks are zeros.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct Puzzle {
    grid: Grid,
}

impl Puzzle {
    /// Create a puzzle from its rows (top row first).
    /// Returns an error if the matrix is not 9x9 or if an entry is not a digit in 0-9.
    pub fn build(rows: Vec<Vec<i64>>) -> Result<Self, SNNError> {
        if rows.len() != GRID_SIZE {
            return Err(SNNError::InvalidPuzzleShape(format!(
                "expected {} rows, got {}",
                GRID_SIZE,
                rows.len()
            )));
        }

        let mut grid = [[0; GRID_SIZE]; GRID_SIZE];
        for (row, values) in rows.iter().enumerate() {
            if values.len() != GRID_SIZE {
                return Err(SNNError::InvalidPuzzleShape(format!(
                    "expected {} columns in row {}, got {}",
                    GRID_SIZE,
                    row,
                    values.len()
                )));
            }
            for (col, &value) in values.iter().enumerate() {
                if !(0..=NUM_DIGITS as i64).contains(&value) {
                    return Err(SNNError::InvalidDigit { row, col, value });
                }
                grid[row][col] = value as u8;
            }
        }

        Ok(Puzzle { grid })
    }

    /// The puzzle without any clue (the "dream" problem).
    pub fn empty() -> Self {
        Puzzle {
            grid: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// One of the built-in puzzles.
    pub fn preset(preset: Preset) -> Self {
        Puzzle {
            grid: preset.grid(),
        }
    }

    /// The clue of a cell, 0 if blank.
    pub fn clue(&self, cell: &Cell) -> u8 {
        self.grid[GRID_SIZE - 1 - cell.y][cell.x]
    }

    /// The clued cells with their digit, `x` in the outer loop and `y` in the inner loop.
    pub fn clues(&self) -> impl Iterator<Item = (Cell, u8)> + '_ {
        Cell::all().filter_map(|cell| match self.clue(&cell) {
            0 => None,
            digit => Some((cell, digit)),
        })
    }

    /// The number of clues.
    pub fn num_clues(&self) -> usize {
        self.grid.iter().flatten().filter(|&&value| value != 0).count()
    }

    /// The rows of the puzzle, top row first.
    pub fn rows(&self) -> &Grid {
        &self.grid
    }

    /// Save the puzzle to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SNNError> {
        let file = File::create(path).map_err(|e| SNNError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| SNNError::IOError(e.to_string()))?;
        writer.flush().map_err(|e| SNNError::IOError(e.to_string()))
    }

    /// Load a puzzle from a JSON file holding the 9 rows.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SNNError> {
        let file = File::open(path).map_err(|e| SNNError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        let rows: Vec<Vec<i64>> =
            serde_json::from_reader(reader).map_err(|e| SNNError::IOError(e.to_string()))?;
        Puzzle::build(rows)
    }
}

impl TryFrom<Vec<Vec<i64>>> for Puzzle {
    type Error = SNNError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Puzzle::build(rows)
    }
}

impl From<Puzzle> for Vec<Vec<i64>> {
    fn from(puzzle: Puzzle) -> Self {
        puzzle
            .grid
            .iter()
            .map(|row| row.iter().map(|&value| value as i64).collect())
            .collect()
    }
}

/// Parse the 81 entries of a puzzle, row by row from the top.
/// Clues are digits, blanks are `0` or `.`, whitespace is ignored.
impl FromStr for Puzzle {
    type Err = SNNError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(pos, c)| match c {
                '.' => Ok(0),
                c => c.to_digit(10).map(|d| d as i64).ok_or_else(|| {
                    SNNError::InvalidParameter(format!(
                        "Unexpected character '{}' at position {} of the puzzle",
                        c, pos
                    ))
                }),
            })
            .collect::<Result<Vec<i64>, SNNError>>()?;

        if values.len() != NUM_CELLS {
            return Err(SNNError::InvalidPuzzleShape(format!(
                "expected {} entries, got {}",
                NUM_CELLS,
                values.len()
            )));
        }

        Puzzle::build(values.chunks(GRID_SIZE).map(|row| row.to_vec()).collect())
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.grid.iter() {
            let line: String = row
                .iter()
                .map(|&value| match value {
                    0 => '.',
                    d => char::from(b'0' + d),
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// The puzzles shipped with the crate.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Preset {
    /// The puzzle used when no other is selected.
    Fallback,
    Diabolical,
    Second,
    Third,
    Fourth,
    Fifth,
    /// The "world's hardest Sudoku" (Arto Inkala, 2012).
    WorldsHardest,
    /// No clue at all.
    Dream,
}

impl Preset {
    /// The preset with the given number, 1 to 6; any other number selects the fallback puzzle.
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Preset::Diabolical,
            2 => Preset::Second,
            3 => Preset::Third,
            4 => Preset::Fourth,
            5 => Preset::Fifth,
            6 => Preset::WorldsHardest,
            _ => Preset::Fallback,
        }
    }

    fn grid(&self) -> Grid {
        match self {
            Preset::Diabolical => [
                [0, 0, 1, 0, 0, 8, 0, 7, 3],
                [0, 0, 5, 6, 0, 0, 0, 0, 1],
                [7, 0, 0, 0, 0, 1, 0, 0, 0],
                [0, 9, 0, 8, 1, 0, 0, 0, 0],
                [5, 3, 0, 0, 0, 0, 0, 4, 6],
                [0, 0, 0, 0, 6, 5, 0, 3, 0],
                [0, 0, 0, 1, 0, 0, 0, 0, 4],
                [8, 0, 0, 0, 0, 9, 3, 0, 0],
                [9, 4, 0, 5, 0, 0, 7, 0, 0],
            ],
            Preset::Second => [
                [2, 0, 0, 0, 0, 6, 0, 3, 0],
                [4, 8, 0, 0, 1, 9, 0, 0, 0],
                [0, 0, 7, 0, 2, 0, 9, 0, 0],
                [0, 0, 0, 3, 0, 0, 0, 9, 0],
                [7, 0, 8, 0, 0, 0, 1, 0, 5],
                [0, 4, 0, 0, 0, 7, 0, 0, 0],
                [0, 0, 4, 0, 9, 0, 6, 0, 0],
                [0, 0, 0, 6, 4, 0, 0, 1, 9],
                [0, 5, 0, 1, 0, 0, 0, 0, 8],
            ],
            Preset::Third => [
                [0, 0, 3, 2, 0, 0, 0, 7, 0],
                [0, 0, 5, 0, 0, 0, 3, 0, 0],
                [0, 0, 8, 9, 7, 0, 0, 5, 0],
                [0, 0, 0, 8, 9, 0, 0, 0, 0],
                [0, 5, 0, 0, 0, 0, 0, 2, 0],
                [0, 0, 0, 0, 6, 1, 0, 0, 0],
                [0, 1, 0, 0, 2, 5, 6, 0, 0],
                [0, 0, 4, 0, 0, 0, 8, 0, 0],
                [0, 9, 0, 0, 0, 7, 5, 0, 0],
            ],
            Preset::Fourth => [
                [0, 1, 0, 0, 0, 0, 0, 0, 2],
                [8, 7, 0, 0, 0, 0, 5, 0, 4],
                [5, 0, 2, 0, 0, 0, 0, 9, 0],
                [0, 5, 0, 4, 0, 9, 0, 0, 1],
                [0, 0, 0, 7, 3, 2, 0, 0, 0],
                [9, 0, 0, 5, 0, 1, 0, 4, 0],
                [0, 2, 0, 0, 0, 0, 4, 0, 8],
                [4, 0, 6, 0, 0, 0, 0, 1, 3],
                [1, 0, 0, 0, 0, 0, 0, 2, 0],
            ],
            Preset::Fifth => [
                [8, 9, 0, 2, 0, 0, 0, 7, 0],
                [0, 0, 0, 0, 8, 0, 0, 0, 0],
                [0, 4, 1, 0, 3, 0, 5, 0, 0],
                [2, 5, 8, 0, 0, 0, 0, 0, 6],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [6, 0, 0, 0, 0, 0, 1, 4, 7],
                [0, 0, 7, 0, 1, 0, 4, 3, 0],
                [0, 0, 0, 0, 2, 0, 0, 0, 0],
                [0, 2, 0, 0, 0, 7, 0, 5, 1],
            ],
            Preset::WorldsHardest => [
                [8, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 3, 6, 0, 0, 0, 0, 0],
                [0, 7, 0, 0, 9, 0, 2, 0, 0],
                [0, 5, 0, 0, 0, 7, 0, 0, 0],
                [0, 0, 0, 0, 4, 5, 7, 0, 0],
                [0, 0, 0, 1, 0, 0, 0, 3, 0],
                [0, 0, 1, 0, 0, 0, 0, 6, 8],
                [0, 0, 8, 5, 0, 0, 0, 1, 0],
                [0, 9, 0, 0, 0, 0, 4, 0, 0],
            ],
            Preset::Fallback => [
                [1, 0, 0, 4, 0, 0, 0, 0, 0],
                [7, 0, 0, 5, 0, 0, 6, 0, 3],
                [0, 0, 0, 0, 3, 0, 4, 2, 0],
                [0, 0, 9, 0, 0, 0, 0, 3, 5],
                [0, 0, 0, 3, 0, 5, 0, 0, 0],
                [6, 3, 0, 0, 0, 0, 1, 0, 0],
                [0, 2, 6, 0, 5, 0, 0, 0, 0],
                [9, 0, 4, 0, 0, 6, 0, 0, 7],
                [0, 0, 0, 0, 0, 8, 0, 0, 2],
            ],
            Preset::Dream => [[0; GRID_SIZE]; GRID_SIZE],
        }
    }
}
