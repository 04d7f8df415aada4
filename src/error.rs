//! Error module for the Sudoku SNN library.
use std::error::Error;
use std::fmt;

use crate::core::NUM_DIGITS;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum SNNError {
    /// Error for a puzzle grid which is not 9x9.
    InvalidPuzzleShape(String),
    /// Error for a clue outside of 0-9, located by its row and column in the puzzle matrix.
    InvalidDigit { row: usize, col: usize, value: i64 },
    /// Error for a number of neurons per cell that cannot be split into digit sub-groups.
    InvalidCellSize { n_cell: usize },
    /// Error for invalid parameters, e.g., negative delays or empty stimulation blocks.
    InvalidParameter(String),
    /// Error for out of bounds access, e.g., a node outside of the cell population.
    OutOfBounds(String),
    /// Error for a platform without a known visualiser executable.
    UnsupportedPlatform(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for SNNError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SNNError::InvalidPuzzleShape(e) => write!(f, "Invalid puzzle shape: {}", e),
            SNNError::InvalidDigit { row, col, value } => write!(
                f,
                "Invalid digit {} at row {}, column {}: must be between 0 and {}",
                value, row, col, NUM_DIGITS
            ),
            SNNError::InvalidCellSize { n_cell } => write!(
                f,
                "Invalid cell size: {} neurons cannot be split into {} non-empty digit groups",
                n_cell, NUM_DIGITS
            ),
            SNNError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            SNNError::OutOfBounds(e) => write!(f, "Index out of bounds: {}", e),
            SNNError::UnsupportedPlatform(e) => write!(f, "Unknown platform: {}", e),
            SNNError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for SNNError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_digit() {
        let error = SNNError::InvalidDigit {
            row: 2,
            col: 7,
            value: 12,
        };
        assert_eq!(
            error.to_string(),
            "Invalid digit 12 at row 2, column 7: must be between 0 and 9"
        );
    }

    #[test]
    fn test_display_invalid_cell_size() {
        let error = SNNError::InvalidCellSize { n_cell: 40 };
        assert!(error.to_string().contains("40 neurons"));
    }
}
