//! Parameters of the Sudoku network, loadable from JSON.
//!
//! Missing fields take their default value, so a configuration file only needs to list what it
//! changes:
//!
//! ```
//! use sudoku_snn::sudoku::params::SudokuParams;
//!
//! let params: SudokuParams = serde_json::from_str(r#"{"n_cell": 90, "delay": 1.0}"#).unwrap();
//! assert_eq!(params.n_cell, 90);
//! assert_eq!(params.n_stim, 30);
//! assert_eq!(params.layout().unwrap().n_per_digit(), 10);
//! ```
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::core::connection::check_synapse;
use crate::core::layout::CellLayout;
use crate::core::NUM_DIGITS;
use crate::error::SNNError;

#[derive(Derivative, Debug, PartialEq, Clone, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default)]
pub struct SudokuParams {
    /// Number of neurons per cell, must be a multiple of 9
    #[derivative(Default(value = "45"))]
    pub n_cell: usize,
    /// Number of neurons in each stimulation block
    #[derivative(Default(value = "30"))]
    pub n_stim: usize,
    /// Weight of the inhibitory connections, within and between cells
    #[derivative(Default(value = "0.2"))]
    pub weight_cell: f64,
    /// Weight of the excitatory connections from the stimulation blocks
    #[derivative(Default(value = "1.0"))]
    pub weight_stim: f64,
    /// Weight of the one-to-one connections from the noise sources
    #[derivative(Default(value = "1.4"))]
    pub weight_noise: f64,
    /// Delay shared by every connection (in ms)
    #[derivative(Default(value = "2.0"))]
    pub delay: f64,
    /// Firing rate of the noise sources (in Hz)
    #[derivative(Default(value = "20.0"))]
    pub noise_rate: f64,
    /// Firing rate of the stimulation sources (in Hz)
    #[derivative(Default(value = "10.0"))]
    pub stim_rate: f64,
}

impl SudokuParams {
    /// Default parameters with `neurons_per_digit` neurons in each digit sub-group.
    pub fn with_neurons_per_digit(neurons_per_digit: usize) -> Self {
        SudokuParams {
            n_cell: neurons_per_digit * NUM_DIGITS,
            ..Default::default()
        }
    }

    /// Number of neurons per digit sub-group (rounded down).
    pub fn neurons_per_digit(&self) -> usize {
        self.n_cell / NUM_DIGITS
    }

    /// Validate the parameters and return the corresponding cell layout.
    pub fn layout(&self) -> Result<CellLayout, SNNError> {
        let layout = CellLayout::build(self.n_cell)?;
        if self.n_stim == 0 {
            return Err(SNNError::InvalidParameter(
                "Stimulation blocks must contain at least one neuron".to_string(),
            ));
        }
        check_synapse(self.weight_cell, self.delay)?;
        check_synapse(self.weight_stim, self.delay)?;
        check_synapse(self.weight_noise, self.delay)?;
        for (name, rate) in [("noise", self.noise_rate), ("stimulation", self.stim_rate)] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(SNNError::InvalidParameter(format!(
                    "The {} rate must be non-negative and finite, got {}",
                    name, rate
                )));
            }
        }
        Ok(layout)
    }

    /// Save the parameters to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SNNError> {
        let file = File::create(path).map_err(|e| SNNError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| SNNError::IOError(e.to_string()))?;
        writer.flush().map_err(|e| SNNError::IOError(e.to_string()))
    }

    /// Load the parameters from a JSON file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SNNError> {
        let file = File::open(path).map_err(|e| SNNError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| SNNError::IOError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default() {
        let params = SudokuParams::default();
        assert_eq!(params, SudokuParams::with_neurons_per_digit(5));
        assert_eq!(params.neurons_per_digit(), 5);
        assert_eq!(params.weight_cell, 0.2);
        assert_eq!(params.delay, 2.0);
        assert!(params.layout().is_ok());
    }

    #[test]
    fn test_layout_invalid() {
        let params = SudokuParams {
            n_cell: 50,
            ..Default::default()
        };
        assert_eq!(params.layout(), Err(SNNError::InvalidCellSize { n_cell: 50 }));

        let params = SudokuParams {
            n_stim: 0,
            ..Default::default()
        };
        assert!(matches!(params.layout(), Err(SNNError::InvalidParameter(_))));

        let params = SudokuParams {
            delay: -2.0,
            ..Default::default()
        };
        assert!(matches!(params.layout(), Err(SNNError::InvalidParameter(_))));

        let params = SudokuParams {
            noise_rate: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(params.layout(), Err(SNNError::InvalidParameter(_))));
    }

    #[test]
    fn test_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.json");
        let params = SudokuParams {
            n_cell: 18,
            weight_stim: 2.5,
            ..Default::default()
        };
        params.save_to(&path).unwrap();
        assert_eq!(SudokuParams::load_from(&path).unwrap(), params);

        assert!(matches!(
            SudokuParams::load_from(dir.path().join("missing.json")),
            Err(SNNError::IOError(_))
        ));
    }
}
