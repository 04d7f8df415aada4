//! The Sudoku network, i.e., populations and projections ready to be handed to a simulator.
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::core::layout::{Cell, CellLayout};
use crate::core::projection::{one_to_one, Population, PopulationKind, Projection, Receptor};
use crate::error::SNNError;
use crate::sudoku::compiler::ConstraintCompiler;
use crate::sudoku::params::SudokuParams;
use crate::sudoku::puzzle::Puzzle;

pub const CELLS_LABEL: &str = "Cells";
pub const NOISE_LABEL: &str = "Noise";
pub const STIM_LABEL: &str = "Stim";

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SudokuNetwork {
    pub layout: CellLayout,
    pub n_stim: usize,
    pub populations: Vec<Population>,
    pub projections: Vec<Projection>,
}

impl SudokuNetwork {
    /// Build the network solving a puzzle.
    pub fn build(puzzle: &Puzzle, params: &SudokuParams) -> Result<Self, SNNError> {
        let compiler = ConstraintCompiler::build(params)?;
        Self::assemble(&compiler, puzzle, params)
    }

    /// Build the network from an existing compiler, e.g., one forced to run in parallel.
    /// Returns an error if the compiler was built with another layout or stimulation block size.
    pub fn assemble(
        compiler: &ConstraintCompiler,
        puzzle: &Puzzle,
        params: &SudokuParams,
    ) -> Result<Self, SNNError> {
        let layout = params.layout()?;
        if layout != *compiler.layout() || params.n_stim != compiler.n_stim() {
            return Err(SNNError::InvalidParameter(format!(
                "The compiler ({} neurons per cell, {} per stimulation block) does not match \
                 the parameters ({} neurons per cell, {} per stimulation block)",
                compiler.layout().n_cell(),
                compiler.n_stim(),
                params.n_cell,
                params.n_stim
            )));
        }

        log::info!("Creating Sudoku Network...");
        let n_total = layout.num_nodes();

        log::info!("Creating Populations...");
        let cells = Population::new(CELLS_LABEL, n_total, PopulationKind::IfCurrExp);
        let noise = Population::new(
            NOISE_LABEL,
            n_total,
            PopulationKind::SpikeSourcePoisson {
                rate: params.noise_rate,
            },
        );

        log::info!("Creating Noise Sources...");
        let noise_projection = Projection::build(
            "noise",
            &noise,
            &cells,
            Receptor::Excitatory,
            one_to_one(n_total, params.weight_noise, params.delay),
        )?;

        let graph = compiler.compile(puzzle);
        let mut inhibition = graph.intra_cell;
        inhibition.extend(graph.inter_cell);
        let inhibition_projection =
            Projection::build("cell_inhibition", &cells, &cells, Receptor::Inhibitory, inhibition)?;

        let mut populations = vec![cells, noise];
        let mut projections = vec![noise_projection, inhibition_projection];

        // Without any clue, there is no stimulation population at all
        if graph.num_stim_blocks > 0 {
            let stim = Population::new(
                STIM_LABEL,
                graph.num_stim_blocks * compiler.n_stim(),
                PopulationKind::SpikeSourcePoisson {
                    rate: params.stim_rate,
                },
            );
            projections.push(Projection::build(
                "stimulation",
                &stim,
                &populations[0],
                Receptor::Excitatory,
                graph.stimulation,
            )?);
            populations.push(stim);
        }

        let network = SudokuNetwork {
            layout,
            n_stim: compiler.n_stim(),
            populations,
            projections,
        };
        log::info!(
            "Sudoku network created: {} neurons, {} connections",
            network.num_neurons(),
            network.num_connections()
        );
        Ok(network)
    }

    /// The population with the given label.
    pub fn population(&self, label: &str) -> Option<&Population> {
        self.populations.iter().find(|population| population.label == label)
    }

    /// The projection with the given label.
    pub fn projection(&self, label: &str) -> Option<&Projection> {
        self.projections.iter().find(|projection| projection.label == label)
    }

    /// The number of neurons over all populations.
    pub fn num_neurons(&self) -> usize {
        self.populations.iter().map(|population| population.size).sum()
    }

    /// The number of connections over all projections.
    pub fn num_connections(&self) -> usize {
        self.projections.iter().map(Projection::num_connections).sum()
    }

    /// The cell and the digit (1 to 9) represented by a neuron of the cell population.
    pub fn decode(&self, neuron_id: usize) -> Result<(Cell, u8), SNNError> {
        let (cell, digit) = self.layout.decode(neuron_id)?;
        Ok((cell, digit as u8 + 1))
    }

    /// Save the network to a file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SNNError> {
        let file = File::create(path).map_err(|e| SNNError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| SNNError::IOError(e.to_string()))?;
        writer.flush().map_err(|e| SNNError::IOError(e.to_string()))
    }

    /// Load a network from a file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SNNError> {
        let file = File::open(path).map_err(|e| SNNError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| SNNError::IOError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::puzzle::Preset;
    use tempfile::tempdir;

    fn small_params() -> SudokuParams {
        SudokuParams {
            n_cell: 9,
            n_stim: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_populations() {
        let network =
            SudokuNetwork::build(&Puzzle::preset(Preset::WorldsHardest), &small_params()).unwrap();
        assert_eq!(network.population(CELLS_LABEL).unwrap().size, 81 * 9);
        assert_eq!(
            network.population(NOISE_LABEL).unwrap().kind,
            PopulationKind::SpikeSourcePoisson { rate: 20.0 }
        );
        assert_eq!(network.population(STIM_LABEL).unwrap().size, 21 * 3);
        assert_eq!(network.num_neurons(), 2 * 81 * 9 + 21 * 3);
    }

    #[test]
    fn test_build_projections() {
        let network =
            SudokuNetwork::build(&Puzzle::preset(Preset::WorldsHardest), &small_params()).unwrap();

        let noise = network.projection("noise").unwrap();
        assert_eq!(noise.receptor, Receptor::Excitatory);
        assert_eq!(noise.num_connections(), 81 * 9);
        assert!(noise.connections.iter().all(|c| c.weight == 1.4));

        let inhibition = network.projection("cell_inhibition").unwrap();
        assert_eq!(inhibition.receptor, Receptor::Inhibitory);
        assert_eq!(inhibition.source, CELLS_LABEL);
        assert_eq!(inhibition.num_connections(), 81 * 72 + 81 * 20 * 9);

        let stimulation = network.projection("stimulation").unwrap();
        assert_eq!(stimulation.source, STIM_LABEL);
        assert_eq!(stimulation.num_connections(), 21 * 3);

        assert_eq!(
            network.num_connections(),
            81 * 9 + 81 * 72 + 81 * 20 * 9 + 21 * 3
        );
    }

    #[test]
    fn test_build_dream() {
        let network = SudokuNetwork::build(&Puzzle::empty(), &small_params()).unwrap();
        assert!(network.population(STIM_LABEL).is_none());
        assert!(network.projection("stimulation").is_none());
        assert_eq!(network.projections.len(), 2);
    }

    #[test]
    fn test_build_invalid() {
        let params = SudokuParams {
            n_cell: 10,
            ..Default::default()
        };
        assert_eq!(
            SudokuNetwork::build(&Puzzle::empty(), &params),
            Err(SNNError::InvalidCellSize { n_cell: 10 })
        );
    }

    #[test]
    fn test_assemble_mismatched_params() {
        let compiler = ConstraintCompiler::build(&small_params()).unwrap();
        assert!(matches!(
            SudokuNetwork::assemble(&compiler, &Puzzle::empty(), &SudokuParams::default()),
            Err(SNNError::InvalidParameter(_))
        ));

        let params = SudokuParams {
            noise_rate: -1.0,
            ..small_params()
        };
        assert!(matches!(
            SudokuNetwork::assemble(&compiler, &Puzzle::empty(), &params),
            Err(SNNError::InvalidParameter(_))
        ));

        let forced = ConstraintCompiler::build(&small_params())
            .unwrap()
            .with_parallel(true);
        assert_eq!(
            SudokuNetwork::assemble(&forced, &Puzzle::empty(), &small_params()),
            SudokuNetwork::build(&Puzzle::empty(), &small_params())
        );
    }

    #[test]
    fn test_decode_stimulated_digit() {
        let network =
            SudokuNetwork::build(&Puzzle::preset(Preset::WorldsHardest), &small_params()).unwrap();
        let stimulation = network.projection("stimulation").unwrap();
        // The first block stimulates the 8 of cell (0, 8)
        let (cell, digit) = network.decode(stimulation.connections[0].target_id).unwrap();
        assert_eq!(cell, Cell::new(0, 8).unwrap());
        assert_eq!(digit, 8);
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        let network =
            SudokuNetwork::build(&Puzzle::preset(Preset::Third), &small_params()).unwrap();
        network.save_to(&path).unwrap();
        assert_eq!(SudokuNetwork::load_from(&path).unwrap(), network);
    }

    #[test]
    fn test_load_corrupted_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        let network = SudokuNetwork::build(&Puzzle::empty(), &small_params()).unwrap();
        let mut json = serde_json::to_value(&network).unwrap();
        json["layout"] = serde_json::json!(10);
        std::fs::write(&path, json.to_string()).unwrap();

        let error = SudokuNetwork::load_from(&path).unwrap_err();
        let expected = SNNError::InvalidCellSize { n_cell: 10 }.to_string();
        assert!(matches!(error, SNNError::IOError(ref message) if message.contains(&expected)));
    }
}
