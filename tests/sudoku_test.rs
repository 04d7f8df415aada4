use std::collections::HashSet;

use sudoku_snn::core::layout::Cell;
use sudoku_snn::core::projection::Receptor;
use sudoku_snn::error::SNNError;
use sudoku_snn::sudoku::compiler::ConstraintCompiler;
use sudoku_snn::sudoku::network::{SudokuNetwork, CELLS_LABEL, STIM_LABEL};
use sudoku_snn::sudoku::params::SudokuParams;
use sudoku_snn::sudoku::puzzle::{Preset, Puzzle};

const DIABOLICAL: &str = "
    001008073
    005600001
    700001000
    090810000
    530000046
    000065030
    000100004
    800009300
    940500700";

#[test]
fn test_edge_counts_every_preset() {
    let params = SudokuParams::default();
    let compiler = ConstraintCompiler::build(&params).unwrap();
    let (n_cell, n_per_digit) = (45, 5);

    for id in 0..=6 {
        let puzzle = Puzzle::preset(Preset::from_id(id));
        let graph = compiler.compile(&puzzle);
        assert_eq!(graph.intra_cell.len(), 81 * 1800);
        assert_eq!(graph.inter_cell.len(), 81 * 20 * n_cell * n_per_digit);
        assert_eq!(graph.num_stim_blocks, puzzle.num_clues());
        assert_eq!(
            graph.stimulation.len(),
            puzzle.num_clues() * params.n_stim * n_per_digit
        );
    }
}

#[test]
fn test_every_clue_excites_its_digit_only() {
    let params = SudokuParams::with_neurons_per_digit(3);
    let puzzle: Puzzle = DIABOLICAL.parse().unwrap();
    assert_eq!(puzzle, Puzzle::preset(Preset::Diabolical));

    let network = SudokuNetwork::build(&puzzle, &params).unwrap();
    let stimulation = network.projection("stimulation").unwrap();
    assert_eq!(stimulation.receptor, Receptor::Excitatory);

    for (block, (cell, digit)) in puzzle.clues().enumerate() {
        let sources = block * params.n_stim..(block + 1) * params.n_stim;
        let targets: HashSet<(Cell, u8)> = stimulation
            .connections
            .iter()
            .filter(|c| sources.contains(&c.source_id))
            .map(|c| network.decode(c.target_id).unwrap())
            .collect();
        assert_eq!(targets, HashSet::from([(cell, digit)]));
    }
}

#[test]
fn test_inhibition_never_within_a_digit_of_a_cell() {
    let params = SudokuParams::with_neurons_per_digit(2);
    let network = SudokuNetwork::build(&Puzzle::empty(), &params).unwrap();
    let inhibition = network.projection("cell_inhibition").unwrap();

    for connection in inhibition.connections.iter() {
        let (source, source_digit) = network.decode(connection.source_id).unwrap();
        let (target, target_digit) = network.decode(connection.target_id).unwrap();
        if source == target {
            assert_ne!(source_digit, target_digit);
        } else {
            assert!(source.is_peer(&target));
            assert_eq!(source_digit, target_digit);
        }
    }
}

#[test]
fn test_dream_problem_has_no_stimulation() {
    let params = SudokuParams::with_neurons_per_digit(1);
    let dream = SudokuNetwork::build(&Puzzle::empty(), &params).unwrap();
    let clued = SudokuNetwork::build(&Puzzle::preset(Preset::Fallback), &params).unwrap();

    assert!(dream.population(STIM_LABEL).is_none());
    assert_eq!(
        dream.projection("cell_inhibition"),
        clued.projection("cell_inhibition")
    );
    assert_eq!(
        dream.population(CELLS_LABEL),
        clued.population(CELLS_LABEL)
    );
}

#[test]
fn test_order_insensitive_idempotence() {
    let params = SudokuParams::with_neurons_per_digit(2);
    let puzzle = Puzzle::preset(Preset::Second);
    let sequential = ConstraintCompiler::build(&params)
        .unwrap()
        .with_parallel(false)
        .compile(&puzzle);
    let parallel = ConstraintCompiler::build(&params)
        .unwrap()
        .with_parallel(true)
        .compile(&puzzle);

    let edges = |connections: &[sudoku_snn::core::connection::Connection]| {
        connections
            .iter()
            .map(|c| (c.source_id, c.target_id))
            .collect::<HashSet<(usize, usize)>>()
    };
    assert_eq!(edges(&sequential.inter_cell[..]), edges(&parallel.inter_cell[..]));
    assert_eq!(edges(&sequential.intra_cell[..]), edges(&parallel.intra_cell[..]));
    assert_eq!(sequential, parallel);
}

#[test]
fn test_malformed_inputs_fail_fast() {
    assert!(matches!(
        Puzzle::build(vec![vec![0; 9]; 10]),
        Err(SNNError::InvalidPuzzleShape(_))
    ));

    let mut rows = vec![vec![0; 9]; 9];
    rows[8][0] = 12;
    assert_eq!(
        Puzzle::build(rows),
        Err(SNNError::InvalidDigit {
            row: 8,
            col: 0,
            value: 12
        })
    );

    let params = SudokuParams {
        n_cell: 46,
        ..Default::default()
    };
    assert_eq!(
        SudokuNetwork::build(&Puzzle::empty(), &params),
        Err(SNNError::InvalidCellSize { n_cell: 46 })
    );
}
