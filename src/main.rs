use clap::{Parser, Subcommand};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::PathBuf;

use sudoku_snn::error::SNNError;
use sudoku_snn::sampler::network::{BalancedRandomNetwork, BalancedRandomParams};
use sudoku_snn::sudoku::compiler::ConstraintCompiler;
use sudoku_snn::sudoku::network::SudokuNetwork;
use sudoku_snn::sudoku::params::SudokuParams;
use sudoku_snn::sudoku::puzzle::{Preset, Puzzle};
use sudoku_snn::visualiser::{self, VisualiserCommand, VisualiserKind, DEFAULT_MS_PER_BIN};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Also write the log to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Log debug messages
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a Sudoku puzzle into a network
    Sudoku {
        /// The built-in puzzle, 1 to 6 (any other number selects the fallback puzzle)
        #[arg(long, default_value = "6", conflicts_with_all = ["puzzle", "grid", "dream"])]
        preset: u8,
        /// A JSON file with the 9 rows of the puzzle
        #[arg(long, conflicts_with_all = ["grid", "dream"])]
        puzzle: Option<PathBuf>,
        /// The 81 entries of the puzzle, row by row, blanks as 0 or '.'
        #[arg(long, conflicts_with = "dream")]
        grid: Option<String>,
        /// No clue at all
        #[arg(long)]
        dream: bool,
        /// A JSON file with the network parameters
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overrides the number of neurons per digit of the configuration
        #[arg(long)]
        neurons_per_digit: Option<usize>,
        /// Generate the connections of the cells in parallel
        #[arg(long)]
        parallel: bool,
        /// Where to write the network
        #[arg(short, long, default_value = "sudoku.json")]
        output: PathBuf,
    },
    /// Sample a balanced random network
    Balanced {
        /// A JSON file with the network parameters
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overrides the seed of the configuration
        #[arg(long)]
        seed: Option<u64>,
        /// Where to write the network
        #[arg(short, long, default_value = "balanced.json")]
        output: PathBuf,
    },
    /// Print the command of the Sudoku visualiser
    Visualiser {
        /// Use the platform-specific legacy executable (also selected by the OLD_VIS variable)
        #[arg(long)]
        legacy: bool,
        /// The platform of the legacy executable, the host by default
        #[arg(long)]
        platform: Option<String>,
        /// The directory of the legacy executable
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long, default_value = "5")]
        neurons_per_digit: usize,
        #[arg(long, default_value_t = DEFAULT_MS_PER_BIN)]
        ms_per_bin: u32,
    },
}

fn init_logging(log_file: Option<&PathBuf>, verbose: bool) -> Result<(), SNNError> {
    let pattern = "{d(%H:%M:%S)} {l} - {m}\n";
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();
    let mut config =
        Config::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));
    let mut root = Root::builder().appender("stdout");

    if let Some(path) = log_file {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build(path)
            .map_err(|e| SNNError::IOError(e.to_string()))?;
        config = config.appender(Appender::builder().build("logfile", Box::new(logfile)));
        root = root.appender("logfile");
    }

    let config = config
        .build(root.build(level))
        .map_err(|e| SNNError::IOError(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| SNNError::IOError(e.to_string()))?;
    Ok(())
}

fn main() -> Result<(), SNNError> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref(), args.verbose)?;
    log::debug!("{:?}", args);

    match args.command {
        Command::Sudoku {
            preset,
            puzzle,
            grid,
            dream,
            config,
            neurons_per_digit,
            parallel,
            output,
        } => {
            let puzzle = match (puzzle, grid) {
                _ if dream => Puzzle::empty(),
                (Some(path), _) => Puzzle::load_from(path)?,
                (None, Some(grid)) => grid.parse()?,
                (None, None) => Puzzle::preset(Preset::from_id(preset)),
            };
            log::info!("Puzzle with {} clues:\n{}", puzzle.num_clues(), puzzle);

            let mut params = match config {
                Some(path) => SudokuParams::load_from(path)?,
                None => SudokuParams::default(),
            };
            if let Some(neurons_per_digit) = neurons_per_digit {
                params.n_cell = SudokuParams::with_neurons_per_digit(neurons_per_digit).n_cell;
            }
            log::debug!("{:?}", params);

            let mut compiler = ConstraintCompiler::build(&params)?;
            if parallel {
                compiler = compiler.with_parallel(true);
            }
            let network = SudokuNetwork::assemble(&compiler, &puzzle, &params)?;
            network.save_to(&output)?;
            log::info!("Network saved to {}", output.display());
        }
        Command::Balanced {
            config,
            seed,
            output,
        } => {
            let mut params = match config {
                Some(path) => BalancedRandomParams::load_from(path)?,
                None => BalancedRandomParams::default(),
            };
            if let Some(seed) = seed {
                params.seed = seed;
            }
            let network = BalancedRandomNetwork::sample(&params)?;
            network.save_to(&output)?;
            log::info!("Network saved to {}", output.display());
        }
        Command::Visualiser {
            legacy,
            platform,
            dir,
            neurons_per_digit,
            ms_per_bin,
        } => {
            let kind = if legacy || std::env::var_os("OLD_VIS").is_some() {
                VisualiserKind::Legacy
            } else {
                VisualiserKind::Modern
            };
            let platform = platform.unwrap_or_else(|| visualiser::current_platform().to_string());
            let command =
                VisualiserCommand::build(kind, &platform, &dir, neurons_per_digit, ms_per_bin)?;
            println!("{}", command);
        }
    }

    Ok(())
}
