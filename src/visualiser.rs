//! Command lines of the external Sudoku visualiser.
//!
//! The visualiser listens to the live spikes of the cell population and draws the grid. Only the
//! command is built here, starting it is left to the caller.
use std::fmt;
use std::path::Path;

use crate::error::SNNError;

/// Program of the current visualiser, expected on the `PATH`.
pub const MODERN_EXECUTABLE: &str = "spynnaker_sudoku";
/// Default width of the bins in which spikes are counted (in ms).
pub const DEFAULT_MS_PER_BIN: u32 = 100;
/// Executables of the legacy visualiser, shipped next to the scripts, by platform prefix.
pub const LEGACY_EXECUTABLES: [(&str, &str); 3] = [
    ("win32", "sudoku.exe"),
    ("darwin", "sudoku_osx"),
    ("linux", "sudoku_linux"),
];

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VisualiserKind {
    /// The `spynnaker_sudoku` program, with GNU-style options.
    Modern,
    /// The platform-specific executables, with single-dash options.
    Legacy,
}

/// The platform name of the host, in the `win32` / `darwin` / `linux` convention.
pub fn current_platform() -> &'static str {
    match std::env::consts::OS {
        "windows" => "win32",
        "macos" => "darwin",
        os => os,
    }
}

/// The legacy executable for a platform, matched by prefix (e.g. `linux2` is `linux`).
pub fn legacy_executable(platform: &str) -> Result<&'static str, SNNError> {
    LEGACY_EXECUTABLES
        .iter()
        .find(|(prefix, _)| platform.starts_with(prefix))
        .map(|(_, executable)| *executable)
        .ok_or_else(|| SNNError::UnsupportedPlatform(platform.to_string()))
}

#[derive(Debug, PartialEq, Clone)]
pub struct VisualiserCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl VisualiserCommand {
    /// Build the command of a visualiser drawing `neurons_per_digit` neurons per digit.
    /// Legacy executables are looked up in `dir` for the given platform.
    pub fn build(
        kind: VisualiserKind,
        platform: &str,
        dir: &Path,
        neurons_per_digit: usize,
        ms_per_bin: u32,
    ) -> Result<Self, SNNError> {
        let (program, dash) = match kind {
            VisualiserKind::Modern => (MODERN_EXECUTABLE.to_string(), "--"),
            VisualiserKind::Legacy => {
                let executable = dir.join(legacy_executable(platform)?);
                (executable.to_string_lossy().into_owned(), "-")
            }
        };

        Ok(VisualiserCommand {
            program,
            args: vec![
                format!("{}neurons_per_number", dash),
                neurons_per_digit.to_string(),
                format!("{}ms_per_bin", dash),
                ms_per_bin.to_string(),
            ],
        })
    }
}

impl fmt::Display for VisualiserCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args.iter() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
