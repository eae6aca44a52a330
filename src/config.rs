use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::solver::{SolverKind, UnknownSolverKind};

/// One experiment's settings, read once and shared read-only across all
/// workers for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub solver: SolverKind,
    pub n_threads: usize,
    pub board_size: usize,
    pub print_all_solutions: bool,
    pub print_results_to_csv: bool,
    pub save_solutions_to_txt: bool,
    /// Search-tree depth at which the seeding solver emits frontier states.
    pub domain_granularity: usize,
}

impl Config {
    /// Parallel mode is always derived, never read from the file.
    pub fn is_parallel(&self) -> bool {
        self.n_threads > 1
    }

    /// Reads a flat `key: value` config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    /// Parses `key: value` lines. Unrecognized keys are ignored,
    /// `domainGranularity` defaults to 1, booleans are `true` or anything
    /// else, and `isParallel` is derived from the thread count.
    fn from_str(text: &str) -> Result<Config, ConfigError> {
        let mut solver: Option<SolverKind> = None;
        let mut n_threads: Option<usize> = None;
        let mut board_size: Option<usize> = None;
        let mut print_all_solutions = false;
        let mut print_results_to_csv = false;
        let mut save_solutions_to_txt = false;
        let mut domain_granularity = 1usize;

        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "solverType" => solver = Some(value.parse()?),
                "nThreads" => n_threads = Some(parse_int(key, value)?),
                "boardSize" => board_size = Some(parse_int(key, value)?),
                "printAllSolutions" => print_all_solutions = value == "true",
                "printResultsToTxt" => print_results_to_csv = value == "true",
                "saveSolutionsToTxt" => save_solutions_to_txt = value == "true",
                "domainGranularity" => domain_granularity = parse_int(key, value)?,
                _ => {} // unrecognized keys are ignored
            }
        }

        Ok(Config {
            solver: solver.ok_or(ConfigError::MissingKey("solverType"))?,
            n_threads: n_threads.ok_or(ConfigError::MissingKey("nThreads"))?,
            board_size: board_size.ok_or(ConfigError::MissingKey("boardSize"))?,
            print_all_solutions,
            print_results_to_csv,
            save_solutions_to_txt,
            domain_granularity,
        })
    }
}

fn parse_int(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Fatal configuration errors. A run with a broken config is skipped,
/// never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    UnknownSolver(#[from] UnknownSolverKind),

    #[error("invalid value '{value}' for key '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("missing required key '{0}'")]
    MissingKey(&'static str),
}
