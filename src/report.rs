//! Result serialization and console reporting.
//!
//! Everything here is boundary plumbing: the experiment itself never
//! writes files or prints.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};

use crate::board::{Board, Solution};
use crate::config::Config;
use crate::experiment::ExperimentResult;

const CSV_HEADER: &str = "solverType,threads,isParallel,boardSize,domainGranularity,\
                          startTime,endTime,firstSolutionTime,\
                          timeToFirst,timeToAll,cpuTime,peakMemoryMB,numberOfSolutions";

/// ISO-8601 UTC with millisecond precision, e.g. `2026-08-30T12:34:56.789Z`.
pub fn iso8601(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Appends one result row to a CSV log, writing the header first only if
/// the file does not exist yet.
pub fn append_csv(
    path: impl AsRef<Path>,
    config: &Config,
    result: &ExperimentResult,
) -> io::Result<()> {
    let path = path.as_ref();
    let exists = path.exists();
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;

    if !exists {
        writeln!(file, "{}", CSV_HEADER)?;
    }

    // Missing first-solution data serializes to empty fields, never to a
    // default timestamp.
    let first_solution = result
        .first_solution_at
        .as_ref()
        .map(|at| iso8601(at))
        .unwrap_or_default();
    let time_to_first = result
        .time_to_first
        .map(|d| format!("{:.6}", d.as_secs_f64()))
        .unwrap_or_default();

    writeln!(
        file,
        "{},{},{},{},{},{},{},{},{},{:.6},{:.6},{:.3},{}",
        config.solver,
        config.n_threads,
        config.is_parallel() as u8,
        config.board_size,
        config.domain_granularity,
        iso8601(&result.started_at),
        iso8601(&result.ended_at),
        first_solution,
        time_to_first,
        result.time_to_all.as_secs_f64(),
        result.cpu_time.as_secs_f64(),
        result.peak_memory_mb,
        result.num_solutions(),
    )
}

/// Prints the configuration banner shown before a run starts.
pub fn print_config(config: &Config) {
    println!("N-Queens Solver");
    println!("- Solver: {}", config.solver);
    println!("- Board Size: {}", config.board_size);
    println!("- Parallel: {}", if config.is_parallel() { "Yes" } else { "No" });
    if config.is_parallel() {
        println!("- Threads: {}", config.n_threads);
        println!("- Domain Granularity: {}", config.domain_granularity);
    }
    println!();
}

/// Prints the metric summary shown after a run, and the full solution
/// grids when the config asks for them.
pub fn print_summary(config: &Config, result: &ExperimentResult) {
    match result.time_to_first {
        Some(d) => println!("Time to First Solution: {:.6} seconds", d.as_secs_f64()),
        None => println!("Time to First Solution: n/a (no solutions found)"),
    }
    println!(
        "Time to All Solutions: {:.6} seconds",
        result.time_to_all.as_secs_f64()
    );
    println!("CPU Time Used: {:.6} seconds", result.cpu_time.as_secs_f64());
    println!("Peak Memory Usage: {:.3} MB", result.peak_memory_mb);
    println!(
        "Number of Solutions: {}",
        result.num_solutions().to_formatted_string(&Locale::en)
    );
    println!();

    if config.print_all_solutions && !result.solutions.is_empty() {
        println!("All Solutions:");
        println!();
        for (i, solution) in result.solutions.iter().enumerate() {
            println!("Solution {}:", i + 1);
            println!("{}", Board::from_solution(solution));
        }
    }
}

/// Writes every solution grid to a text file, one numbered block each.
pub fn save_solutions_txt(path: impl AsRef<Path>, solutions: &[Solution]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    for (i, solution) in solutions.iter().enumerate() {
        writeln!(file, "Solution {}:", i + 1)?;
        writeln!(file, "{}", Board::from_solution(solution))?;
    }
    Ok(())
}
