use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use comfy_table::Table;
use itertools::iproduct;
use log::info;
use num_format::{Locale, ToFormattedString};

use nqueens::config::Config;
use nqueens::experiment::run_experiment;
use nqueens::report;
use nqueens::solver::SolverKind;

use crate::cli;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Solver types to sweep. Defaults to all five.
    #[arg(long = "solver", value_name = "KIND")]
    pub solvers: Vec<SolverKind>,

    /// Board sizes to sweep.
    #[arg(long = "size", value_name = "N", default_values_t = [8usize])]
    pub sizes: Vec<usize>,

    /// Thread counts to sweep. A count of 1 runs sequentially.
    #[arg(long = "threads", value_name = "T", default_values_t = [1usize, 4])]
    pub threads: Vec<usize>,

    /// Seeding depths to sweep for the parallel runs.
    #[arg(long = "granularity", value_name = "D", default_values_t = [1usize])]
    pub granularities: Vec<usize>,

    /// Repetitions of every grid point.
    #[arg(long, default_value_t = 1)]
    pub runs: usize,

    /// CSV file every result row is appended to.
    #[arg(short, long, default_value = "sweep_results.csv")]
    pub output: PathBuf,

    #[arg(long, default_value_t = false)]
    pub no_progress_bar: bool,
}

pub fn sweep(args: SweepArgs) -> Result<(), Box<dyn Error>> {
    let solvers = if args.solvers.is_empty() {
        SolverKind::ALL.to_vec()
    } else {
        args.solvers.clone()
    };

    let grid: Vec<(SolverKind, usize, usize, usize)> = iproduct!(
        solvers.iter().copied(),
        args.sizes.iter().copied(),
        args.threads.iter().copied(),
        args.granularities.iter().copied()
    )
    // Granularity only matters in parallel mode; sweeping it for the
    // sequential runs would just repeat the same experiment.
    .filter(|&(_, _, n_threads, granularity)| n_threads > 1 || granularity == 1)
    .collect();

    let total = grid.len() * args.runs;
    info!(
        "Sweeping {} configuration(s), {} run(s) each ({} experiments)",
        grid.len(),
        args.runs,
        total
    );

    let pb = (!args.no_progress_bar).then(|| cli::create_progress_bar(total));

    let mut table = Table::new();
    table.set_header(vec![
        "solver",
        "size",
        "threads",
        "granularity",
        "solutions",
        "time to all (s)",
        "peak mem (MB)",
    ]);

    for (solver, board_size, n_threads, domain_granularity) in grid {
        let config = Config {
            solver,
            n_threads,
            board_size,
            print_all_solutions: false,
            print_results_to_csv: true,
            save_solutions_to_txt: false,
            domain_granularity,
        };

        for _ in 0..args.runs {
            let result = run_experiment(&config);
            report::append_csv(&args.output, &config, &result)?;

            table.add_row(vec![
                config.solver.to_string(),
                config.board_size.to_string(),
                config.n_threads.to_string(),
                config.domain_granularity.to_string(),
                result.num_solutions().to_formatted_string(&Locale::en),
                format!("{:.6}", result.time_to_all.as_secs_f64()),
                format!("{:.3}", result.peak_memory_mb),
            ]);

            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    println!("{table}");
    info!("Results appended to {:?}", args.output);

    Ok(())
}
