use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use log::info;

use nqueens::config::Config;
use nqueens::experiment::run_experiment;
use nqueens::report;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the `key: value` config file.
    #[arg(value_name = "CONFIG", default_value = "config.txt")]
    pub config: PathBuf,

    /// CSV file results are appended to when the config enables it.
    #[arg(short, long, default_value = "results.csv")]
    pub output: PathBuf,

    /// Text file solutions are written to when the config enables it.
    #[arg(long, default_value = "solutions.txt")]
    pub solutions: PathBuf,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let config = Config::from_file(&args.config)?;
    report::print_config(&config);

    let result = run_experiment(&config);
    report::print_summary(&config, &result);

    if config.print_results_to_csv {
        report::append_csv(&args.output, &config, &result)?;
        info!("Results appended to {:?}", args.output);
    }
    if config.save_solutions_to_txt {
        report::save_solutions_txt(&args.solutions, &result.solutions)?;
        info!(
            "{} solution(s) written to {:?}",
            result.num_solutions(),
            args.solutions
        );
    }

    Ok(())
}
