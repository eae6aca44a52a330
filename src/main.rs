use std::error::Error;

use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser, Debug)]
#[command(author, version, about = "N-queens CSP experiment harness", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one experiment from a config file.
    Run(cli::run::RunArgs),
    /// Run a grid of experiments across solvers, sizes and thread counts.
    Sweep(cli::sweep::SweepArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    cli::init_logging();

    match Args::parse().command {
        Command::Run(args) => cli::run::run(args),
        Command::Sweep(args) => cli::sweep::sweep(args),
    }
}
