pub mod board;
pub mod config;
pub mod experiment;
pub mod monitor;
pub mod probe;
pub mod queue;
pub mod report;
pub mod solver;
