pub mod commands;
pub mod pipelines;

pub use commands::{run_command, Command, RunOptions};
