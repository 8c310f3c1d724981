//! Library side of the `iar` command line.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod types;
