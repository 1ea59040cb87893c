//! Birthday reminder command-line interface

pub mod app;
pub mod cli;

pub use cli::{Cli, Commands, log_filter_from_verbosity};
