//! Sage command-line front end: a REPL chat surface over the dispatch
//! core.

pub use cli::Cli;

pub mod cli;
pub mod config;
pub mod repl;
pub mod surface;
