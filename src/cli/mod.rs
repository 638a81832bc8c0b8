//! CLI module graph.

pub mod command;
pub mod diagnostic;
pub mod output;
pub mod run;

pub use command::Cli;
pub use run::run;
