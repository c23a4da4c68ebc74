mod command;
mod runner;

pub use command::Cli;
pub use runner::{execute, resolve_config};
