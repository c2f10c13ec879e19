//! CLI module - argument parsing and interactive prompts

mod args;
mod prompts;

pub use args::{Cli, Commands, MappingAction};
pub use prompts::*;
