//! UI utilities for terminal interaction
//!
//! This module provides the progress spinner and the interactive prompts
//! used when configuration is missing from the environment.

mod prompt;
mod spinner;

pub use prompt::{Prompter, TerminalPrompter};
pub use spinner::{create_spinner, finish_spinner};
