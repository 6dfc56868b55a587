//! Interactive input prompts

use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::error::Result;

/// Source of interactive answers
///
/// The terminal implementation uses dialoguer; tests substitute canned
/// answers.
pub trait Prompter {
    /// Ask for a visible value
    fn input(&self, label: &str) -> Result<String>;

    /// Ask for a value without echoing it
    fn secret(&self, label: &str) -> Result<String>;
}

/// Prompter reading from the controlling terminal
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, label: &str) -> Result<String> {
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn secret(&self, label: &str) -> Result<String> {
        let value = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact()?;
        Ok(value.trim().to_string())
    }
}
