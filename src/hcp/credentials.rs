//! API token resolution

use log::debug;

use crate::config::env;
use crate::context::InputSource;
use crate::error::{Result, TfeError};

/// Token resolution with fallback logic
pub struct TokenResolver;

impl TokenResolver {
    /// Resolve the token:
    /// 1. `TFE_TOKEN` environment variable
    /// 2. Masked interactive prompt (or error in batch mode)
    pub fn resolve(source: &InputSource<'_>) -> Result<String> {
        let token = source.env_or_ask(env::TOKEN, true)?;

        if token.chars().any(char::is_whitespace) {
            return Err(TfeError::Config(format!(
                "{} must not contain whitespace",
                env::TOKEN
            )));
        }

        debug!("Resolved API token ({} characters)", token.len());
        Ok(token)
    }
}
