//! API address resolution and normalization

use log::debug;

use crate::config::{defaults, env};
use crate::context::InputSource;
use crate::error::{Result, TfeError};

/// Address resolution with fallback logic
pub struct HostResolver;

impl HostResolver {
    /// Resolve the API address:
    /// 1. `TFE_ADDR` environment variable
    /// 2. Interactive prompt (or error in batch mode)
    ///
    /// The result is normalized with `normalize_address`.
    pub fn resolve(source: &InputSource<'_>) -> Result<String> {
        let raw = source.env_or_ask(env::ADDR, false)?;
        let address = Self::normalize_address(&raw)?;
        debug!("Using API address: {}", address);
        Ok(address)
    }

    /// Prepend `https://` when no scheme is given and drop trailing slashes
    ///
    /// # Examples
    /// - "app.terraform.io" -> "https://app.terraform.io"
    /// - "http://localhost:8080/" -> "http://localhost:8080"
    pub fn normalize_address(raw: &str) -> Result<String> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(TfeError::Config(format!("{} is empty", env::ADDR)));
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(trimmed.to_string())
        } else {
            Ok(format!("{}{}", defaults::SCHEME, trimmed))
        }
    }
}
