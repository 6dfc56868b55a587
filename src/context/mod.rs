//! Connection context module
//!
//! Resolves the API address, token, optional CA bundle and organization once
//! at startup into a `ProbeContext` that is passed to every component.

mod resolve;

use std::path::PathBuf;

pub use resolve::{process_env, ContextResolver, InputSource};

/// Everything needed to talk to the API for one report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeContext {
    /// Normalized API address with scheme, e.g. "https://app.terraform.io"
    pub api_base: String,
    /// Bearer token
    pub token: String,
    /// Extra trusted CA bundle (PEM)
    pub ca_bundle: Option<PathBuf>,
    /// Organization to report on
    pub organization: String,
}

impl ProbeContext {
    /// Token with all but the last four characters hidden, for echoing
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}
