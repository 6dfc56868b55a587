//! Context resolution from environment variables, flags and prompts

use log::debug;
use std::path::PathBuf;

use crate::config::env;
use crate::error::{Result, TfeError};
use crate::hcp::{HostResolver, TokenResolver};
use crate::ui::Prompter;

use super::ProbeContext;

/// Read a process environment variable, treating empty values as unset
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Where configuration values come from
///
/// Environment lookups go through `env` so resolution can be exercised
/// without touching the real process environment.
pub struct InputSource<'a> {
    env: &'a dyn Fn(&str) -> Option<String>,
    prompter: &'a dyn Prompter,
    /// Missing values are fatal instead of prompted for
    batch: bool,
}

impl<'a> InputSource<'a> {
    pub fn new(
        env: &'a dyn Fn(&str) -> Option<String>,
        prompter: &'a dyn Prompter,
        batch: bool,
    ) -> Self {
        Self {
            env,
            prompter,
            batch,
        }
    }

    /// Look up an environment variable
    pub fn env(&self, var: &str) -> Option<String> {
        (self.env)(var).filter(|v| !v.is_empty())
    }

    /// Environment variable, else an interactive prompt (masked if `secret`)
    pub fn env_or_ask(&self, var: &str, secret: bool) -> Result<String> {
        if let Some(value) = self.env(var) {
            debug!("Using {} from environment", var);
            return Ok(value);
        }

        if self.batch {
            return Err(TfeError::Config(format!(
                "{} is not set (interactive prompts are disabled in batch mode)",
                var
            )));
        }

        let value = if secret {
            self.prompter.secret(var)?
        } else {
            self.prompter.input(var)?
        };

        if value.is_empty() {
            return Err(TfeError::Config(format!("no value given for {}", var)));
        }
        Ok(value)
    }
}

/// Builds a `ProbeContext` from flags, environment and prompts
pub struct ContextResolver<'a> {
    source: InputSource<'a>,
}

impl<'a> ContextResolver<'a> {
    pub fn new(source: InputSource<'a>) -> Self {
        Self { source }
    }

    /// Resolve the full context
    ///
    /// Order: address, organization (flag first), token, CA bundle. The CA
    /// bundle is optional but, when named, must point at an existing file.
    pub fn resolve(&self, cli_org: Option<&str>) -> Result<ProbeContext> {
        let api_base = HostResolver::resolve(&self.source)?;
        let organization = self.resolve_organization(cli_org)?;
        let token = TokenResolver::resolve(&self.source)?;
        let ca_bundle = self.resolve_ca_bundle()?;

        debug!(
            "Resolved context: address={}, org={}, ca_bundle={:?}",
            api_base, organization, ca_bundle
        );

        Ok(ProbeContext {
            api_base,
            token,
            ca_bundle,
            organization,
        })
    }

    fn resolve_organization(&self, cli_org: Option<&str>) -> Result<String> {
        match cli_org.map(str::trim).filter(|o| !o.is_empty()) {
            Some(org) => {
                debug!("Using organization from CLI flag: {}", org);
                Ok(org.to_string())
            }
            None => self.source.env_or_ask(env::ORG, false),
        }
    }

    fn resolve_ca_bundle(&self) -> Result<Option<PathBuf>> {
        let Some(path) = self.source.env(env::CACERT) else {
            return Ok(None);
        };

        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(TfeError::Config(format!(
                "{} points at '{}', which is not a readable file",
                env::CACERT,
                path.display()
            )));
        }
        Ok(Some(path))
    }
}
