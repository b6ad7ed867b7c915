//! Configuration constants and profile loading for nameline
//!
//! Settings come from an INI profile file (one section per profile) and can be
//! overridden from the command line. A missing file or section falls back to
//! the defaults below.

use crate::cmd_args::CommandLineArgs;
use crate::form::StalePolicy;
use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;
use std::time::Duration;

/// Default profile file path for nameline
pub const DEFAULT_PROFILE_PATH: &str = "~/.nameline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "NAMELINE_PROFILE_PATH";

/// Environment variable holding the tracing filter directives
pub const LOG_LEVEL_ENV_VAR: &str = "NAMELINE_LOG_LEVEL";

/// Default timeout for a single API request
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Upper bound of the simulated latency of the offline mock API
pub const DEFAULT_MOCK_DELAY_MS: u64 = 2000;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Effective application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the availability API. `None` selects the offline mock.
    pub api_url: Option<String>,
    pub request_timeout: Duration,
    pub stale_policy: StalePolicy,
    pub mock_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            stale_policy: StalePolicy::LastResponseWins,
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
        }
    }
}

impl AppConfig {
    /// Load a profile section from an INI file.
    ///
    /// A file that does not exist or has no such section yields the defaults.
    pub fn from_profile(profile_name: &str, profile_path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(profile_path);
        let path = Path::new(expanded.as_ref());

        if !path.exists() {
            tracing::debug!("Profile file '{}' not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("failed to read profile file '{}'", path.display()))?;

        let Some(section) = ini.section(Some(profile_name)) else {
            tracing::debug!("Profile '{}' not found in '{}'", profile_name, path.display());
            return Ok(Self::default());
        };

        let mut config = Self::default();

        if let Some(url) = section.get("api_url").map(str::trim) {
            if !url.is_empty() {
                config.api_url = Some(url.to_string());
            }
        }
        if let Some(ms) = section.get("timeout_ms") {
            let ms: u64 = ms
                .trim()
                .parse()
                .with_context(|| format!("invalid timeout_ms '{ms}' in profile '{profile_name}'"))?;
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(flag) = section.get("discard_stale") {
            if parse_bool(flag)
                .with_context(|| format!("invalid discard_stale in profile '{profile_name}'"))?
            {
                config.stale_policy = StalePolicy::DiscardStale;
            }
        }
        if let Some(ms) = section.get("mock_delay_ms") {
            let ms: u64 = ms.trim().parse().with_context(|| {
                format!("invalid mock_delay_ms '{ms}' in profile '{profile_name}'")
            })?;
            config.mock_delay = Duration::from_millis(ms);
        }

        tracing::debug!("Loaded profile '{}': {:?}", profile_name, config);
        Ok(config)
    }

    /// Resolve the effective configuration: profile file first, then command line overrides
    pub fn load(cmd_args: &CommandLineArgs) -> Result<Self> {
        let profile_path = get_profile_path();
        let mut config = Self::from_profile(cmd_args.profile(), &profile_path)?;
        config.apply_args(cmd_args);
        Ok(config)
    }

    /// Apply command line overrides on top of the profile values
    pub fn apply_args(&mut self, cmd_args: &CommandLineArgs) {
        if let Some(url) = cmd_args.api_url() {
            self.api_url = Some(url.to_string());
        }
        if cmd_args.offline() {
            self.api_url = None;
        }
        if cmd_args.discard_stale() {
            self.stale_policy = StalePolicy::DiscardStale;
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(anyhow::anyhow!("expected a boolean, got '{other}'")),
    }
}
