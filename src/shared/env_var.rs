//! Centralized reader for the environment variables the provider honours.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

use std::path::PathBuf;

const GITHUB_OWNER: &str = "GITHUB_OWNER";
const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
const GITHUB_BASE_URL: &str = "GITHUB_BASE_URL";
const TF_LOG_PROVIDER: &str = "TF_LOG_PROVIDER";
const TF_LOG: &str = "TF_LOG";
const LOG_PATH: &str = "GITHUB_PROVIDER_LOG_PATH";

/// Snapshot of the provider's environment variables at load time.
///
/// Empty values are treated as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    /// Fallback for the provider `owner` attribute.
    pub owner: Option<String>,

    /// Fallback for the provider `token` attribute.
    pub token: Option<String>,

    /// Fallback for the provider `base_url` attribute (GitHub Enterprise Server).
    pub base_url: Option<String>,

    /// Log filter directive. `TF_LOG_PROVIDER` wins over `TF_LOG`.
    pub log_filter: Option<String>,

    /// Extra file to append logs to.
    pub log_path: Option<PathBuf>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all provider environment variables from the current process.
    pub fn load() -> Self {
        Self {
            owner: non_empty_var(GITHUB_OWNER),
            token: non_empty_var(GITHUB_TOKEN),
            base_url: non_empty_var(GITHUB_BASE_URL),
            log_filter: non_empty_var(TF_LOG_PROVIDER).or_else(|| non_empty_var(TF_LOG)),
            log_path: non_empty_var(LOG_PATH).map(PathBuf::from),
        }
    }

    /// Returns the env var name for the token (used in diagnostics).
    pub fn token_name() -> &'static str {
        GITHUB_TOKEN
    }
}
