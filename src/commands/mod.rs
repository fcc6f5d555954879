pub mod data;
pub mod function;
pub mod resource;
pub mod schema;

use serde::Serialize;
use tokio::time::Instant;

use crate::cli::GlobalArgs;
use crate::provider::diagnostics::Diagnostics;
use crate::provider::{ConfiguredProvider, GitHubProvider};
use crate::shared::env_var::EnvVars;

/// Configure the provider from the global flags and the environment.
///
/// The `--timeout` clock starts here and bounds every remote call made
/// afterwards.
pub(crate) async fn configure(
    global: &GlobalArgs,
    env: &EnvVars,
) -> Result<ConfiguredProvider, Diagnostics> {
    GitHubProvider::new(env.clone())
        .with_deadline(global.deadline().map(|timeout| Instant::now() + timeout))
        .configure(global.provider_model())
        .await
}

/// Print diagnostics for the host and turn them into the command's error.
pub(crate) fn report(diagnostics: Diagnostics) -> anyhow::Error {
    match serde_json::to_string_pretty(&diagnostics) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{diagnostics}"),
    }
    anyhow::Error::new(diagnostics)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
