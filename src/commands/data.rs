use clap::{Args, Subcommand};
use serde_json::json;

use super::{configure, print_json, report};
use crate::cli::GlobalArgs;
use crate::data_sources::repository::TYPE_NAME;
use crate::provider::service::ProviderService;
use crate::shared::env_var::EnvVars;

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum DataCommands {
    /// Read a repository by owner and name
    Repository(RepositoryArgs),
}

#[derive(Args, Clone, PartialEq, Eq)]
pub struct RepositoryArgs {
    /// Account owning the repository
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub name: String,
}

#[tokio::main]
pub async fn run(
    command: &DataCommands,
    global: &GlobalArgs,
    env: &EnvVars,
) -> anyhow::Result<()> {
    match command {
        DataCommands::Repository(args) => {
            let config = json!({"owner": args.owner, "name": args.name});
            let model = configure(global, env)
                .await
                .map_err(report)?
                .read_data_source(TYPE_NAME, config)
                .await
                .map_err(report)?;
            print_json(&model)
        }
    }
}
