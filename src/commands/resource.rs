use clap::{Args, Subcommand};
use serde_json::Value;

use super::{configure, print_json, report};
use crate::cli::GlobalArgs;
use crate::provider::service::ProviderService;
use crate::resources::repository::TYPE_NAME;
use crate::shared::env_var::EnvVars;
use crate::shared::input::{STDIN, read_json, read_json_pair};

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum ResourceCommands {
    /// Create the remote object from a planned state
    Create(PlanArgs),

    /// Refresh a stored state from GitHub
    Read(StateArgs),

    /// Apply a planned state on top of the prior state
    Update(UpdateArgs),

    /// Destroy the remote object of a stored state
    Delete(StateArgs),

    /// Build a state from an import ID
    Import(ImportArgs),
}

#[derive(Args, Clone, PartialEq, Eq)]
pub struct TypeArg {
    /// Resource type name
    #[arg(long = "type", default_value = TYPE_NAME)]
    pub type_name: String,
}

#[derive(Args, Clone, PartialEq, Eq)]
pub struct PlanArgs {
    #[command(flatten)]
    pub resource: TypeArg,

    /// Planned state JSON file (`-` for stdin)
    #[arg(long, default_value = STDIN)]
    pub plan: String,
}

#[derive(Args, Clone, PartialEq, Eq)]
pub struct StateArgs {
    #[command(flatten)]
    pub resource: TypeArg,

    /// Stored state JSON file (`-` for stdin)
    #[arg(long, default_value = STDIN)]
    pub state: String,
}

#[derive(Args, Clone, PartialEq, Eq)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub resource: TypeArg,

    /// Prior state JSON file (`-` for stdin)
    #[arg(long, default_value = STDIN)]
    pub prior: String,

    /// Planned state JSON file (`-` for stdin)
    #[arg(long)]
    pub plan: String,
}

#[derive(Args, Clone, PartialEq, Eq)]
pub struct ImportArgs {
    #[command(flatten)]
    pub resource: TypeArg,

    /// Import ID (the numeric repository ID)
    pub id: String,
}

#[tokio::main]
pub async fn run(
    command: &ResourceCommands,
    global: &GlobalArgs,
    env: &EnvVars,
) -> anyhow::Result<()> {
    match command {
        ResourceCommands::Create(args) => {
            let plan = read_json(&args.plan)?;
            let state = configure(global, env)
                .await
                .map_err(report)?
                .create_resource(&args.resource.type_name, plan)
                .await
                .map_err(report)?;
            print_json(&state)
        }
        ResourceCommands::Read(args) => {
            let state = read_json(&args.state)?;
            let state = configure(global, env)
                .await
                .map_err(report)?
                .read_resource(&args.resource.type_name, state)
                .await
                .map_err(report)?;
            print_json(&state.unwrap_or(Value::Null))
        }
        ResourceCommands::Update(args) => {
            let (prior, plan) = read_json_pair(&args.prior, &args.plan)?;
            let state = configure(global, env)
                .await
                .map_err(report)?
                .update_resource(&args.resource.type_name, prior, plan)
                .await
                .map_err(report)?;
            print_json(&state)
        }
        ResourceCommands::Delete(args) => {
            let state = read_json(&args.state)?;
            configure(global, env)
                .await
                .map_err(report)?
                .delete_resource(&args.resource.type_name, state)
                .await
                .map_err(report)
        }
        ResourceCommands::Import(args) => {
            let state = configure(global, env)
                .await
                .map_err(report)?
                .import_resource(&args.resource.type_name, &args.id)
                .await
                .map_err(report)?;
            print_json(&state)
        }
    }
}
