use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::commands::data::DataCommands;
use crate::commands::function::FunctionArgs;
use crate::commands::resource::ResourceCommands;
use crate::logging::LogFormat;
use crate::provider::ProviderModel;

#[derive(Parser)]
#[command(
    name = "terraform-provider-github",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Provider configuration and process options shared by every subcommand.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Organization or user account to manage (falls back to GITHUB_OWNER)
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Personal access token (falls back to GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// GitHub API root for GitHub Enterprise Server (falls back to GITHUB_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Abort the operation after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl GlobalArgs {
    pub fn provider_model(&self) -> ProviderModel {
        ProviderModel {
            owner: self.owner.clone(),
            token: self.token.clone(),
            base_url: self.base_url.clone(),
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print JSON Schemas of the provider configuration, resources, data sources and functions
    Schema,

    /// Run a lifecycle operation on a resource
    #[command(subcommand)]
    Resource(ResourceCommands),

    /// Read a data source
    #[command(subcommand)]
    Data(DataCommands),

    /// Call a provider function
    Function(FunctionArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_args_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "terraform-provider-github",
            "function",
            "get_repository_owner",
            "octocat/Hello-World",
            "--owner",
            "acme",
            "--timeout",
            "30",
        ])
        .unwrap();

        assert_eq!(cli.global.owner.as_deref(), Some("acme"));
        assert_eq!(cli.global.deadline(), Some(Duration::from_secs(30)));
        assert_eq!(cli.global.provider_model().owner.as_deref(), Some("acme"));
    }
}
