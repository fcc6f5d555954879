#![recursion_limit = "256"]

mod cli;
mod commands;
mod data_sources;
mod functions;
mod infra;
mod logging;
mod provider;
mod resources;
mod shared;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};
use provider::diagnostics::Diagnostics;
use shared::env_var::EnvVars;

fn main() -> ExitCode {
    let Cli { global, command } = Cli::parse();
    let env = EnvVars::load();

    // Held until exit so buffered file logs are flushed.
    let _guard = match logging::init(global.log_format, &env) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    let result = match &command {
        Commands::Schema => commands::schema::run(),
        Commands::Resource(cmd) => commands::resource::run(cmd, &global, &env),
        Commands::Data(cmd) => commands::data::run(cmd, &global, &env),
        Commands::Function(args) => commands::function::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Diagnostics were already printed as JSON.
            if err.downcast_ref::<Diagnostics>().is_none() {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
