use clap::Args;
use serde_json::Value;

use super::{print_json, report};
use crate::functions;
use crate::provider::diagnostics::Diagnostic;

#[derive(Args, Clone, PartialEq, Eq)]
pub struct FunctionArgs {
    /// Function name (get_repository_name or get_repository_owner)
    pub name: String,

    /// Repository full name in the form owner/name
    pub full_name: String,
}

/// Functions are pure, so no provider configuration or token is needed.
pub fn run(args: &FunctionArgs) -> anyhow::Result<()> {
    let result = functions::call(&args.name, &[Value::String(args.full_name.clone())])
        .map_err(|err| report(Diagnostic::error("Function Error", err.to_string()).into()))?;
    print_json(&result)
}
