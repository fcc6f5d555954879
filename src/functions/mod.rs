//! Provider functions operating on `owner/name` repository full names.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("{function} takes exactly {expected} argument(s), got {actual}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Argument {parameter} of {function} must be a string")]
    ArgumentType {
        function: &'static str,
        parameter: &'static str,
    },

    #[error("Invalid repository full name \"{0}\": expected the form owner/name")]
    MissingSeparator(String),
}

pub type Result<T> = std::result::Result<T, FunctionError>;

/// Signature of a provider function, as reported by the `schema` command.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: &'static str,
    pub summary: &'static str,
    pub parameters: &'static [&'static str],
    #[serde(rename = "return")]
    pub return_type: &'static str,
}

pub const FUNCTIONS: &[FunctionDefinition] = &[
    FunctionDefinition {
        name: "get_repository_name",
        summary: "Get the name of a repository from the full name.",
        parameters: &["full_name"],
        return_type: "string",
    },
    FunctionDefinition {
        name: "get_repository_owner",
        summary: "Get the owner of a repository from the full name.",
        parameters: &["full_name"],
        return_type: "string",
    },
];

fn split_full_name(full_name: &str) -> Result<(&str, &str)> {
    full_name
        .split_once('/')
        .ok_or_else(|| FunctionError::MissingSeparator(full_name.to_string()))
}

/// Everything after the first `/`.
pub fn get_repository_name(full_name: &str) -> Result<&str> {
    split_full_name(full_name).map(|(_, name)| name)
}

/// Everything before the first `/`.
pub fn get_repository_owner(full_name: &str) -> Result<&str> {
    split_full_name(full_name).map(|(owner, _)| owner)
}

/// Call a function by name with host-supplied arguments.
pub fn call(name: &str, arguments: &[Value]) -> Result<Value> {
    let definition = FUNCTIONS
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| FunctionError::UnknownFunction(name.to_string()))?;

    if arguments.len() != definition.parameters.len() {
        return Err(FunctionError::ArgumentCount {
            function: definition.name,
            expected: definition.parameters.len(),
            actual: arguments.len(),
        });
    }
    let full_name = arguments[0]
        .as_str()
        .ok_or(FunctionError::ArgumentType {
            function: definition.name,
            parameter: definition.parameters[0],
        })?;

    let result = evaluate(definition.name, full_name)?;
    Ok(Value::String(result.to_string()))
}

fn evaluate<'a>(name: &str, full_name: &'a str) -> Result<&'a str> {
    match name {
        "get_repository_name" => get_repository_name(full_name),
        "get_repository_owner" => get_repository_owner(full_name),
        other => Err(FunctionError::UnknownFunction(other.to_string())),
    }
}
