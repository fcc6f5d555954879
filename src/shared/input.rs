//! JSON documents handed to the CLI by path or on stdin.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Location meaning "read from stdin".
pub const STDIN: &str = "-";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Only one input can be read from stdin")]
    StdinTwice,
}

pub type Result<T> = std::result::Result<T, InputError>;

fn parse(location: &str, reader: impl Read) -> Result<Value> {
    serde_json::from_reader(reader).map_err(|source| InputError::Parse {
        location: location.to_string(),
        source,
    })
}

/// Read a JSON document from a file path, or from stdin for `-`.
pub fn read_json(location: &str) -> Result<Value> {
    if location == STDIN {
        return parse("stdin", io::stdin().lock());
    }
    let file = File::open(Path::new(location)).map_err(|source| InputError::Read {
        location: location.to_string(),
        source,
    })?;
    parse(location, io::BufReader::new(file))
}

/// Read two documents, refusing to consume stdin for both.
pub fn read_json_pair(first: &str, second: &str) -> Result<(Value, Value)> {
    if first == STDIN && second == STDIN {
        return Err(InputError::StdinTwice);
    }
    Ok((read_json(first)?, read_json(second)?))
}
