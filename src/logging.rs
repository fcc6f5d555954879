//! tracing subscriber setup.
//!
//! Logs always go to stderr because stdout carries the JSON the host reads.

use std::fs::OpenOptions;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::shared::env_var::EnvVars;

const DEFAULT_FILTER: &str = "warn";
/// `TF_LOG` value asking for every level as JSON lines.
const JSON_LOG_LEVEL: &str = "json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn is_json_level(directive: Option<&str>) -> bool {
    directive.is_some_and(|d| d.trim().eq_ignore_ascii_case(JSON_LOG_LEVEL))
}

/// Build the filter from a directive, falling back to `warn` when it does not parse.
fn build_filter(directive: Option<&str>) -> EnvFilter {
    if is_json_level(directive) {
        return EnvFilter::new("trace");
    }
    directive
        .and_then(|d| EnvFilter::try_new(d.to_ascii_lowercase()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// `TF_LOG=JSON` forces JSON output whatever `--log-format` says.
fn select_format(format: LogFormat, directive: Option<&str>) -> LogFormat {
    if is_json_level(directive) {
        LogFormat::Json
    } else {
        format
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file on drop and must be held until exit.
pub fn init(format: LogFormat, env: &EnvVars) -> anyhow::Result<Option<WorkerGuard>> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let directive = env.log_filter.as_deref();
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);
    match select_format(format, directive) {
        LogFormat::Text => layers.push(stderr.boxed()),
        LogFormat::Json => layers.push(stderr.json().boxed()),
    }

    let guard = match &env.log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            layers.push(fmt::layer().with_ansi(false).with_writer(writer).boxed());
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(build_filter(directive))
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(guard)
}
