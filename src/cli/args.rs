//! Command-line argument parsing for `sse-tail`.
//!
//! This module handles parsing command-line arguments and determining
//! which command to execute.

use std::time::Duration;
use thiserror::Error;

use crate::config::ClientConfig;

/// Options for tailing a stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TailOptions {
    /// Stream URL
    pub url: String,
    /// Print events as JSON lines
    pub json: bool,
    /// Resume from this event id
    pub last_event_id: Option<String>,
    /// Override the attempt budget
    pub max_attempts: Option<u32>,
    /// Override the initial reconnect delay, in milliseconds
    pub retry_ms: Option<u64>,
    /// Extra request headers, in order given
    pub headers: Vec<(String, String)>,
}

impl TailOptions {
    /// Build a client config: environment overrides first, flags on top.
    pub fn to_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env(self.url.as_str());
        if let Some(id) = &self.last_event_id {
            config = config.with_last_event_id(id.as_str());
        }
        if let Some(attempts) = self.max_attempts {
            config = config.with_max_attempts(attempts);
        }
        if let Some(millis) = self.retry_ms {
            config = config.with_retry_delay(Duration::from_millis(millis));
        }
        for (name, value) in &self.headers {
            config = config.with_header(name.as_str(), value.as_str());
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Connect and print events (default)
    Tail(TailOptions),
}

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("missing stream URL")]
    MissingUrl,
    #[error("unexpected argument '{0}'")]
    Unexpected(String),
    #[error("option '{0}' requires a value")]
    MissingValue(String),
    #[error("invalid value '{value}' for '{option}'")]
    InvalidValue { option: String, value: String },
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use resumable_sse::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["sse-tail".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = TailOptions::default();
    let mut url = None;
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--json" => options.json = true,
            "--last-event-id" => options.last_event_id = Some(value_of(&arg, &mut args)?),
            "--max-attempts" => {
                options.max_attempts = Some(parse_value(&arg, value_of(&arg, &mut args)?)?)
            }
            "--retry-ms" => options.retry_ms = Some(parse_value(&arg, value_of(&arg, &mut args)?)?),
            "-H" | "--header" => {
                let raw = value_of(&arg, &mut args)?;
                options.headers.push(parse_header(&arg, &raw)?);
            }
            other if other.starts_with('-') => return Err(ArgsError::Unexpected(arg)),
            _ if url.is_none() => url = Some(arg),
            _ => return Err(ArgsError::Unexpected(arg)),
        }
    }

    options.url = url.ok_or(ArgsError::MissingUrl)?;
    Ok(CliCommand::Tail(options))
}

fn value_of(option: &str, args: &mut impl Iterator<Item = String>) -> Result<String, ArgsError> {
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(option.to_string()))
}

fn parse_value<T: std::str::FromStr>(option: &str, value: String) -> Result<T, ArgsError> {
    value.trim().parse().map_err(|_| ArgsError::InvalidValue {
        option: option.to_string(),
        value,
    })
}

fn parse_header(option: &str, raw: &str) -> Result<(String, String), ArgsError> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ArgsError::InvalidValue {
            option: option.to_string(),
            value: raw.to_string(),
        }),
    }
}
