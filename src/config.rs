use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid number {value:?} for {flag}")]
    InvalidNumber { flag: String, value: String },
    #[error("unknown flag {0}")]
    UnknownFlag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub tick: Duration,
    pub pattern: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 80,
            tick: Duration::from_millis(200),
            pattern: None,
        }
    }
}

impl Config {
    /// parses `[PATTERN] [--rows N] [--cols N] [--tick MS]`, program name excluded.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--rows" => config.rows = number(&arg, args.next())?,
                "--cols" => config.cols = number(&arg, args.next())?,
                "--tick" => config.tick = Duration::from_millis(number(&arg, args.next())?),
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownFlag(flag.to_string()))
                }
                path => config.pattern = Some(PathBuf::from(path)),
            }
        }
        Ok(config)
    }
}

fn number<N: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<N, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        value,
    })
}

#[cfg(test)]
fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_defaults() {
    assert_eq!(Config::from_args(args(&[])).unwrap(), Config::default());
}

#[test]
fn test_parse_args() {
    let config =
        Config::from_args(args(&["glider.txt", "--rows", "10", "--tick", "50", "--cols", "12"]))
            .unwrap();
    assert_eq!(config.rows, 10);
    assert_eq!(config.cols, 12);
    assert_eq!(config.tick, Duration::from_millis(50));
    assert_eq!(config.pattern, Some(PathBuf::from("glider.txt")));
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        Config::from_args(args(&["--rows"])),
        Err(ConfigError::MissingValue("--rows".into()))
    );
    assert_eq!(
        Config::from_args(args(&["--cols", "-3"])),
        Err(ConfigError::InvalidNumber {
            flag: "--cols".into(),
            value: "-3".into()
        })
    );
    assert_eq!(
        Config::from_args(args(&["--speed", "2"])),
        Err(ConfigError::UnknownFlag("--speed".into()))
    );
}
