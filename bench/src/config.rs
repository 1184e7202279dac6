//! Runner configuration, read from `BENCH_*` environment variables.

use anyhow::{Context, Result};
use bench_core::constants::{DEFAULT_LOG_LEVEL, LENGTH};
use log::LevelFilter;
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_LENGTH: &str = "BENCH_LENGTH";
pub const ENV_WARMUP: &str = "BENCH_WARMUP";
pub const ENV_SAMPLES: &str = "BENCH_SAMPLES";
pub const ENV_BATCH: &str = "BENCH_BATCH";
pub const ENV_LOG_LEVEL: &str = "BENCH_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "BENCH_LOG_FILE";

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Records per container.
    pub length: usize,
    /// Untimed iterations run before sampling each workload.
    pub warmup: usize,
    /// Samples collected per workload.
    pub samples: usize,
    /// Iterations timed together in one sample.
    pub batch: usize,
    pub log_level: LevelFilter,
    pub log_file: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            length: LENGTH,
            warmup: 1_000,
            samples: 50,
            batch: 1_000,
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

/// Load `.env` from the working directory or its parents, if there is one.
///
/// Returns the file that was loaded. Call before [`RunnerConfig::from_env`].
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load a specific env file. Variables already set are left alone.
pub fn load_dotenv_file(path: &Path) -> Result<PathBuf> {
    dotenvy::from_path(path)
        .with_context(|| format!("failed to load env file {}", path.display()))?;
    Ok(path.to_path_buf())
}

impl RunnerConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let length = parse_or(&lookup, ENV_LENGTH, defaults.length)?;
        let warmup = parse_or(&lookup, ENV_WARMUP, defaults.warmup)?;
        let samples = parse_or(&lookup, ENV_SAMPLES, defaults.samples)?;
        let batch = parse_or(&lookup, ENV_BATCH, defaults.batch)?;

        if samples == 0 {
            anyhow::bail!("{ENV_SAMPLES} must be at least 1");
        }
        if batch == 0 {
            anyhow::bail!("{ENV_BATCH} must be at least 1");
        }

        let level_name = lookup(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let log_level = bench_core::parse_level(&level_name)
            .with_context(|| format!("invalid {ENV_LOG_LEVEL}"))?;

        let log_file = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty());

        Ok(Self {
            length,
            warmup,
            samples,
            batch,
            log_level,
            log_file,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .replace('_', "")
            .parse::<T>()
            .with_context(|| format!("invalid {key}: `{raw}`")),
        None => Ok(default),
    }
}
