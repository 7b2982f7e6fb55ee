//! Service Configuration
//!
//! Settings come from `--flag value` pairs on the command line, then from
//! environment variables, then from defaults.

use crate::corpus::types::ScanOptions;
use crate::search::types::DuplicatePolicy;

use anyhow::{Result, anyhow, bail};
use std::collections::HashMap;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const USAGE: &str = "\
Usage: word-stats [--bind <addr:port>] [--corpus <glob>] [--file-workers <n>]
                  [--word-workers <n>] [--duplicates <per-occurrence|once>]
                  [--scan-timeout-ms <ms>] [--scan-attempts <n>] [--log-level <level>]";

pub const DEFAULT_BIND: &str = "127.0.0.1:4200";
pub const DEFAULT_CORPUS: &str = "./data/*.txt";
pub const DEFAULT_FILE_WORKERS: usize = 16;
pub const DEFAULT_WORD_WORKERS: usize = 8;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Glob pattern selecting the corpus files.
    pub corpus_pattern: String,
    /// Max concurrent file scans for one word.
    pub file_workers: usize,
    /// Max concurrent word updates for one query.
    pub word_workers: usize,
    pub duplicates: DuplicatePolicy,
    pub scan: ScanOptions,
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4200)),
            corpus_pattern: DEFAULT_CORPUS.to_string(),
            file_workers: DEFAULT_FILE_WORKERS,
            word_workers: DEFAULT_WORD_WORKERS,
            duplicates: DuplicatePolicy::default(),
            scan: ScanOptions::default(),
            log_level: tracing::Level::INFO,
        }
    }
}

impl Config {
    /// Reads the process arguments and environment.
    pub fn from_env_and_args() -> Result<Self> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Builds a config from explicit arguments (without the program name) and
    /// an environment lookup.
    pub fn parse<I, E>(args: I, env: E) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut flags: HashMap<String, String> = HashMap::new();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            if !flag.starts_with("--") {
                bail!("unexpected argument '{}'\n{}", flag, USAGE);
            }
            let value = args
                .next()
                .ok_or_else(|| anyhow!("missing value for {}\n{}", flag, USAGE))?;
            flags.insert(flag, value);
        }

        let lookup = |flag: &str, var: &str| flags.get(flag).cloned().or_else(|| env(var));

        let mut config = Config::default();

        if let Some(addr) = setting(lookup("--bind", "BIND_ADDR"), "--bind")? {
            config.bind_addr = addr;
        }
        if let Some(pattern) = lookup("--corpus", "CORPUS_PATTERN") {
            if pattern.trim().is_empty() {
                bail!("--corpus must not be empty");
            }
            config.corpus_pattern = pattern;
        }
        if let Some(n) = setting(lookup("--file-workers", "FILE_WORKERS"), "--file-workers")? {
            config.file_workers = positive(n, "--file-workers")?;
        }
        if let Some(n) = setting(lookup("--word-workers", "WORD_WORKERS"), "--word-workers")? {
            config.word_workers = positive(n, "--word-workers")?;
        }
        if let Some(policy) = setting(lookup("--duplicates", "DUPLICATE_POLICY"), "--duplicates")? {
            config.duplicates = policy;
        }
        if let Some(ms) = setting::<u64>(
            lookup("--scan-timeout-ms", "SCAN_TIMEOUT_MS"),
            "--scan-timeout-ms",
        )? {
            config.scan.timeout = Some(Duration::from_millis(positive(ms, "--scan-timeout-ms")?));
        }
        if let Some(n) = setting(lookup("--scan-attempts", "SCAN_ATTEMPTS"), "--scan-attempts")? {
            config.scan.attempts = positive(n, "--scan-attempts")?;
        }
        if let Some(level) = setting(lookup("--log-level", "LOG_LEVEL"), "--log-level")? {
            config.log_level = level;
        }

        Ok(config)
    }
}

fn setting<T>(raw: Option<String>, flag: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("invalid value '{}' for {}: {}", raw, flag, e)),
    }
}

fn positive<T>(value: T, flag: &str) -> Result<T>
where
    T: PartialEq + Default + Copy,
{
    if value == T::default() {
        bail!("{} must be greater than zero", flag);
    }
    Ok(value)
}
