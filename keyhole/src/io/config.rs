//! Solver configuration stored in `keyhole.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Solver configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable.
/// Missing fields default to a runnable local setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of keys to submit before giving up. Unset means
    /// unbounded.
    pub search_limit: Option<u32>,

    pub oracle: OracleConfig,
}

/// Which oracle backend scores the candidates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OracleMode {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OracleConfig {
    pub mode: OracleMode,

    /// Correct key scored by the local oracle.
    pub local_key: String,

    /// Simulated per-call latency of the local oracle in milliseconds.
    /// Nonzero latency makes the interactive pause/stop controls observable.
    pub local_latency_ms: u64,

    /// Endpoint of the remote keyhole service.
    pub remote_url: String,

    /// Optional correct-key override forwarded to the remote service.
    pub remote_key_override: Option<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            mode: OracleMode::Local,
            local_key: "zat".to_string(),
            local_latency_ms: 1500,
            remote_url: String::new(),
            remote_key_override: None,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            search_limit: None,
            oracle: OracleConfig::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.search_limit == Some(0) {
            return Err(anyhow!("search_limit must be > 0 when set"));
        }
        if self.oracle.mode == OracleMode::Remote && self.oracle.remote_url.trim().is_empty() {
            return Err(anyhow!(
                "oracle.remote_url must be set when oracle.mode is \"remote\""
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SolverConfig::default()`.
pub fn load_config(path: &Path) -> Result<SolverConfig> {
    if !path.exists() {
        let cfg = SolverConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SolverConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SolverConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
