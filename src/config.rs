//! config.rs — engine tuning knobs for the profiling fan-out.
//!
//! Defaults work out of the box; a TOML file and/or env vars can override:
//!
//! ```toml
//! fan_out_limit = 8
//! lookup_timeout_ms = 2000
//! ```

use serde::Deserialize;
use std::{env, fs, path::Path, time::Duration};

pub const ENV_FANOUT_LIMIT: &str = "RADAR_FANOUT_LIMIT";
pub const ENV_LOOKUP_TIMEOUT_MS: &str = "RADAR_LOOKUP_TIMEOUT_MS";

const DEFAULT_FANOUT_LIMIT: usize = 8;
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 2000;
/// Floor on the per-lookup timeout so a typo can't make every lookup fail.
const MIN_LOOKUP_TIMEOUT_MS: u64 = 50;

fn default_fan_out_limit() -> usize {
    DEFAULT_FANOUT_LIMIT
}
fn default_lookup_timeout_ms() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_MS
}

/// Tuning for the concurrent per-member lookups issued by roster profiling.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Maximum in-flight candidate/score lookups during profiling.
    #[serde(default = "default_fan_out_limit")]
    pub fan_out_limit: usize,
    /// Per-lookup timeout; a member whose lookup exceeds it is excluded from
    /// aggregates rather than failing the profile.
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fan_out_limit: DEFAULT_FANOUT_LIMIT,
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file, then apply env overrides and sanitize.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: EngineConfig = toml::from_str(&data)?;
        Ok(cfg.with_env_overrides().sanitized())
    }

    /// Defaults plus env overrides; never fails.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides().sanitized()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(v) = parse_env_usize(ENV_FANOUT_LIMIT) {
            self.fan_out_limit = v;
        }
        if let Some(v) = parse_env_u64(ENV_LOOKUP_TIMEOUT_MS) {
            self.lookup_timeout_ms = v;
        }
        self
    }

    fn sanitized(mut self) -> Self {
        self.fan_out_limit = self.fan_out_limit.max(1);
        self.lookup_timeout_ms = self.lookup_timeout_ms.max(MIN_LOOKUP_TIMEOUT_MS);
        self
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

fn parse_env_usize(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

fn parse_env_u64(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}
