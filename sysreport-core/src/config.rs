//! Engine configuration
//!
//! Values come from an optional TOML file; command-line flags are applied on
//! top by the caller. Every field has a default so an empty file is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::modules::ssh::DEFAULT_MIN_MODULUS_BITS;
use crate::types::Tier;

/// Settings controlling a scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tier mode: 1 scores baseline checks only, 2 scores everything
    pub cis_mode: Tier,

    /// Minimum acceptable compliance score
    pub cis_threshold: f64,

    /// Exit non-zero when the score falls below `cis_threshold`
    pub fail_on_threshold: bool,

    /// Directory receiving the report files
    pub out_dir: PathBuf,

    pub min_modulus_bits: u32,

    /// Lowest lynis hardening index that passes
    pub lynis_min_score: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cis_mode: Tier::Baseline,
            cis_threshold: 85.0,
            fail_on_threshold: false,
            out_dir: PathBuf::from("."),
            min_modulus_bits: DEFAULT_MIN_MODULUS_BITS,
            lynis_min_score: 60,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
