// src/config.rs
//! Runtime configuration (TOML).
//!
//! Lookup order:
//! 1) `$TRIAGE_CONFIG_PATH` (must exist)
//! 2) `config/triage.toml`
//! 3) built-in defaults
//!
//! `$TRIAGE_MODEL_PATH` overrides `model_path` from any of the above.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::CorpusConfig;
use crate::locations::{GeoPoint, DEFAULT_COORDINATE};

pub const ENV_CONFIG_PATH: &str = "TRIAGE_CONFIG_PATH";
pub const ENV_MODEL_PATH: &str = "TRIAGE_MODEL_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/triage.toml";

fn default_coordinate() -> GeoPoint {
    DEFAULT_COORDINATE
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriageConfig {
    /// Naive-Bayes artifact; absent → keyword rules only.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    /// Map target when a report has no (or an unmapped) location.
    #[serde(default = "default_coordinate")]
    pub default_coordinate: GeoPoint,
    #[serde(default)]
    pub corpus: CorpusConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            default_coordinate: DEFAULT_COORDINATE,
            corpus: CorpusConfig::default(),
        }
    }
}

impl TriageConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: TriageConfig = toml::from_str(s).context("parsing triage config")?;
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading triage config from {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Env + fallbacks, then env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if p.exists() {
                Self::load_from(&p)?
            } else {
                Self::default()
            }
        };

        if let Ok(model) = std::env::var(ENV_MODEL_PATH) {
            let model = model.trim();
            cfg.model_path = (!model.is_empty()).then(|| PathBuf::from(model));
        }
        Ok(cfg)
    }
}
