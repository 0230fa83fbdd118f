use crate::domain::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_EXCLUDES, DEFAULT_EXTENSIONS, MAX_RANGE_STEPS,
};
use crate::error::LintError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// `count <= max_steps`
    #[default]
    Inclusive,
    /// `count < max_steps`
    Strict,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FractionalSteps {
    /// A non-integer step count is itself a finding.
    #[default]
    Reject,
    Floor,
    Ceil,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangePolicy {
    pub max_steps: u32,
    pub comparison: Comparison,
    pub fractional_steps: FractionalSteps,
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self {
            max_steps: MAX_RANGE_STEPS,
            comparison: Comparison::default(),
            fractional_steps: FractionalSteps::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VocabularyConfig {
    pub file: Option<PathBuf>,
    pub extra_setting_types: Vec<String>,
    pub extra_block_types: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub strict: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            strict: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    pub range: RangePolicy,
    pub vocabulary: VocabularyConfig,
    pub scan: ScanConfig,
}

/// Loads `explicit` if given, else `./.schemalint.toml` when present, else defaults.
///
/// A relative `vocabulary.file` is resolved against the config file's directory.
pub fn load_config(explicit: Option<&Path>) -> Result<LintConfig, LintError> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(LintError::PathNotFound(p.to_path_buf()));
            }
            p.to_path_buf()
        }
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(LintConfig::default());
            }
            p
        }
    };

    let raw = std::fs::read_to_string(&path).map_err(|source| LintError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    let mut cfg = parse_config(&raw).map_err(|source| LintError::ConfigParse {
        path: path.clone(),
        source,
    })?;

    if let Some(file) = cfg.vocabulary.file.as_mut() {
        if file.is_relative() {
            if let Some(parent) = path.parent() {
                *file = parent.join(&*file);
            }
        }
    }
    tracing::debug!(config = %path.display(), "loaded config");
    Ok(cfg)
}

pub fn parse_config(raw: &str) -> Result<LintConfig, toml::de::Error> {
    toml::from_str(raw)
}
