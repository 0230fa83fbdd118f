use crate::domain::constants::{
    BUILTIN_BLOCK_TYPES, BUILTIN_SETTING_TYPES, BUILTIN_VOCABULARY_VERSION,
};
use crate::domain::models::{Finding, FindingKind, ValidationResult};
use crate::error::LintError;
use crate::services::config::VocabularyConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Closed, versioned set of accepted setting and reserved block types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub version: String,
    pub setting_types: BTreeSet<String>,
    #[serde(default)]
    pub block_types: BTreeSet<String>,
}

impl Vocabulary {
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_VOCABULARY_VERSION.to_string(),
            setting_types: BUILTIN_SETTING_TYPES.iter().map(|s| s.to_string()).collect(),
            block_types: BUILTIN_BLOCK_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Reads a JSON vocabulary file. It replaces the built-in list entirely.
    pub fn load(path: &Path) -> Result<Self, LintError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LintError::VocabularyRead {
            path: path.to_path_buf(),
            source,
        })?;
        let vocab: Vocabulary =
            serde_json::from_str(&raw).map_err(|source| LintError::VocabularyParse {
                path: path.to_path_buf(),
                source,
            })?;
        if vocab.setting_types.is_empty() {
            return Err(LintError::EmptyVocabulary(path.to_path_buf()));
        }
        Ok(vocab)
    }

    /// Effective vocabulary: `override_file` beats the config file, then config extras apply.
    pub fn resolve(cfg: &VocabularyConfig, override_file: Option<&Path>) -> Result<Self, LintError> {
        let mut vocab = match override_file.or(cfg.file.as_deref()) {
            Some(path) => {
                tracing::debug!(vocabulary = %path.display(), "loading vocabulary file");
                Self::load(path)?
            }
            None => Self::builtin(),
        };
        vocab
            .setting_types
            .extend(cfg.extra_setting_types.iter().cloned());
        vocab.block_types.extend(cfg.extra_block_types.iter().cloned());
        Ok(vocab)
    }

    pub fn accepts_setting(&self, type_name: &str) -> bool {
        self.setting_types.contains(type_name)
    }

    pub fn accepts_block(&self, type_name: &str) -> bool {
        self.block_types.contains(type_name)
    }
}

pub struct SettingTypeValidator;

impl SettingTypeValidator {
    pub fn validate(type_value: &str, accepted: &BTreeSet<String>) -> ValidationResult {
        if accepted.contains(type_value) {
            return ValidationResult::Pass;
        }
        let mut finding = Finding::new(
            FindingKind::UnknownType,
            format!("type '{}' is not in the accepted vocabulary", type_value),
        )
        .at("type");
        if let Some(near) = closest(type_value, accepted) {
            finding = finding.with_remedy(format!("did you mean '{}'?", near));
        }
        ValidationResult::Findings(vec![finding])
    }
}

/// Accepted type sharing the longest prefix (at least 3 chars) with `needle`.
fn closest<'a>(needle: &str, accepted: &'a BTreeSet<String>) -> Option<&'a str> {
    accepted
        .iter()
        .map(|cand| {
            let shared = needle
                .chars()
                .zip(cand.chars())
                .take_while(|(a, b)| a == b)
                .count();
            (shared, cand)
        })
        .filter(|(shared, _)| *shared >= 3)
        .max_by(|(a, ca), (b, cb)| a.cmp(b).then_with(|| cb.len().cmp(&ca.len())))
        .map(|(_, cand)| cand.as_str())
}
