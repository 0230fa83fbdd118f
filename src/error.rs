use std::path::PathBuf;

/// Operational failures. Validation problems are reported as findings, not errors.
#[derive(thiserror::Error, Debug)]
pub enum LintError {
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to read vocabulary {path}: {source}")]
    VocabularyRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid vocabulary {path}: {source}")]
    VocabularyParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("vocabulary {0} declares no setting types")]
    EmptyVocabulary(PathBuf),
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
