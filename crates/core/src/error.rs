/// Errors raised while loading or validating the condition catalog.
///
/// All of these are fatal at startup: a process with a malformed catalog must not serve
/// requests.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}: {source}", .path.display())]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },
    #[error("catalog contains no conditions")]
    NoConditions,
    #[error("condition #{0} has an empty name")]
    EmptyConditionName(usize),
    #[error("duplicate condition name: {0}")]
    DuplicateCondition(String),
    #[error("condition '{0}' has no keywords")]
    EmptyKeywords(String),
    #[error("condition '{condition}' has a keyword that normalizes to nothing: {keyword:?}")]
    EmptyKeyword { condition: String, keyword: String },
    #[error("condition '{condition}' lists keyword '{keyword}' more than once")]
    DuplicateKeyword { condition: String, keyword: String },
    #[error("condition '{0}' has an invalid base risk weight (must be finite and >= 0)")]
    InvalidRiskWeight(String),
    #[error("emergency rule #{0} has no trigger phrases")]
    EmptyTriggers(usize),
    #[error("emergency rule #{index} has a trigger phrase that normalizes to nothing: {phrase:?}")]
    EmptyTrigger { index: usize, phrase: String },
    #[error("emergency rule #{index} lists trigger phrase '{phrase}' more than once")]
    DuplicateTrigger { index: usize, phrase: String },
    #[error("emergency rule #{0} has an empty message")]
    EmptyMessage(usize),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Errors raised while resolving runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
