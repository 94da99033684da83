use matgroup::core::io::IoError;
use matgroup::core::matcher::MatcherConfigError;
use matgroup::workflows::group::GroupingError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Grouping(#[from] GroupingError),

    #[error("Configuration error: {0}")]
    Config(#[from] MatcherConfigError),

    #[error(transparent)]
    File(#[from] IoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
