// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// The query named data the snapshot does not have.
    #[error("not found: {0}")]
    NotFound(outbreak::Error),

    #[error("{0}")]
    Store(outbreak::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),
}

impl From<outbreak::Error> for CliError {
    fn from(err: outbreak::Error) -> Self {
        if err.is_not_found() {
            CliError::NotFound(err)
        } else {
            CliError::Store(err)
        }
    }
}

impl CliError {
    /// Process exit code: 2 for missing data, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
