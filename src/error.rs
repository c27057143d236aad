use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("No book with ISBN {0}")]
    NotFound(String),

    #[error("No copies of {0} are available")]
    NoCopiesAvailable(String),

    #[error("No copies of {0} are currently issued")]
    NothingIssued(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
