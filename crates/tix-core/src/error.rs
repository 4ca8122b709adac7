//! Error types for tix

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ticket {0} not found")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}
