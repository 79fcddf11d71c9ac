use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Failed to read stdin: {0}")]
    StdinRead(#[from] io::Error),

    #[error("Failed to parse input JSON: {0}")]
    InputParse(#[from] serde_json::Error),

    #[error("Failed to read skill registry from {path}: {source}")]
    RegistryRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse skill registry: {0}")]
    RegistryParse(String),

    #[error("Skill registry not found at {0}")]
    RegistryNotFound(PathBuf),

    #[error("Cannot resolve executable location: {0}")]
    ExecutablePath(io::Error),
}
