//! Error types for recipe loading.

use thiserror::Error;

/// Errors that can occur while loading or converting a recipe.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Error reading the recipe file
    #[error("Failed to read recipe file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error parsing TOML
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported recipe format: {0}")]
    UnsupportedFormat(String),

    /// Recipe version newer than this build understands
    #[error("Unsupported recipe version: {0}")]
    UnsupportedVersion(u32),

    /// Zone string that is not UTC, Local, an IANA name or an offset
    #[error("Invalid time zone: {0}")]
    InvalidZone(String),

    /// Format argument that has no scalar representation
    #[error("Invalid format argument at position {position}: {reason}")]
    InvalidArgument { position: usize, reason: String },
}
