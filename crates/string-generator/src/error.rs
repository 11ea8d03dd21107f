//! Error types for generator pipelines.

use thiserror::Error;

/// Errors that can stop a generator pipeline.
///
/// The pipeline never recovers from any of these: the first error wins and
/// whatever was already written to the buffer is discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The OS entropy provider could not service a draw.
    #[error("Randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// Template/argument mismatch or an invalid timestamp layout.
    #[error("Format error: {0}")]
    Format(String),

    /// A character-set unit was given an empty set.
    #[error("Invalid character set: the set must contain at least one character")]
    InvalidCharacterSet,

    /// An alternatives unit was given no alternatives.
    #[error("No alternatives to choose from")]
    EmptyChoices,

    /// A draw was requested over an empty or unrepresentable range.
    #[error("Invalid draw range")]
    InvalidRange,

    /// Failure reported by a caller-supplied generator.
    #[error("Custom generator failed: {0}")]
    Custom(String),
}
