//! Error types for the arm tree and configuration loading.

use crate::arm::ArmId;

/// Error type for structural and geometric operations on the arm tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArmError {
    #[error("arm {0:?} is not part of the tree")]
    UnknownArm(ArmId),
    #[error("the root arm cannot be removed or reparented")]
    RootImmutable,
    #[error("arm direction has zero length")]
    DegenerateArm,
}

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
