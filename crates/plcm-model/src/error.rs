//! Model error types.

use thiserror::Error;

use crate::device::DeviceId;
use crate::variable::NodePath;

/// Errors raised when addressing or editing the document tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No device with this id exists in the document.
    #[error("device {0} not found")]
    DeviceNotFound(DeviceId),

    /// The path does not point at a node.
    #[error("no variable node at {0}")]
    NodeNotFound(NodePath),

    /// The path points at a variable where a group was expected.
    #[error("node at {0} is not a group")]
    NotAGroup(NodePath),

    /// The path points at a group where a variable was expected.
    #[error("node at {0} is not a variable")]
    NotAVariable(NodePath),

    /// The root group of a device cannot be removed.
    #[error("the root variable group cannot be removed")]
    RootRemoval,
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
