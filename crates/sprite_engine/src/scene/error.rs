//! Scene graph errors

use thiserror::Error;

use super::tree::NodeId;

/// Errors raised by scene graph operations
///
/// Every operation validates before it mutates, so a returned error means the
/// tree is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// An argument outside the accepted domain (axis name, frame index)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The node is not a child of the node the operation was called on
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Node the operation was invoked on
        parent: NodeId,
        /// Node that was expected among its children
        child: NodeId,
    },

    /// The handle does not refer to a live node
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Diameter or radius was set on a rectangular node
    #[error("{0} is not circular")]
    NotCircular(String),
}

/// Result type alias for scene graph operations
pub type Result<T> = std::result::Result<T, SceneError>;
