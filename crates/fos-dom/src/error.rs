//! DOM error types

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node id does not refer to a live arena slot
    #[error("node {0} not found")]
    NotFound(NodeId),

    /// Inserting a node into itself or one of its descendants
    #[error("hierarchy request error: {child} cannot be inserted into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Reference node is not a child of the given parent
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Node has no parent to be removed from
    #[error("node {0} has no parent")]
    NoParent(NodeId),

    /// Operation needs an element but got another node type
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// 2D context requested for something other than `<canvas>`
    #[error("node {0} is not a canvas element")]
    NotACanvas(NodeId),
}

/// Selector parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected `{found}` at offset {offset} in selector")]
    UnexpectedToken { offset: usize, found: char },

    #[error("unexpected end of selector")]
    UnexpectedEnd,

    #[error("unsupported pseudo-class `:{0}`")]
    UnsupportedPseudoClass(String),

    #[error("invalid an+b expression `{0}`")]
    InvalidNth(String),
}
