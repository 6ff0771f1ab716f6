//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::{NodeId, TreeId};

/// Domain errors represent violations of the tree's structural invariants.
/// Every mutating operation validates first, so a returned error means the
/// tree was left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node '{0}' is not in the tree")]
    NodeNotFound(NodeId),

    #[error("can't create node with id '{0}': identifier already in tree")]
    DuplicateIdentifier(NodeId),

    #[error("duplicated nodes {0:?} exist")]
    DuplicateIdentifiers(Vec<NodeId>),

    #[error("a tree takes one root merely")]
    MultipleRoot,

    #[error("the destination '{destination}' is a descendant of '{moved}'")]
    Loop { moved: NodeId, destination: NodeId },

    #[error("cannot link past the root node, delete it with remove_node()")]
    LinkPastRoot,

    #[error("level {requested} must be smaller than level {actual} of node '{node}'")]
    InvalidLevel {
        node: NodeId,
        requested: usize,
        actual: usize,
    },

    #[error("invalid traversal mode: {0}")]
    InvalidMode(String),

    #[error("node '{node}' was never registered in tree '{tree}'")]
    UnknownTreeContext { node: NodeId, tree: TreeId },

    #[error("invalid argument: {0}")]
    Config(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
