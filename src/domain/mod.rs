//! Domain layer: nodes, trees and traversal
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod node;
pub mod traversal;
pub mod tree;

pub use builder::TreeBuilder;
pub use error::{TreeError, TreeResult};
pub use node::{Node, NodeId, NodeRef, TreeId, UpdateMode};
pub use traversal::{
    ExpandIter, Expansion, NodeComparator, NodeFilter, RSearch, TraversalMode,
};
pub use tree::{NodeUpdate, Tree};
