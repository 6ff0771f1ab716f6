//! Ordered n-ary trees with shared multi-tree nodes.
//!
//! Layout:
//! - `domain`: nodes, trees, traversal and bulk construction
//! - `application`: dict/JSON, DOT and text export
//! - `config`: layered settings
//! - `cli`: the `rstree` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{
    ApplicationError, ApplicationResult, DictOptions, GraphType, GraphvizOptions, LineStyle,
    ShowOptions,
};
pub use domain::{
    Node, NodeId, NodeRef, NodeUpdate, TraversalMode, Tree, TreeBuilder, TreeError, TreeId,
    TreeResult, UpdateMode,
};
