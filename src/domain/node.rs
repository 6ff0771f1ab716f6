//! Tree node with per-tree parent/children bookkeeping.
//!
//! A single `Node` may be registered in several trees at once (shallow
//! copies, subtrees, pastes). Its relationships are therefore recorded per
//! tree identifier; the node itself knows nothing about any `Tree`.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{instrument, warn};
use uuid::Uuid;

use crate::domain::error::{TreeError, TreeResult};

/// Unique key of a node within one tree.
pub type NodeId = String;

/// Unique key of a tree; used to address a node's per-tree pointers.
pub type TreeId = String;

/// Shared handle to a node. Trees holding the same handle share the node.
pub type NodeRef<T> = Rc<RefCell<Node<T>>>;

/// Edit operation applied to a node's successor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Append the identifier.
    Add,
    /// Remove the first occurrence of the identifier.
    Delete,
    /// Overwrite the identifier in place with a replacement.
    Replace,
    #[deprecated(note = "use UpdateMode::Add")]
    Insert,
}

/// Elementary tree entity: identifier, display tag, optional payload.
#[derive(Debug, Clone)]
pub struct Node<T = ()> {
    identifier: NodeId,
    tag: String,
    data: Option<T>,
    /// Display hint: renderers do not descend into collapsed nodes.
    pub expanded: bool,
    predecessor: HashMap<TreeId, Option<NodeId>>,
    successors: HashMap<TreeId, Vec<NodeId>>,
}

impl<T> Node<T> {
    /// Create a node. A missing identifier is generated (UUID v4), a missing
    /// tag defaults to the identifier.
    pub fn new(tag: Option<&str>, identifier: Option<&str>, data: Option<T>) -> Self {
        let identifier = identifier
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let tag = tag.map(str::to_string).unwrap_or_else(|| identifier.clone());
        Self {
            identifier,
            tag,
            data,
            expanded: true,
            predecessor: HashMap::new(),
            successors: HashMap::new(),
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Wrap into a shared handle.
    pub fn into_ref(self) -> NodeRef<T> {
        Rc::new(RefCell::new(self))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Renaming is only sanctioned through `Tree::update_node`, which
    /// re-keys the tree's registry together with the node.
    pub(crate) fn set_identifier(&mut self, identifier: impl Into<NodeId>) {
        self.identifier = identifier.into();
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    pub fn set_data(&mut self, data: Option<T>) {
        self.data = data;
    }

    /// Parent of this node in tree `tree_id`.
    ///
    /// Fails if the node was never registered under `tree_id`; `Ok(None)`
    /// means the node is that tree's root.
    pub fn predecessor(&self, tree_id: &str) -> TreeResult<Option<&str>> {
        self.predecessor
            .get(tree_id)
            .map(|p| p.as_deref())
            .ok_or_else(|| TreeError::UnknownTreeContext {
                node: self.identifier.clone(),
                tree: tree_id.to_string(),
            })
    }

    /// Unconditional overwrite; cycle checks are the tree's job.
    pub fn set_predecessor(&mut self, tree_id: &str, parent: Option<&str>) {
        self.predecessor
            .insert(tree_id.to_string(), parent.map(str::to_string));
    }

    /// Children of this node in tree `tree_id`, empty if unknown.
    pub fn successors(&self, tree_id: &str) -> &[NodeId] {
        self.successors
            .get(tree_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace the children list, preserving the iteration order of `value`.
    pub fn set_successors<I>(&mut self, tree_id: &str, value: I)
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        self.successors.insert(
            tree_id.to_string(),
            value.into_iter().map(Into::into).collect(),
        );
    }

    pub fn clear_successors(&mut self, tree_id: &str) {
        self.successors.insert(tree_id.to_string(), Vec::new());
    }

    /// Edit the children list of `tree_id`.
    ///
    /// `Delete` of an absent entry only logs a warning. `Replace` requires
    /// `replace` and an existing entry.
    #[allow(deprecated)]
    #[instrument(level = "trace", skip(self), fields(node = %self.identifier))]
    pub fn update_successors(
        &mut self,
        tree_id: &str,
        nid: &str,
        mode: UpdateMode,
        replace: Option<&str>,
    ) -> TreeResult<()> {
        let list = self.successors.entry(tree_id.to_string()).or_default();
        match mode {
            UpdateMode::Add => list.push(nid.to_string()),
            UpdateMode::Delete => match list.iter().position(|s| s == nid) {
                Some(pos) => {
                    list.remove(pos);
                }
                None => warn!(
                    "node '{}' is not a successor of '{}' in tree '{}'",
                    nid, self.identifier, tree_id
                ),
            },
            UpdateMode::Replace => {
                let replacement = replace.ok_or_else(|| {
                    TreeError::Config("REPLACE mode requires a replacement identifier".into())
                })?;
                let pos = list
                    .iter()
                    .position(|s| s == nid)
                    .ok_or_else(|| TreeError::NodeNotFound(nid.to_string()))?;
                list[pos] = replacement.to_string();
            }
            UpdateMode::Insert => {
                warn!("UpdateMode::Insert is deprecated, use UpdateMode::Add");
                list.push(nid.to_string());
            }
        }
        Ok(())
    }

    pub fn is_leaf(&self, tree_id: &str) -> bool {
        self.successors(tree_id).is_empty()
    }

    /// True iff registered under `tree_id` without a parent.
    pub fn is_root(&self, tree_id: &str) -> bool {
        matches!(self.predecessor.get(tree_id), Some(None))
    }

    /// Copy parent and children from one tree context to another.
    pub fn clone_pointers(&mut self, from: &str, to: &str) {
        let parent = self.predecessor.get(from).cloned().flatten();
        let children = self.successors(from).to_vec();
        self.predecessor.insert(to.to_string(), parent);
        self.successors.insert(to.to_string(), children);
    }

    /// Make the node a parentless, childless member of `tree_id`.
    pub fn reset_pointers(&mut self, tree_id: &str) {
        self.predecessor.insert(tree_id.to_string(), None);
        self.successors.insert(tree_id.to_string(), Vec::new());
    }

    /// Forget tree `tree_id` entirely.
    pub fn remove_pointers(&mut self, tree_id: &str) {
        self.predecessor.remove(tree_id);
        self.successors.remove(tree_id);
    }

    /// Tree identifiers this node is registered in.
    pub fn tree_ids(&self) -> impl Iterator<Item = &str> {
        self.predecessor.keys().map(String::as_str)
    }

    /// Node order: lexicographic by tag. Default sibling order for
    /// traversal and rendering when sorting is on and no key is given.
    pub fn cmp_by_tag(&self, other: &Self) -> Ordering {
        self.tag.cmp(&other.tag)
    }
}

impl<T: Clone> Node<T> {
    /// Deep copy that carries only the pointers of tree `from`, re-keyed to
    /// tree `to`. The copy is not registered anywhere else.
    pub fn copy_into(&self, from: &str, to: &str) -> Self {
        let mut copy = Self {
            identifier: self.identifier.clone(),
            tag: self.tag.clone(),
            data: self.data.clone(),
            expanded: self.expanded,
            predecessor: HashMap::new(),
            successors: HashMap::new(),
        };
        copy.predecessor
            .insert(to.to_string(), self.predecessor.get(from).cloned().flatten());
        copy.successors
            .insert(to.to_string(), self.successors(from).to_vec());
        copy
    }
}

impl<T: fmt::Debug> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node(tag={}, identifier={}, data={:?})",
            self.tag, self.identifier, self.data
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_identifier_and_defaults_tag() {
        let node: Node = Node::new(None, None, None);
        assert!(Uuid::parse_str(node.identifier()).is_ok());
        assert_eq!(node.tag(), node.identifier());
    }

    #[test]
    fn test_set_identifier_keeps_pointers() {
        let mut node: Node = Node::new(Some("A"), Some("a"), None);
        node.set_predecessor("t", Some("p"));
        node.set_identifier("b");
        assert_eq!(node.identifier(), "b");
        assert_eq!(node.predecessor("t").unwrap(), Some("p"));
    }
}
