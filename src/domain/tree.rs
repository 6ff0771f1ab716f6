//! Ordered tree: a registry of shared nodes plus the structural operations
//! that keep their per-tree pointers consistent.
//!
//! Nodes record parent/children per tree identifier, so a `Tree` only ever
//! reads and writes the pointers keyed by its own identifier. Shallow copies,
//! subtrees and pastes share `NodeRef`s across trees; deep variants clone.
//!
//! Nodes are `Rc<RefCell<_>>` handles: holding a `borrow_mut()` of a node
//! while calling into the tree panics.

use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::{Node, NodeId, NodeRef, TreeId, UpdateMode};
use crate::domain::traversal::{Expansion, NodeFilter, RSearch};

/// Attribute patch applied by `Tree::update_node`.
#[derive(Debug, Clone)]
pub struct NodeUpdate<T> {
    identifier: Option<NodeId>,
    tag: Option<String>,
    data: Option<T>,
    expanded: Option<bool>,
}

impl<T> Default for NodeUpdate<T> {
    fn default() -> Self {
        Self {
            identifier: None,
            tag: None,
            data: None,
            expanded: None,
        }
    }
}

impl<T> NodeUpdate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the node; the tree re-keys its registry and all pointers.
    pub fn identifier(mut self, identifier: impl Into<NodeId>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }
}

/// Ordered tree of uniquely identified nodes with a single root.
#[derive(Debug)]
pub struct Tree<T = ()> {
    identifier: TreeId,
    root: Option<NodeId>,
    nodes: IndexMap<NodeId, NodeRef<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Empty tree with a generated identifier.
    pub fn new() -> Self {
        Self::with_identifier(Uuid::new_v4().to_string())
    }

    pub fn with_identifier(identifier: impl Into<TreeId>) -> Self {
        Self {
            identifier: identifier.into(),
            root: None,
            nodes: IndexMap::new(),
        }
    }

    /// New tree sharing every node of `self`; pointers are cloned into the
    /// new tree's identifier.
    #[instrument(level = "debug", skip(self), fields(tree = %self.identifier))]
    pub fn shallow_copy(&self, identifier: Option<&str>) -> TreeResult<Self> {
        let mut copy = self.sibling_tree(identifier)?;
        for (nid, node) in &self.nodes {
            node.borrow_mut()
                .clone_pointers(&self.identifier, &copy.identifier);
            copy.nodes.insert(nid.clone(), Rc::clone(node));
        }
        copy.root = self.root.clone();
        Ok(copy)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, nid: &str) -> bool {
        self.nodes.contains_key(nid)
    }

    /// Node handle for `nid`, failing with `NodeNotFound`.
    pub fn get(&self, nid: &str) -> TreeResult<NodeRef<T>> {
        self.node(nid).map(Rc::clone)
    }

    /// Node handle for `nid`, `None` if absent.
    pub fn get_node(&self, nid: &str) -> Option<NodeRef<T>> {
        self.nodes.get(nid).map(Rc::clone)
    }

    /// Registry entries in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeRef<T>)> {
        self.nodes.iter().map(|(nid, node)| (nid.as_str(), node))
    }

    pub fn all_nodes(&self) -> Vec<NodeRef<T>> {
        self.nodes.values().cloned().collect()
    }

    pub fn all_nodes_iter(&self) -> impl Iterator<Item = &NodeRef<T>> {
        self.nodes.values()
    }

    /// Nodes satisfying `predicate`, independent of tree structure.
    pub fn filter_nodes<'a>(
        &'a self,
        predicate: impl Fn(&Node<T>) -> bool + 'a,
    ) -> impl Iterator<Item = NodeRef<T>> + 'a {
        self.nodes
            .values()
            .filter(move |node| predicate(&node.borrow()))
            .cloned()
    }

    // ============================================================
    // Insertion
    // ============================================================

    /// Register `node` under `parent`, or as root when `parent` is `None`.
    #[instrument(level = "debug", skip(self, node), fields(tree = %self.identifier))]
    pub fn insert_node(&mut self, node: Node<T>, parent: Option<&str>) -> TreeResult<NodeRef<T>> {
        self.insert_node_ref(node.into_ref(), parent)
    }

    /// Like `insert_node`, but shares an existing handle.
    pub fn insert_node_ref(
        &mut self,
        node: NodeRef<T>,
        parent: Option<&str>,
    ) -> TreeResult<NodeRef<T>> {
        let nid = node.borrow().identifier().to_string();
        if self.contains(&nid) {
            return Err(TreeError::DuplicateIdentifier(nid));
        }
        match parent {
            None if self.root.is_some() => return Err(TreeError::MultipleRoot),
            None => self.root = Some(nid.clone()),
            Some(pid) => {
                self.node(pid)?.borrow_mut().update_successors(
                    &self.identifier,
                    &nid,
                    UpdateMode::Add,
                    None,
                )?;
            }
        }
        {
            let mut n = node.borrow_mut();
            n.set_predecessor(&self.identifier, parent);
            n.clear_successors(&self.identifier);
        }
        debug!("inserted '{}' under {:?}", nid, parent);
        self.nodes.insert(nid, Rc::clone(&node));
        Ok(node)
    }

    /// Construct a node and insert it in one step.
    pub fn create_node(
        &mut self,
        tag: Option<&str>,
        identifier: Option<&str>,
        parent: Option<&str>,
        data: Option<T>,
    ) -> TreeResult<NodeRef<T>> {
        self.insert_node(Node::new(tag, identifier, data), parent)
    }

    // ============================================================
    // Relationship queries
    // ============================================================

    /// Parent node, `None` for the root or when the recorded parent is gone.
    pub fn parent(&self, nid: &str) -> TreeResult<Option<NodeRef<T>>> {
        Ok(self
            .predecessor_of(nid)?
            .and_then(|pid| self.get_node(&pid)))
    }

    pub fn children(&self, nid: &str) -> TreeResult<Vec<NodeRef<T>>> {
        Ok(self
            .children_ids(nid)?
            .iter()
            .filter_map(|cid| self.get_node(cid))
            .collect())
    }

    /// Child identifiers of `nid` in sibling order.
    pub fn children_ids(&self, nid: &str) -> TreeResult<Vec<NodeId>> {
        Ok(self
            .node(nid)?
            .borrow()
            .successors(&self.identifier)
            .to_vec())
    }

    /// Children of the parent of `nid`, excluding `nid`; empty for the root.
    pub fn siblings(&self, nid: &str) -> TreeResult<Vec<NodeRef<T>>> {
        let Some(pid) = self.predecessor_of(nid)? else {
            return Ok(Vec::new());
        };
        if self.root() == Some(nid) || !self.contains(&pid) {
            return Ok(Vec::new());
        }
        Ok(self
            .children(&pid)?
            .into_iter()
            .filter(|sibling| sibling.borrow().identifier() != nid)
            .collect())
    }

    /// Level of `nid` (root is 0), counting only ancestors passing `filter`.
    #[instrument(level = "trace", skip(self, filter))]
    pub fn level<'a>(&'a self, nid: &str, filter: Option<NodeFilter<'a, T>>) -> TreeResult<usize> {
        Ok(self.rsearch(Some(nid), filter)?.count().saturating_sub(1))
    }

    /// Level of `nid`, or the maximum leaf level of the tree without argument.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, nid: Option<&str>) -> TreeResult<usize> {
        if let Some(nid) = nid {
            return self.level(nid, None);
        }
        let mut max = 0;
        for leaf in self.leaves(None)? {
            let leaf_id = leaf.borrow().identifier().to_string();
            max = max.max(self.level(&leaf_id, None)?);
        }
        Ok(max)
    }

    /// Without `level`, the parent identifier of `nid`. With `level`, the
    /// identifier of the ancestor living at that level, which must be above
    /// the node's own level.
    pub fn ancestor(&self, nid: &str, level: Option<usize>) -> TreeResult<Option<NodeId>> {
        let parent = self.predecessor_of(nid)?;
        let Some(level) = level else {
            return Ok(parent);
        };
        let own = self.level(nid, None)?;
        if level >= own {
            return Err(TreeError::InvalidLevel {
                node: nid.to_string(),
                requested: level,
                actual: own,
            });
        }
        Ok(self.rsearch(Some(nid), None)?.nth(own - level))
    }

    /// True if `ancestor` lies strictly above `grandchild`.
    /// Both identifiers must be in the tree.
    pub fn is_ancestor(&self, ancestor: &str, grandchild: &str) -> TreeResult<bool> {
        self.node(ancestor)?;
        let mut current = self.predecessor_of(grandchild)?;
        while let Some(pid) = current {
            if pid == ancestor {
                return Ok(true);
            }
            current = self.predecessor_of(&pid)?;
        }
        Ok(false)
    }

    // ============================================================
    // Traversal
    // ============================================================

    /// Start building a lazy traversal (depth-first from the root by default).
    pub fn expand_tree(&self) -> Expansion<'_, T> {
        Expansion::new(self)
    }

    /// Walk from `nid` up to the root. `None` yields nothing.
    pub fn rsearch<'a>(
        &'a self,
        nid: Option<&str>,
        filter: Option<NodeFilter<'a, T>>,
    ) -> TreeResult<RSearch<'a, T>> {
        let start = match nid {
            Some(nid) => {
                self.node(nid)?;
                Some(nid.to_string())
            }
            None => None,
        };
        Ok(RSearch::new(self, start, filter))
    }

    /// Nodes without children, tree-wide or below `nid`.
    pub fn leaves(&self, nid: Option<&str>) -> TreeResult<Vec<NodeRef<T>>> {
        let is_leaf = |node: &NodeRef<T>| node.borrow().is_leaf(&self.identifier);
        match nid {
            None => Ok(self.nodes.values().filter(|n| is_leaf(n)).cloned().collect()),
            Some(nid) => Ok(self
                .expand_tree()
                .from(nid)
                .traverse()?
                .filter_map(|id| self.get_node(&id))
                .filter(|n| is_leaf(n))
                .collect()),
        }
    }

    /// Root-to-leaf identifier paths, one per leaf.
    pub fn paths_to_leaves(&self) -> TreeResult<Vec<Vec<NodeId>>> {
        let mut paths = Vec::new();
        let leaf_ids = self
            .nodes
            .iter()
            .filter(|(_, node)| node.borrow().is_leaf(&self.identifier))
            .map(|(nid, _)| nid.clone())
            .collect::<Vec<_>>();
        for leaf_id in leaf_ids {
            let mut path: Vec<NodeId> = self.rsearch(Some(&leaf_id), None)?.collect();
            path.reverse();
            paths.push(path);
        }
        Ok(paths)
    }

    /// Number of nodes, or number of nodes at exactly `level`.
    pub fn size(&self, level: Option<usize>) -> usize {
        match level {
            None => self.nodes.len(),
            Some(level) => self
                .nodes
                .keys()
                .filter(|nid| matches!(self.level(nid, None), Ok(l) if l == level))
                .count(),
        }
    }

    // ============================================================
    // Structural mutation
    // ============================================================

    /// Re-parent `source` under `destination`.
    #[instrument(level = "debug", skip(self), fields(tree = %self.identifier))]
    pub fn move_node(&mut self, source: &str, destination: &str) -> TreeResult<()> {
        self.node(source)?;
        self.node(destination)?;
        if source == destination || self.is_ancestor(source, destination)? {
            return Err(TreeError::Loop {
                moved: source.to_string(),
                destination: destination.to_string(),
            });
        }
        if let Some(pid) = self.predecessor_of(source)? {
            if let Some(parent) = self.nodes.get(&pid) {
                parent.borrow_mut().update_successors(
                    &self.identifier,
                    source,
                    UpdateMode::Delete,
                    None,
                )?;
            }
        }
        self.node(destination)?.borrow_mut().update_successors(
            &self.identifier,
            source,
            UpdateMode::Add,
            None,
        )?;
        self.node(source)?
            .borrow_mut()
            .set_predecessor(&self.identifier, Some(destination));
        debug!("moved '{}' under '{}'", source, destination);
        Ok(())
    }

    /// Delete `nid` and hand its children to its parent (a -> b -> c becomes
    /// a -> c). The children are appended to the parent's children.
    #[instrument(level = "debug", skip(self), fields(tree = %self.identifier))]
    pub fn link_past_node(&mut self, nid: &str) -> TreeResult<()> {
        self.node(nid)?;
        if self.root() == Some(nid) {
            return Err(TreeError::LinkPastRoot);
        }
        let pid = self.predecessor_of(nid)?.ok_or(TreeError::LinkPastRoot)?;
        let parent = self.get(&pid)?;
        let children = self.children_ids(nid)?;
        let child_nodes = children
            .iter()
            .map(|cid| self.get(cid))
            .collect::<TreeResult<Vec<_>>>()?;

        for child in &child_nodes {
            child
                .borrow_mut()
                .set_predecessor(&self.identifier, Some(&pid));
        }
        {
            let mut parent = parent.borrow_mut();
            for cid in &children {
                parent.update_successors(&self.identifier, cid, UpdateMode::Add, None)?;
            }
            parent.update_successors(&self.identifier, nid, UpdateMode::Delete, None)?;
        }
        if let Some(node) = self.nodes.shift_remove(nid) {
            node.borrow_mut().remove_pointers(&self.identifier);
        }
        debug!("linked past '{}'", nid);
        Ok(())
    }

    /// Remove `nid` with its whole subtree; returns the number of removed
    /// nodes. `None` is a no-op returning 0.
    #[instrument(level = "debug", skip(self), fields(tree = %self.identifier))]
    pub fn remove_node(&mut self, nid: Option<&str>) -> TreeResult<usize> {
        let Some(nid) = nid else {
            return Ok(0);
        };
        let parent = self.predecessor_of(nid)?;
        let removed = self.subtree_ids(nid)?;

        self.unlink_from_parent(parent.as_deref(), nid)?;
        for id in &removed {
            if let Some(node) = self.nodes.shift_remove(id) {
                node.borrow_mut().remove_pointers(&self.identifier);
            }
        }
        if self.root() == Some(nid) {
            self.root = None;
        }
        debug!("removed {} nodes below and including '{}'", removed.len(), nid);
        Ok(removed.len())
    }

    /// Remove `nid` with its subtree and return the removed nodes as a new
    /// tree rooted at `nid`. `None` returns an empty tree.
    #[instrument(level = "debug", skip(self), fields(tree = %self.identifier))]
    pub fn remove_subtree(&mut self, nid: Option<&str>) -> TreeResult<Tree<T>> {
        let mut st = Tree::new();
        let Some(nid) = nid else {
            return Ok(st);
        };
        let parent = self.predecessor_of(nid)?;
        let removed = self.subtree_ids(nid)?;

        self.unlink_from_parent(parent.as_deref(), nid)?;
        for id in &removed {
            if let Some(node) = self.nodes.shift_remove(id) {
                {
                    let mut n = node.borrow_mut();
                    n.clone_pointers(&self.identifier, &st.identifier);
                    n.remove_pointers(&self.identifier);
                }
                st.nodes.insert(id.clone(), node);
            }
        }
        st.node(nid)?
            .borrow_mut()
            .set_predecessor(&st.identifier, None);
        st.root = Some(nid.to_string());
        if self.root() == Some(nid) {
            self.root = None;
        }
        Ok(st)
    }

    /// Shallow copy of the subtree at `nid`: the same nodes, additionally
    /// registered under the new tree's identifier. `self` is not modified.
    #[instrument(level = "debug", skip(self), fields(tree = %self.identifier))]
    pub fn subtree(&self, nid: Option<&str>, identifier: Option<&str>) -> TreeResult<Tree<T>> {
        let mut st = self.sibling_tree(identifier)?;
        let Some(nid) = nid else {
            return Ok(st);
        };
        for id in self.subtree_ids(nid)? {
            let node = self.get(&id)?;
            node.borrow_mut()
                .clone_pointers(&self.identifier, &st.identifier);
            st.nodes.insert(id, node);
        }
        st.node(nid)?
            .borrow_mut()
            .set_predecessor(&st.identifier, None);
        st.root = Some(nid.to_string());
        Ok(st)
    }

    /// Patch node attributes. A new identifier re-keys the registry, the
    /// parent's children entry, every child's parent pointer and the root.
    #[instrument(level = "debug", skip(self, update), fields(tree = %self.identifier))]
    pub fn update_node(&mut self, nid: &str, update: NodeUpdate<T>) -> TreeResult<()> {
        let node = self.get(nid)?;
        if let Some(new_id) = update.identifier.as_deref() {
            if new_id != nid {
                self.rename(nid, new_id, &node)?;
            }
        }
        let mut n = node.borrow_mut();
        if let Some(tag) = update.tag {
            n.set_tag(tag);
        }
        if let Some(data) = update.data {
            n.set_data(Some(data));
        }
        if let Some(expanded) = update.expanded {
            n.expanded = expanded;
        }
        Ok(())
    }

    fn rename(&mut self, nid: &str, new_id: &str, node: &NodeRef<T>) -> TreeResult<()> {
        if self.contains(new_id) {
            return Err(TreeError::DuplicateIdentifier(new_id.to_string()));
        }
        let parent = self.predecessor_of(nid)?;
        let children = self.children_ids(nid)?;
        if let Some(pid) = parent {
            self.node(&pid)?.borrow_mut().update_successors(
                &self.identifier,
                nid,
                UpdateMode::Replace,
                Some(new_id),
            )?;
        }
        for cid in &children {
            self.node(cid)?
                .borrow_mut()
                .set_predecessor(&self.identifier, Some(new_id));
        }
        self.nodes.shift_remove(nid);
        node.borrow_mut().set_identifier(new_id);
        self.nodes.insert(new_id.to_string(), Rc::clone(node));
        if self.root() == Some(nid) {
            self.root = Some(new_id.to_string());
        }
        debug!("renamed '{}' to '{}'", nid, new_id);
        Ok(())
    }

    // ============================================================
    // Internals
    // ============================================================

    fn node(&self, nid: &str) -> TreeResult<&NodeRef<T>> {
        self.nodes
            .get(nid)
            .ok_or_else(|| TreeError::NodeNotFound(nid.to_string()))
    }

    fn predecessor_of(&self, nid: &str) -> TreeResult<Option<NodeId>> {
        Ok(self
            .node(nid)?
            .borrow()
            .predecessor(&self.identifier)?
            .map(str::to_string))
    }

    /// `nid` and all its descendants, in insertion-ordered depth-first order.
    fn subtree_ids(&self, nid: &str) -> TreeResult<Vec<NodeId>> {
        Ok(self
            .expand_tree()
            .from(nid)
            .sorting(false)
            .traverse()?
            .collect())
    }

    fn unlink_from_parent(&self, parent: Option<&str>, nid: &str) -> TreeResult<()> {
        if let Some(parent) = parent.and_then(|pid| self.nodes.get(pid)) {
            parent.borrow_mut().update_successors(
                &self.identifier,
                nid,
                UpdateMode::Delete,
                None,
            )?;
        }
        Ok(())
    }

    /// Empty tree meant to hold nodes shared with `self`; its identifier
    /// must differ from ours or the per-tree pointers would collide.
    fn sibling_tree(&self, identifier: Option<&str>) -> TreeResult<Tree<T>> {
        let tree = match identifier {
            Some(id) => Tree::with_identifier(id),
            None => Tree::new(),
        };
        if tree.identifier == self.identifier {
            return Err(TreeError::Config(format!(
                "tree identifier '{}' is already used by the source tree",
                self.identifier
            )));
        }
        Ok(tree)
    }
}

impl<T: Clone> Tree<T> {
    /// New tree with cloned nodes; nothing is shared with `self`.
    #[instrument(level = "debug", skip(self), fields(tree = %self.identifier))]
    pub fn deep_copy(&self, identifier: Option<&str>) -> TreeResult<Self> {
        let mut copy = match identifier {
            Some(id) => Tree::with_identifier(id),
            None => Tree::new(),
        };
        for (nid, node) in &self.nodes {
            let cloned = node.borrow().copy_into(&self.identifier, &copy.identifier);
            copy.nodes.insert(nid.clone(), cloned.into_ref());
        }
        copy.root = self.root.clone();
        Ok(copy)
    }

    /// Graft all of `other` as a child subtree of `nid`.
    ///
    /// Shallow pastes share `other`'s nodes; `deep` clones them first.
    /// An empty `other` is a no-op. Colliding identifiers are all reported.
    #[instrument(level = "debug", skip(self, other), fields(tree = %self.identifier, other = %other.identifier))]
    pub fn paste(&mut self, nid: &str, other: &Tree<T>, deep: bool) -> TreeResult<()> {
        self.node(nid)?;
        let Some(other_root) = other.root() else {
            return Ok(());
        };
        self.check_shareable(other, deep)?;
        let ids = other.subtree_ids(other_root)?;
        self.check_duplicates(ids.iter())?;
        self.attach(nid, other, other_root, &ids, deep)
    }

    /// Graft the children of `other`'s root under `nid`, dropping that root.
    ///
    /// On an empty tree with `nid == None`, `other`'s root becomes our root.
    #[instrument(level = "debug", skip(self, other), fields(tree = %self.identifier, other = %other.identifier))]
    pub fn merge(&mut self, nid: Option<&str>, other: &Tree<T>, deep: bool) -> TreeResult<()> {
        let Some(other_root) = other.root() else {
            return Ok(());
        };
        let bootstrap = match nid {
            Some(nid) => {
                self.node(nid)?;
                false
            }
            None if self.root.is_none() => true,
            None => {
                return Err(TreeError::Config(
                    "must define the node under which the tree is merged".into(),
                ))
            }
        };
        self.check_shareable(other, deep)?;

        let mut grafts = Vec::new();
        for cid in other.children_ids(other_root)? {
            let ids = other.subtree_ids(&cid)?;
            grafts.push((cid, ids));
        }
        self.check_duplicates(grafts.iter().flat_map(|(_, ids)| ids.iter()))?;

        let target = match nid {
            Some(nid) => nid.to_string(),
            None => {
                let source = other.get(other_root)?;
                let root = if deep {
                    source
                        .borrow()
                        .copy_into(&other.identifier, &self.identifier)
                        .into_ref()
                } else {
                    source
                };
                root.borrow_mut().reset_pointers(&self.identifier);
                self.nodes.insert(other_root.to_string(), root);
                self.root = Some(other_root.to_string());
                other_root.to_string()
            }
        };
        debug!("merging {} subtrees under '{}' (bootstrap: {})", grafts.len(), target, bootstrap);
        for (cid, ids) in &grafts {
            self.attach(&target, other, cid, ids, deep)?;
        }
        Ok(())
    }

    fn check_shareable(&self, other: &Tree<T>, deep: bool) -> TreeResult<()> {
        if !deep && other.identifier == self.identifier {
            return Err(TreeError::Config(format!(
                "cannot share nodes between trees with the same identifier '{}'",
                self.identifier
            )));
        }
        Ok(())
    }

    fn check_duplicates<'i>(&self, ids: impl Iterator<Item = &'i NodeId>) -> TreeResult<()> {
        let duplicates: Vec<NodeId> = ids.filter(|id| self.contains(id)).cloned().collect();
        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(TreeError::DuplicateIdentifiers(duplicates))
        }
    }

    /// Register `ids` (the subtree of `start` in `source`) and hang `start`
    /// below `parent`. Callers validate before calling.
    fn attach(
        &mut self,
        parent: &str,
        source: &Tree<T>,
        start: &str,
        ids: &[NodeId],
        deep: bool,
    ) -> TreeResult<()> {
        for id in ids {
            let shared = source.get(id)?;
            let node = if deep {
                shared
                    .borrow()
                    .copy_into(&source.identifier, &self.identifier)
                    .into_ref()
            } else {
                shared
                    .borrow_mut()
                    .clone_pointers(&source.identifier, &self.identifier);
                shared
            };
            self.nodes.insert(id.clone(), node);
        }
        self.node(start)?
            .borrow_mut()
            .set_predecessor(&self.identifier, Some(parent));
        self.node(parent)?.borrow_mut().update_successors(
            &self.identifier,
            start,
            UpdateMode::Add,
            None,
        )?;
        Ok(())
    }
}
