//! Lazy traversal over a tree: depth-first, breadth-first and zigzag.
//!
//! The iterator keeps its own work list of node handles, so each expansion
//! step snapshots the child list it reads. Structural mutation of the tree
//! while an iteration is in flight is still not supported.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::{Node, NodeId, NodeRef};
use crate::domain::tree::Tree;

/// Predicate evaluated against a node during traversal.
pub type NodeFilter<'a, T> = Box<dyn Fn(&Node<T>) -> bool + 'a>;

/// Comparator used to order siblings at each expansion step.
pub type NodeComparator<'a, T> = Box<dyn Fn(&Node<T>, &Node<T>) -> Ordering + 'a>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
    #[default]
    Depth,
    Width,
    #[serde(rename = "zigzag")]
    ZigZag,
}

impl FromStr for TraversalMode {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "depth" => Ok(Self::Depth),
            "width" => Ok(Self::Width),
            "zigzag" => Ok(Self::ZigZag),
            _ => Err(TreeError::InvalidMode(s.to_string())),
        }
    }
}

/// Numeric mode constants: 1 = depth, 2 = width, 3 = zigzag.
impl TryFrom<u8> for TraversalMode {
    type Error = TreeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Depth),
            2 => Ok(Self::Width),
            3 => Ok(Self::ZigZag),
            other => Err(TreeError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Depth => "depth",
            Self::Width => "width",
            Self::ZigZag => "zigzag",
        };
        f.write_str(name)
    }
}

/// Traversal request built by `Tree::expand_tree`.
///
/// ```ignore
/// let ids: Vec<_> = tree
///     .expand_tree()
///     .from("jane")
///     .mode(TraversalMode::Width)
///     .key(|n| n.tag().to_string())
///     .traverse()?
///     .collect();
/// ```
pub struct Expansion<'a, T> {
    tree: &'a Tree<T>,
    start: Option<NodeId>,
    mode: TraversalMode,
    filter: Option<NodeFilter<'a, T>>,
    key: Option<NodeComparator<'a, T>>,
    reverse: bool,
    sorting: bool,
}

impl<'a, T> Expansion<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            start: None,
            mode: TraversalMode::Depth,
            filter: None,
            key: None,
            reverse: false,
            sorting: true,
        }
    }

    /// Start node; defaults to the root.
    pub fn from(mut self, nid: &str) -> Self {
        self.start = Some(nid.to_string());
        self
    }

    pub fn mode(mut self, mode: TraversalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Prune every node failing `filter`, together with its subtree.
    pub fn filter(mut self, filter: impl Fn(&Node<T>) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn filter_boxed(mut self, filter: Option<NodeFilter<'a, T>>) -> Self {
        self.filter = filter;
        self
    }

    /// Sort siblings by the extracted key (stable).
    pub fn key<K: Ord + 'a>(mut self, key: impl Fn(&Node<T>) -> K + 'a) -> Self
    where
        T: 'a,
    {
        self.key = Some(Box::new(move |a, b| key(a).cmp(&key(b))));
        self
    }

    /// Sort siblings with an explicit comparator (stable).
    pub fn compare(mut self, cmp: impl Fn(&Node<T>, &Node<T>) -> Ordering + 'a) -> Self {
        self.key = Some(Box::new(cmp));
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// With `false`, insertion order is kept regardless of key/reverse.
    /// Defaults to `true`.
    pub fn sorting(mut self, sorting: bool) -> Self {
        self.sorting = sorting;
        self
    }

    /// Validate the start node and return the lazy identifier sequence.
    /// An empty tree without explicit start yields nothing.
    ///
    /// With sorting on and no key, depth and width order siblings by tag.
    /// Zigzag keeps insertion order unless a key is given.
    #[instrument(level = "trace", skip(self), fields(mode = %self.mode))]
    pub fn traverse(self) -> TreeResult<ExpandIter<'a, T>> {
        let start = match self.start.as_deref().or(self.tree.root()) {
            Some(nid) => Some((nid.to_string(), self.tree.get(nid)?)),
            None => None,
        };
        let order = match (self.sorting, self.key) {
            (false, _) => None,
            (true, Some(key)) => Some(key),
            (true, None) if self.mode == TraversalMode::ZigZag => None,
            (true, None) => Some(Box::new(|a: &Node<T>, b: &Node<T>| a.cmp_by_tag(b))
                as NodeComparator<'a, T>),
        };
        Ok(ExpandIter {
            tree: self.tree,
            mode: self.mode,
            filter: self.filter,
            order,
            reverse: self.reverse,
            pending_start: start,
            active: VecDeque::new(),
            next: VecDeque::new(),
            forward: false,
        })
    }
}

/// A node handle together with the key it is stored under in the tree.
type Entry<T> = (NodeId, NodeRef<T>);

/// Iterator of node identifiers produced by `Expansion::traverse`.
///
/// Yields the tree's keys, which may differ from `Node::identifier` when a
/// shared node was renamed through another tree.
pub struct ExpandIter<'a, T> {
    tree: &'a Tree<T>,
    mode: TraversalMode,
    filter: Option<NodeFilter<'a, T>>,
    order: Option<NodeComparator<'a, T>>,
    reverse: bool,
    pending_start: Option<Entry<T>>,
    // depth/width: the work queue; zigzag: the list being drained
    active: VecDeque<Entry<T>>,
    // zigzag only: the list collecting the next level
    next: VecDeque<Entry<T>>,
    forward: bool,
}

impl<T> ExpandIter<'_, T> {
    fn passes(&self, node: &NodeRef<T>) -> bool {
        self.filter.as_ref().map_or(true, |f| f(&node.borrow()))
    }

    /// Children of `node` passing the filter, in sibling order.
    fn expansion(&self, node: &NodeRef<T>) -> Vec<Entry<T>> {
        let tree_id = self.tree.identifier();
        let mut children: Vec<Entry<T>> = node
            .borrow()
            .successors(tree_id)
            .iter()
            .filter_map(|cid| self.tree.get_node(cid).map(|child| (cid.clone(), child)))
            .filter(|(_, child)| self.passes(child))
            .collect();
        if let Some(cmp) = &self.order {
            if self.reverse {
                children.sort_by(|(_, a), (_, b)| cmp(&a.borrow(), &b.borrow()).reverse());
            } else {
                children.sort_by(|(_, a), (_, b)| cmp(&a.borrow(), &b.borrow()));
            }
        }
        children
    }

    fn prepend(queue: &mut VecDeque<Entry<T>>, entries: Vec<Entry<T>>) {
        for entry in entries.into_iter().rev() {
            queue.push_front(entry);
        }
    }
}

impl<T> Iterator for ExpandIter<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((nid, start)) = self.pending_start.take() {
            if !self.passes(&start) {
                self.active.clear();
                return None;
            }
            let mut children = self.expansion(&start);
            if self.mode == TraversalMode::ZigZag {
                children.reverse();
            }
            self.active.extend(children);
            return Some(nid);
        }

        let (nid, current) = self.active.pop_front()?;
        let expansion = self.expansion(&current);
        match self.mode {
            TraversalMode::Depth => Self::prepend(&mut self.active, expansion),
            TraversalMode::Width => self.active.extend(expansion),
            TraversalMode::ZigZag => {
                let mut expansion = expansion;
                if self.forward {
                    expansion.reverse();
                }
                Self::prepend(&mut self.next, expansion);
                if self.active.is_empty() {
                    self.forward = !self.forward;
                    std::mem::swap(&mut self.active, &mut self.next);
                }
            }
        }
        Some(nid)
    }
}

/// Upward walk from a node to the root, produced by `Tree::rsearch`.
/// Yields the start node first and the root last.
pub struct RSearch<'a, T> {
    tree: &'a Tree<T>,
    current: Option<NodeId>,
    filter: Option<NodeFilter<'a, T>>,
}

impl<'a, T> RSearch<'a, T> {
    pub(crate) fn new(
        tree: &'a Tree<T>,
        start: Option<NodeId>,
        filter: Option<NodeFilter<'a, T>>,
    ) -> Self {
        Self {
            tree,
            current: start,
            filter,
        }
    }
}

impl<T> Iterator for RSearch<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.current.take()?;
            let node = self.tree.get_node(&current)?;
            let node = node.borrow();
            if self.tree.root() != Some(current.as_str()) {
                self.current = node
                    .predecessor(self.tree.identifier())
                    .ok()
                    .flatten()
                    .map(str::to_string);
            }
            if self.filter.as_ref().map_or(true, |f| f(&node)) {
                return Some(current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Depth".parse::<TraversalMode>().unwrap(), TraversalMode::Depth);
        assert_eq!("zigzag".parse::<TraversalMode>().unwrap(), TraversalMode::ZigZag);
        assert_eq!(
            "spiral".parse::<TraversalMode>(),
            Err(TreeError::InvalidMode("spiral".into()))
        );
    }

    #[test]
    fn test_mode_from_number() {
        assert_eq!(TraversalMode::try_from(2).unwrap(), TraversalMode::Width);
        assert!(matches!(
            TraversalMode::try_from(0),
            Err(TreeError::InvalidMode(_))
        ));
    }
}
