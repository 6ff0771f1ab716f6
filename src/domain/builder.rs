//! Tree builder for flat `child -> parent` mappings.

use std::collections::VecDeque;

use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::NodeId;
use crate::domain::tree::Tree;

type IdFunc<'a> = Box<dyn Fn(&str) -> NodeId + 'a>;
type DataFunc<'a, T> = Box<dyn Fn(&str) -> T + 'a>;

/// Constructs a tree from a mapping of raw keys to parent keys.
///
/// Exactly one entry must map to `None`; that key becomes the root. The
/// raw key is used as tag, `id_func` (identity by default) derives the
/// node identifier, and `data_func` the payload.
pub struct TreeBuilder<'a, T = ()> {
    id_func: Option<IdFunc<'a>>,
    data_func: Option<DataFunc<'a, T>>,
    tree_identifier: Option<String>,
}

impl<T> Default for TreeBuilder<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> TreeBuilder<'a, T> {
    pub fn new() -> Self {
        Self {
            id_func: None,
            data_func: None,
            tree_identifier: None,
        }
    }

    pub fn id_func(mut self, f: impl Fn(&str) -> NodeId + 'a) -> Self {
        self.id_func = Some(Box::new(f));
        self
    }

    pub fn data_func(mut self, f: impl Fn(&str) -> T + 'a) -> Self {
        self.data_func = Some(Box::new(f));
        self
    }

    pub fn tree_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.tree_identifier = Some(identifier.into());
        self
    }

    /// Build breadth-first from the root. Entries not reachable from the
    /// root (orphans, cycles) are rejected.
    #[instrument(level = "debug", skip_all)]
    pub fn build_from_map<I, K>(&self, mapping: I) -> TreeResult<Tree<T>>
    where
        I: IntoIterator<Item = (K, Option<K>)>,
        K: AsRef<str>,
    {
        let mut root: Option<String> = None;
        let mut children: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut total = 0usize;

        for (child, parent) in mapping {
            total += 1;
            match parent {
                None if root.is_some() => return Err(TreeError::MultipleRoot),
                None => root = Some(child.as_ref().to_string()),
                Some(parent) => children
                    .entry(parent.as_ref().to_string())
                    .or_default()
                    .push(child.as_ref().to_string()),
            }
        }
        let root = root.ok_or_else(|| {
            TreeError::Config("mapping has no root entry (no key maps to null)".into())
        })?;

        let mut tree = match &self.tree_identifier {
            Some(id) => Tree::with_identifier(id.as_str()),
            None => Tree::new(),
        };
        let mut queue: VecDeque<(String, Option<NodeId>)> = VecDeque::from([(root, None)]);
        while let Some((key, parent)) = queue.pop_front() {
            let nid = self.node_id(&key);
            let data = self.data_func.as_ref().map(|f| f(&key));
            tree.create_node(Some(&key), Some(&nid), parent.as_deref(), data)?;
            if let Some(kids) = children.shift_remove(&key) {
                queue.extend(kids.into_iter().map(|kid| (kid, Some(nid.clone()))));
            }
        }

        if tree.len() != total {
            let orphans: Vec<String> = children.into_values().flatten().collect();
            return Err(TreeError::Config(format!(
                "entries not reachable from the root: {orphans:?}"
            )));
        }
        debug!("built tree '{}' with {} nodes", tree.identifier(), tree.len());
        Ok(tree)
    }

    fn node_id(&self, key: &str) -> NodeId {
        match &self.id_func {
            Some(f) => f(key),
            None => key.to_string(),
        }
    }
}
