//! Nested dict and JSON export.
//!
//! Shape: `{tag: {"children": [...], "data": ...}}`. A node without rendered
//! children collapses to its bare tag, or to `{tag: {"data": ...}}` when data
//! is requested. Collapsed (unexpanded) nodes are exported like leaves.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::application::ordering::ordered_children;
use crate::application::ApplicationResult;
use crate::domain::{Node, NodeComparator, NodeRef, Tree};

/// Controls for `Tree::to_dict` / `Tree::to_json`.
pub struct DictOptions<'a, T> {
    nid: Option<String>,
    with_data: bool,
    key: Option<NodeComparator<'a, T>>,
    sorting: bool,
    reverse: bool,
}

impl<T> Default for DictOptions<'_, T> {
    fn default() -> Self {
        Self {
            nid: None,
            with_data: false,
            key: None,
            sorting: true,
            reverse: false,
        }
    }
}

impl<'a, T> DictOptions<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export the subtree below `nid` instead of the whole tree.
    pub fn from(mut self, nid: &str) -> Self {
        self.nid = Some(nid.to_string());
        self
    }

    pub fn with_data(mut self, with_data: bool) -> Self {
        self.with_data = with_data;
        self
    }

    pub fn key<K: Ord + 'a>(mut self, key: impl Fn(&Node<T>) -> K + 'a) -> Self
    where
        T: 'a,
    {
        self.key = Some(Box::new(move |a, b| key(a).cmp(&key(b))));
        self
    }

    pub fn sorting(mut self, sorting: bool) -> Self {
        self.sorting = sorting;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

impl<T: Serialize> Tree<T> {
    /// Nested structure of the tree; an empty tree yields `{}`.
    #[instrument(level = "debug", skip_all, fields(tree = %self.identifier()))]
    pub fn to_dict(&self, options: &DictOptions<'_, T>) -> ApplicationResult<Value> {
        let Some(start) = options.nid.as_deref().or(self.root()) else {
            return Ok(Value::Object(Map::new()));
        };
        let node = self.get(start)?;
        dict_node(self, &node, options)
    }

    /// `to_dict` serialized as compact JSON.
    pub fn to_json(&self, options: &DictOptions<'_, T>) -> ApplicationResult<String> {
        Ok(serde_json::to_string(&self.to_dict(options)?)?)
    }
}

fn dict_node<T: Serialize>(
    tree: &Tree<T>,
    node: &NodeRef<T>,
    options: &DictOptions<'_, T>,
) -> ApplicationResult<Value> {
    let (nid, tag, expanded, data) = {
        let n = node.borrow();
        let data = if options.with_data {
            Some(serde_json::to_value(n.data())?)
        } else {
            None
        };
        (n.identifier().to_string(), n.tag().to_string(), n.expanded, data)
    };

    let mut children = Vec::new();
    if expanded {
        let ordered = ordered_children(
            tree,
            &nid,
            None,
            options.key.as_ref(),
            options.sorting,
            options.reverse,
        )?;
        for child in &ordered {
            children.push(dict_node(tree, child, options)?);
        }
    }

    let mut body = Map::new();
    if !children.is_empty() {
        body.insert("children".into(), Value::Array(children));
    } else if data.is_none() {
        return Ok(Value::String(tag));
    }
    if let Some(data) = data {
        body.insert("data".into(), data);
    }
    let mut entry = Map::new();
    entry.insert(tag, Value::Object(body));
    Ok(Value::Object(entry))
}
