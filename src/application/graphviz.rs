//! GraphViz DOT export.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Node, NodeComparator, NodeFilter, TraversalMode, Tree};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    #[default]
    Digraph,
    Graph,
}

impl GraphType {
    fn edge(self) -> &'static str {
        match self {
            Self::Digraph => "->",
            Self::Graph => "--",
        }
    }
}

impl FromStr for GraphType {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "digraph" => Ok(Self::Digraph),
            "graph" => Ok(Self::Graph),
            other => Err(ApplicationError::Config {
                message: format!("unknown graph type '{other}', expected 'digraph' or 'graph'"),
            }),
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Digraph => "digraph",
            Self::Graph => "graph",
        })
    }
}

/// Controls for `Tree::to_graphviz`.
pub struct GraphvizOptions<'a, T> {
    shape: String,
    graph_type: GraphType,
    filter: Option<NodeFilter<'a, T>>,
    key: Option<NodeComparator<'a, T>>,
    reverse: bool,
    sorting: bool,
}

impl<T> Default for GraphvizOptions<'_, T> {
    fn default() -> Self {
        Self {
            shape: "circle".to_string(),
            graph_type: GraphType::Digraph,
            filter: None,
            key: None,
            reverse: false,
            sorting: true,
        }
    }
}

impl<'a, T> GraphvizOptions<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(mut self, shape: impl Into<String>) -> Self {
        self.shape = shape.into();
        self
    }

    pub fn graph_type(mut self, graph_type: GraphType) -> Self {
        self.graph_type = graph_type;
        self
    }

    pub fn filter(mut self, filter: impl Fn(&Node<T>) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn key<K: Ord + 'a>(mut self, key: impl Fn(&Node<T>) -> K + 'a) -> Self
    where
        T: 'a,
    {
        self.key = Some(Box::new(move |a, b| key(a).cmp(&key(b))));
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn sorting(mut self, sorting: bool) -> Self {
        self.sorting = sorting;
        self
    }
}

fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

impl<T> Tree<T> {
    /// DOT text: node declarations in breadth-first order, then edges.
    /// Edges are only drawn between nodes that passed the filter.
    #[instrument(level = "debug", skip_all, fields(tree = %self.identifier()))]
    pub fn to_graphviz(&self, options: GraphvizOptions<'_, T>) -> ApplicationResult<String> {
        let GraphvizOptions {
            shape,
            graph_type,
            filter,
            key,
            reverse,
            sorting,
        } = options;

        let mut declarations = Vec::new();
        let mut emitted = Vec::new();
        if !self.is_empty() {
            let mut expansion = self
                .expand_tree()
                .mode(TraversalMode::Width)
                .filter_boxed(filter)
                .reverse(reverse)
                .sorting(sorting);
            if let Some(key) = key {
                expansion = expansion.compare(key);
            }
            for nid in expansion.traverse()? {
                let node = self.get(&nid)?;
                declarations.push(format!(
                    "\"{}\" [label=\"{}\", shape={}]",
                    escape(&nid),
                    escape(node.borrow().tag()),
                    shape
                ));
                emitted.push(nid);
            }
        }

        let visible: HashSet<&str> = emitted.iter().map(String::as_str).collect();
        let mut connections = Vec::new();
        for nid in &emitted {
            for cid in self.children_ids(nid)? {
                if visible.contains(cid.as_str()) {
                    connections.push(format!(
                        "\"{}\" {} \"{}\"",
                        escape(nid),
                        graph_type.edge(),
                        escape(&cid)
                    ));
                }
            }
        }

        let mut out = format!("{graph_type} tree {{\n");
        for declaration in &declarations {
            out.push_str(&format!("\t{declaration}\n"));
        }
        if !connections.is_empty() {
            out.push('\n');
        }
        for connection in &connections {
            out.push_str(&format!("\t{connection}\n"));
        }
        out.push('}');
        debug!(
            "graphviz: {} nodes, {} edges",
            declarations.len(),
            connections.len()
        );
        Ok(out)
    }

    /// Write `to_graphviz` output to `path`, replacing any existing file.
    pub fn write_graphviz(
        &self,
        path: &Path,
        options: GraphvizOptions<'_, T>,
    ) -> ApplicationResult<()> {
        let dot = self.to_graphviz(options)?;
        fs::write(path, dot).with_path_context("write graphviz", path)
    }
}
