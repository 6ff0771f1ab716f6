//! Text rendering of trees with selectable connector glyphs.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use termtree::GlyphPalette;
use tracing::instrument;

use crate::application::ordering::ordered_children;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Node, NodeComparator, NodeFilter, NodeRef, Tree, TreeResult};

/// Connector glyph set used by `Tree::show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    Ascii,
    #[default]
    AsciiEx,
    AsciiExr,
    AsciiEm,
    AsciiEmv,
    AsciiEmh,
}

impl LineStyle {
    pub const ALL: [LineStyle; 6] = [
        Self::Ascii,
        Self::AsciiEx,
        Self::AsciiExr,
        Self::AsciiEm,
        Self::AsciiEmv,
        Self::AsciiEmh,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::AsciiEx => "ascii-ex",
            Self::AsciiExr => "ascii-exr",
            Self::AsciiEm => "ascii-em",
            Self::AsciiEmv => "ascii-emv",
            Self::AsciiEmh => "ascii-emh",
        }
    }

    /// (vertical, branch, last branch, connector)
    fn glyphs(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Self::Ascii => ("|", "|", "+", "-- "),
            Self::AsciiEx => ("│", "├", "└", "── "),
            Self::AsciiExr => ("│", "├", "╰", "── "),
            Self::AsciiEm => ("║", "╠", "╚", "══ "),
            Self::AsciiEmv => ("║", "╟", "╙", "── "),
            Self::AsciiEmh => ("│", "╞", "╘", "══ "),
        }
    }

    fn palette(self) -> GlyphPalette {
        let (vertical, branch, last, connector) = self.glyphs();
        GlyphPalette {
            middle_item: branch,
            last_item: last,
            item_indent: connector,
            middle_skip: vertical,
            last_skip: " ",
            skip_indent: "   ",
        }
    }
}

impl FromStr for LineStyle {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| ApplicationError::Config {
                message: format!("unknown line style '{s}'"),
            })
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Controls for `Tree::show`.
pub struct ShowOptions<'a, T> {
    nid: Option<String>,
    id_hidden: bool,
    filter: Option<NodeFilter<'a, T>>,
    key: Option<NodeComparator<'a, T>>,
    reverse: bool,
    sorting: bool,
    line_style: LineStyle,
}

impl<T> Default for ShowOptions<'_, T> {
    fn default() -> Self {
        Self {
            nid: None,
            id_hidden: true,
            filter: None,
            key: None,
            reverse: false,
            sorting: true,
            line_style: LineStyle::default(),
        }
    }
}

impl<'a, T> ShowOptions<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the subtree below `nid` instead of the whole tree.
    pub fn from(mut self, nid: &str) -> Self {
        self.nid = Some(nid.to_string());
        self
    }

    /// With `false`, labels read `tag[identifier]`.
    pub fn id_hidden(mut self, id_hidden: bool) -> Self {
        self.id_hidden = id_hidden;
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

    pub fn line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    fn label(&self, node: &Node<T>) -> String {
        if self.id_hidden {
            node.tag().to_string()
        } else {
            format!("{}[{}]", node.tag(), node.identifier())
        }
    }

    fn passes(&self, node: &NodeRef<T>) -> bool {
        self.filter.as_ref().map_or(true, |f| f(&node.borrow()))
    }

    fn build(&self, tree: &Tree<T>, node: &NodeRef<T>) -> TreeResult<termtree::Tree<String>> {
        let (nid, label, expanded) = {
            let n = node.borrow();
            (n.identifier().to_string(), self.label(&n), n.expanded)
        };
        let mut out = termtree::Tree::new(label).with_glyphs(self.line_style.palette());
        if expanded {
            let children = ordered_children(
                tree,
                &nid,
                self.filter.as_ref(),
                self.key.as_ref(),
                self.sorting,
                self.reverse,
            )?;
            for child in &children {
                out.push(self.build(tree, child)?);
            }
        }
        Ok(out)
    }
}

impl<T> Tree<T> {
    /// Render the tree as indented text, one node per line.
    ///
    /// An empty tree, or a start node failing the filter, renders as "".
    #[instrument(level = "debug", skip_all, fields(tree = %self.identifier()))]
    pub fn show(&self, options: &ShowOptions<'_, T>) -> TreeResult<String> {
        let Some(start) = options.nid.as_deref().or(self.root()) else {
            return Ok(String::new());
        };
        let start = self.get(start)?;
        if !options.passes(&start) {
            return Ok(String::new());
        }
        Ok(options.build(self, &start)?.to_string())
    }

    /// Append the rendering to `path`, creating the file if needed.
    pub fn save_to_file(&self, path: &Path, options: &ShowOptions<'_, T>) -> ApplicationResult<()> {
        let text = self.show(options)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_path_context("open tree file", path)?;
        file.write_all(text.as_bytes())
            .with_path_context("write tree file", path)
    }
}

impl<T> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.show(&ShowOptions::default()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
