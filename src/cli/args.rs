//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::application::{GraphType, LineStyle};
use crate::domain::TraversalMode;

/// Inspect, render and export trees given as a JSON `{"child": "parent" | null}` map
#[derive(Parser, Debug)]
#[command(name = "rstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory with a local .rstree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Tree input shared by all tree commands.
#[derive(Args, Debug, Clone)]
pub struct TreeInput {
    /// JSON mapping file, `-` for stdin
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Start at this node instead of the root
    #[arg(short, long)]
    pub from: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the tree as indented text
    Show {
        #[command(flatten)]
        tree: TreeInput,
        /// Connector glyphs (ascii, ascii-ex, ascii-exr, ascii-em, ascii-emv, ascii-emh)
        #[arg(short, long)]
        line_style: Option<LineStyle>,
        /// Print `tag[identifier]` labels
        #[arg(long)]
        show_ids: bool,
        /// Reverse sibling order
        #[arg(short, long)]
        reverse: bool,
        /// Keep insertion order
        #[arg(long)]
        no_sort: bool,
        /// Append the rendering to this file instead of printing it
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Export the tree as nested JSON
    Json {
        #[command(flatten)]
        tree: TreeInput,
        /// Reverse sibling order
        #[arg(short, long)]
        reverse: bool,
        /// Keep insertion order
        #[arg(long)]
        no_sort: bool,
        /// Pretty-print
        #[arg(short, long)]
        pretty: bool,
    },

    /// Export the tree as GraphViz DOT
    Dot {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Node shape
        #[arg(short, long)]
        shape: Option<String>,
        /// digraph or graph
        #[arg(short, long)]
        graph_type: Option<GraphType>,
        /// Write to this file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List node identifiers in traversal order
    Expand {
        #[command(flatten)]
        tree: TreeInput,
        /// depth, width or zigzag
        #[arg(short, long)]
        mode: Option<TraversalMode>,
        /// Descending tag order for siblings (depth and width)
        #[arg(short, long)]
        reverse: bool,
        /// Keep insertion order instead of sorting siblings by tag
        #[arg(long)]
        no_sort: bool,
    },

    /// List leaf identifiers
    Leaves {
        #[command(flatten)]
        tree: TreeInput,
    },

    /// List root-to-leaf paths
    Paths {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Path separator
        #[arg(short, long, default_value = " -> ")]
        separator: String,
    },

    /// Show tree statistics
    Info {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Show effective configuration
    Config {
        /// Print a commented template instead
        #[arg(long)]
        template: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
