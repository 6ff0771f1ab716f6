//! Command dispatch: load input and settings, run one tree operation.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, DictOptions, GraphvizOptions, LineStyle, ShowOptions};
use crate::cli::args::{Cli, Commands, TreeInput};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{Tree, TreeBuilder};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        ));
    };
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = load_settings(cli.config_dir.as_deref())?;
    debug!("settings: {:?}", settings);

    match command {
        Commands::Show {
            tree,
            line_style,
            show_ids,
            reverse,
            no_sort,
            output,
        } => cmd_show(&settings, tree, *line_style, *show_ids, *reverse, *no_sort, output.as_deref()),
        Commands::Json {
            tree,
            reverse,
            no_sort,
            pretty,
        } => cmd_json(&settings, tree, *reverse, *no_sort, *pretty),
        Commands::Dot {
            input,
            shape,
            graph_type,
            output,
        } => {
            let tree = load_tree(input)?;
            let options = GraphvizOptions::new()
                .shape(shape.clone().unwrap_or_else(|| settings.graphviz.shape.clone()))
                .graph_type(graph_type.unwrap_or(settings.graphviz.graph_type));
            match output {
                Some(path) => {
                    tree.write_graphviz(path, options)?;
                    output::action("Written", &path.display());
                }
                None => output::info(&tree.to_graphviz(options)?),
            }
            Ok(())
        }
        Commands::Expand {
            tree,
            mode,
            reverse,
            no_sort,
        } => {
            let t = load_tree(&tree.input)?;
            let mut expansion = t
                .expand_tree()
                .mode(mode.unwrap_or(settings.traversal))
                .reverse(*reverse)
                .sorting(!*no_sort);
            if let Some(nid) = &tree.from {
                expansion = expansion.from(nid);
            }
            for nid in expansion.traverse()? {
                output::info(&nid);
            }
            Ok(())
        }
        Commands::Leaves { tree } => {
            let t = load_tree(&tree.input)?;
            for leaf in t.leaves(tree.from.as_deref())? {
                output::info(leaf.borrow().identifier());
            }
            Ok(())
        }
        Commands::Paths { input, separator } => {
            let t = load_tree(input)?;
            for path in t.paths_to_leaves()? {
                output::info(&path.iter().join(separator));
            }
            Ok(())
        }
        Commands::Info { input } => cmd_info(input),
        Commands::Config { template } => {
            if *template {
                output::info(&Settings::template());
            } else {
                output::info(&settings.to_toml()?);
            }
            Ok(())
        }
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(level = "debug")]
fn load_settings(config_dir: Option<&Path>) -> CliResult<Settings> {
    let dir = match config_dir {
        Some(dir) => Some(dir.to_path_buf()),
        None => std::env::current_dir().ok(),
    };
    Ok(Settings::load(dir.as_deref())?)
}

/// Read the JSON mapping from a file or stdin (`-`).
fn read_input(input: &Path) -> CliResult<String> {
    let mut content = String::new();
    let result = if input == Path::new("-") {
        io::stdin().read_to_string(&mut content)
    } else {
        std::fs::File::open(input).and_then(|mut f| f.read_to_string(&mut content))
    };
    result.map_err(|source| CliError::Input {
        path: PathBuf::from(input),
        source,
    })?;
    Ok(content)
}

/// Parse a `{"child": "parent" | null}` JSON object into a tree.
#[instrument(level = "debug")]
pub fn load_tree(input: &Path) -> CliResult<Tree> {
    let content = read_input(input)?;
    parse_tree(&content)
}

pub fn parse_tree(content: &str) -> CliResult<Tree> {
    let mapping: IndexMap<String, Option<String>> =
        serde_json::from_str(content).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    Ok(TreeBuilder::new().build_from_map(mapping)?)
}

fn cmd_show(
    settings: &Settings,
    input: &TreeInput,
    line_style: Option<LineStyle>,
    show_ids: bool,
    reverse: bool,
    no_sort: bool,
    output_path: Option<&Path>,
) -> CliResult<()> {
    let tree = load_tree(&input.input)?;
    let mut options = ShowOptions::new()
        .line_style(line_style.unwrap_or(settings.show.line_style))
        .id_hidden(settings.show.id_hidden && !show_ids)
        .reverse(settings.show.reverse || reverse)
        .sorting(settings.show.sorting && !no_sort);
    if let Some(nid) = &input.from {
        options = options.from(nid);
    }
    match output_path {
        Some(path) => {
            tree.save_to_file(path, &options)?;
            output::action("Appended", &path.display());
        }
        None => print!("{}", tree.show(&options)?),
    }
    Ok(())
}

fn cmd_json(
    settings: &Settings,
    input: &TreeInput,
    reverse: bool,
    no_sort: bool,
    pretty: bool,
) -> CliResult<()> {
    let tree = load_tree(&input.input)?;
    let mut options = DictOptions::new()
        .reverse(settings.show.reverse || reverse)
        .sorting(settings.show.sorting && !no_sort);
    if let Some(nid) = &input.from {
        options = options.from(nid);
    }
    let text = if pretty {
        serde_json::to_string_pretty(&tree.to_dict(&options)?)
            .map_err(ApplicationError::from)?
    } else {
        tree.to_json(&options)?
    };
    output::info(&text);
    Ok(())
}

fn cmd_info(input: &Path) -> CliResult<()> {
    let tree = load_tree(input)?;
    output::field("tree", tree.identifier());
    output::field("root", tree.root().unwrap_or("-"));
    output::field("nodes", &tree.size(None));
    output::field("depth", &tree.depth(None)?);
    output::field("leaves", &tree.leaves(None)?.len());
    for level in 0..=tree.depth(None)? {
        output::field(&format!("level {level}"), &tree.size(Some(level)));
    }
    Ok(())
}
