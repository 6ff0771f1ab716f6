//! CLI argument parsing and input handling.

use std::fs;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use rstree::application::LineStyle;
use rstree::cli::commands::{load_tree, parse_tree};
use rstree::cli::{execute_command, Cli, CliError, Commands};
use rstree::domain::TraversalMode;
use rstree::exitcode;

const FAMILY: &str = r#"{"harry": null, "jane": "harry", "bill": "harry", "diane": "jane"}"#;

#[test]
fn given_show_args_when_parsing_then_flags_captured() {
    let cli = Cli::try_parse_from([
        "rstree", "-dd", "show", "tree.json", "--line-style", "ascii-em", "--show-ids", "-f",
        "jane",
    ])
    .unwrap();

    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::Show {
            tree,
            line_style,
            show_ids,
            ..
        }) => {
            assert_eq!(tree.from.as_deref(), Some("jane"));
            assert_eq!(line_style, Some(LineStyle::AsciiEm));
            assert!(show_ids);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[rstest]
#[case("zigzag", TraversalMode::ZigZag)]
#[case("width", TraversalMode::Width)]
fn given_expand_mode_when_parsing_then_mode_parsed(
    #[case] name: &str,
    #[case] expected: TraversalMode,
) {
    let cli = Cli::try_parse_from(["rstree", "expand", "t.json", "--mode", name]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Expand { mode: Some(m), .. }) if m == expected
    ));
}

#[test]
fn given_expand_reverse_alone_when_parsing_then_sorting_stays_on() {
    let cli = Cli::try_parse_from(["rstree", "expand", "t.json", "-r"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Expand {
            reverse: true,
            no_sort: false,
            ..
        })
    ));
}

#[test]
fn given_unknown_line_style_when_parsing_then_rejected() {
    assert!(Cli::try_parse_from(["rstree", "show", "t.json", "-l", "fancy"]).is_err());
}

#[test]
fn given_json_mapping_when_parsing_tree_then_order_preserved() {
    let tree = parse_tree(FAMILY).unwrap();
    assert_eq!(tree.root(), Some("harry"));
    assert_eq!(tree.children_ids("harry").unwrap(), vec!["jane", "bill"]);
}

#[rstest]
#[case("not json")]
#[case(r#"["a", "b"]"#)]
fn given_malformed_input_when_parsing_tree_then_data_error(#[case] content: &str) {
    let err = parse_tree(content).unwrap_err();
    assert!(matches!(err, CliError::InvalidInput(_)));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_two_roots_when_parsing_tree_then_tree_error() {
    let err = parse_tree(r#"{"a": null, "b": null}"#).unwrap_err();
    assert!(matches!(err, CliError::Application(_)));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_missing_file_when_loading_tree_then_no_input() {
    let dir = TempDir::new().unwrap();
    let err = load_tree(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_dot_output_when_executing_then_file_written() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("family.json");
    let output = dir.path().join("family.dot");
    fs::write(&input, FAMILY).unwrap();

    let cli = Cli::try_parse_from([
        "rstree",
        "-C",
        dir.path().to_str().unwrap(),
        "dot",
        input.to_str().unwrap(),
        "--shape",
        "box",
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();
    execute_command(&cli).unwrap();

    let dot = fs::read_to_string(&output).unwrap();
    assert!(dot.contains("\"harry\" [label=\"harry\", shape=box]"));
    assert!(dot.contains("\"jane\" -> \"diane\""));
}

#[test]
fn given_show_output_when_executing_then_rendering_appended() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("family.json");
    let output = dir.path().join("family.txt");
    fs::write(&input, FAMILY).unwrap();

    let cli = Cli::try_parse_from([
        "rstree",
        "-C",
        dir.path().to_str().unwrap(),
        "show",
        input.to_str().unwrap(),
        "-l",
        "ascii",
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();
    execute_command(&cli).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("harry\n|-- bill\n"));
}

#[test]
fn given_no_command_when_executing_then_usage_error() {
    let cli = Cli::try_parse_from(["rstree"]).unwrap();
    let err = execute_command(&cli).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}
