//! Dict/JSON, GraphViz and text export.

use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

use rstree::application::{
    ApplicationError, DictOptions, GraphType, GraphvizOptions, LineStyle, ShowOptions,
};
use rstree::domain::{Node, NodeUpdate, Tree};
use rstree::util::testing;

#[fixture]
fn family() -> Tree {
    testing::init_test_setup();
    let mut tree = Tree::with_identifier("family");
    tree.create_node(Some("Harry"), Some("harry"), None, None).unwrap();
    tree.create_node(Some("Jane"), Some("jane"), Some("harry"), None).unwrap();
    tree.create_node(Some("Bill"), Some("bill"), Some("harry"), None).unwrap();
    tree.create_node(Some("Diane"), Some("diane"), Some("jane"), None).unwrap();
    tree.create_node(Some("George"), Some("george"), Some("bill"), None).unwrap();
    tree
}

#[fixture]
fn pair() -> Tree {
    let mut tree = Tree::new();
    tree.create_node(Some("A"), Some("a"), None, None).unwrap();
    tree.create_node(Some("B"), Some("b"), Some("a"), None).unwrap();
    tree
}

// ============================================================
// Dict / JSON
// ============================================================

#[rstest]
fn given_two_node_tree_when_exporting_json_then_leaf_collapses_to_tag(pair: Tree) {
    let text = pair.to_json(&DictOptions::new()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({"A": {"children": ["B"]}}));
}

#[test]
fn given_data_when_exporting_with_data_then_every_node_carries_it() {
    let mut tree: Tree<u32> = Tree::new();
    tree.create_node(Some("A"), Some("a"), None, Some(1)).unwrap();
    tree.create_node(Some("B"), Some("b"), Some("a"), Some(2)).unwrap();
    tree.create_node(Some("C"), Some("c"), Some("a"), None).unwrap();

    let dict = tree.to_dict(&DictOptions::new().with_data(true)).unwrap();

    assert_eq!(
        dict,
        json!({"A": {"children": [{"B": {"data": 2}}, {"C": {"data": null}}], "data": 1}})
    );
}

#[rstest]
fn given_family_when_exporting_then_children_sorted_by_tag(family: Tree) {
    let dict = family.to_dict(&DictOptions::new()).unwrap();
    assert_eq!(
        dict,
        json!({"Harry": {"children": [
            {"Bill": {"children": ["George"]}},
            {"Jane": {"children": ["Diane"]}}
        ]}})
    );
}

#[rstest]
fn given_reverse_and_start_when_exporting_then_subtree_in_descending_order(family: Tree) {
    let dict = family
        .to_dict(&DictOptions::new().reverse(true).sorting(true))
        .unwrap();
    assert_eq!(dict["Harry"]["children"][0], json!({"Jane": {"children": ["Diane"]}}));

    let sub = family.to_dict(&DictOptions::new().from("bill")).unwrap();
    assert_eq!(sub, json!({"Bill": {"children": ["George"]}}));
}

#[rstest]
fn given_sorting_off_when_exporting_then_insertion_order(family: Tree) {
    let dict = family.to_dict(&DictOptions::new().sorting(false)).unwrap();
    assert_eq!(dict["Harry"]["children"][0], json!({"Jane": {"children": ["Diane"]}}));
}

#[rstest]
fn given_collapsed_node_when_exporting_then_rendered_as_leaf(mut family: Tree) {
    family
        .update_node("jane", NodeUpdate::new().expanded(false))
        .unwrap();
    let dict = family.to_dict(&DictOptions::new()).unwrap();
    assert_eq!(dict["Harry"]["children"][1], json!("Jane"));
}

#[test]
fn given_empty_tree_when_exporting_then_empty_object() {
    let tree: Tree = Tree::new();
    assert_eq!(tree.to_json(&DictOptions::new()).unwrap(), "{}");
}

// ============================================================
// GraphViz
// ============================================================

#[rstest]
fn given_two_node_tree_when_exporting_dot_then_declarations_and_edges(pair: Tree) {
    let dot = pair.to_graphviz(GraphvizOptions::new()).unwrap();
    assert_eq!(
        dot,
        "digraph tree {\n\t\"a\" [label=\"A\", shape=circle]\n\t\"b\" [label=\"B\", shape=circle]\n\n\t\"a\" -> \"b\"\n}"
    );
}

#[rstest]
fn given_undirected_graph_and_shape_when_exporting_dot_then_uses_them(pair: Tree) {
    let dot = pair
        .to_graphviz(GraphvizOptions::new().graph_type(GraphType::Graph).shape("box"))
        .unwrap();
    assert!(dot.starts_with("graph tree {"));
    assert!(dot.contains("shape=box"));
    assert!(dot.contains("\"a\" -- \"b\""));
}

#[test]
fn given_quote_in_tag_when_exporting_dot_then_escaped() {
    let mut tree: Tree = Tree::new();
    tree.create_node(Some("say \"hi\""), Some("q"), None, None).unwrap();
    let dot = tree.to_graphviz(GraphvizOptions::new()).unwrap();
    assert!(dot.contains(r#"[label="say \"hi\"", shape=circle]"#));
}

#[test]
fn given_quote_in_identifier_when_exporting_dot_then_escaped() {
    let mut tree: Tree = Tree::new();
    tree.create_node(Some("Top"), Some("a\"b"), None, None).unwrap();
    tree.create_node(Some("Kid"), Some("c"), Some("a\"b"), None).unwrap();
    let dot = tree.to_graphviz(GraphvizOptions::new()).unwrap();
    assert!(dot.contains(r#""a\"b" [label="Top", shape=circle]"#));
    assert!(dot.contains(r#""a\"b" -> "c""#));
}

#[test]
fn given_nodes_inserted_against_tag_order_when_exporting_dot_then_declared_by_tag() {
    let mut tree: Tree = Tree::new();
    tree.create_node(Some("Root"), Some("r"), None, None).unwrap();
    tree.create_node(Some("Zed"), Some("z"), Some("r"), None).unwrap();
    tree.create_node(Some("Amy"), Some("a"), Some("r"), None).unwrap();
    let dot = tree.to_graphviz(GraphvizOptions::new()).unwrap();
    let amy = dot.find("\"a\" [").unwrap();
    let zed = dot.find("\"z\" [").unwrap();
    assert!(amy < zed);
}

#[test]
fn given_empty_tree_when_exporting_dot_then_empty_body() {
    let tree: Tree = Tree::new();
    assert_eq!(
        tree.to_graphviz(GraphvizOptions::new()).unwrap(),
        "digraph tree {\n}"
    );
}

#[rstest]
fn given_filter_when_exporting_dot_then_pruned_nodes_have_no_edges(family: Tree) {
    let dot = family
        .to_graphviz(GraphvizOptions::new().filter(|n: &Node| n.identifier() != "jane"))
        .unwrap();
    assert!(!dot.contains("\"jane\""));
    assert!(!dot.contains("\"diane\""));
    assert!(dot.contains("\"harry\" -> \"bill\""));
}

#[rstest]
fn given_path_when_writing_dot_then_file_contains_text(pair: Tree) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.dot");
    pair.write_graphviz(&path, GraphvizOptions::new()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("digraph tree {"));
}

#[rstest]
#[case("digraph", GraphType::Digraph)]
#[case("graph", GraphType::Graph)]
fn given_graph_type_name_when_parsing_then_type(#[case] name: &str, #[case] expected: GraphType) {
    assert_eq!(name.parse::<GraphType>().unwrap(), expected);
}

#[test]
fn given_unknown_graph_type_when_parsing_then_config_error() {
    assert!(matches!(
        "hypergraph".parse::<GraphType>(),
        Err(ApplicationError::Config { .. })
    ));
}

// ============================================================
// Text rendering
// ============================================================

#[rstest]
fn given_family_when_showing_then_sorted_by_tag_with_connectors(family: Tree) {
    let text = family.show(&ShowOptions::new()).unwrap();
    assert_eq!(
        text,
        "Harry\n├── Bill\n│   └── George\n└── Jane\n    └── Diane\n"
    );
    assert_eq!(family.to_string(), text);
}

#[rstest]
fn given_ids_shown_when_showing_then_labels_include_identifier(family: Tree) {
    let text = family
        .show(&ShowOptions::new().id_hidden(false).from("jane"))
        .unwrap();
    assert_eq!(text.lines().next(), Some("Jane[jane]"));
    assert!(text.contains("Diane[diane]"));
    assert!(!text.contains("Harry"));
}

#[rstest]
#[case(LineStyle::Ascii, "|-- ")]
#[case(LineStyle::AsciiEx, "├── ")]
#[case(LineStyle::AsciiExr, "╰── ")]
#[case(LineStyle::AsciiEm, "╠══ ")]
#[case(LineStyle::AsciiEmv, "╙── ")]
#[case(LineStyle::AsciiEmh, "╞══ ")]
fn given_line_style_when_showing_then_uses_its_glyphs(
    family: Tree,
    #[case] style: LineStyle,
    #[case] glyph: &str,
) {
    let text = family.show(&ShowOptions::new().line_style(style)).unwrap();
    assert!(text.contains(glyph), "{style} output lacks '{glyph}':\n{text}");
}

#[rstest]
fn given_filter_and_collapsed_node_when_showing_then_both_prune(mut family: Tree) {
    family
        .update_node("bill", NodeUpdate::new().expanded(false))
        .unwrap();
    let text = family
        .show(&ShowOptions::new().filter(|n: &Node| n.identifier() != "diane"))
        .unwrap();
    assert!(text.contains("Bill"));
    assert!(!text.contains("George"));
    assert!(text.contains("Jane"));
    assert!(!text.contains("Diane"));
}

#[rstest]
fn given_key_and_reverse_when_showing_then_siblings_follow_key(family: Tree) {
    let text = family
        .show(&ShowOptions::new().key(|n: &Node| n.tag().len()).reverse(true))
        .unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // Jane and Bill tie on length, so insertion order is kept
    assert!(lines[1].ends_with("Jane"));
}

#[test]
fn given_empty_tree_when_showing_then_empty_string() {
    let tree: Tree = Tree::new();
    assert_eq!(tree.show(&ShowOptions::new()).unwrap(), "");
}

#[rstest]
fn given_file_when_saving_twice_then_renderings_appended(pair: Tree) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.txt");
    pair.save_to_file(&path, &ShowOptions::new()).unwrap();
    pair.save_to_file(&path, &ShowOptions::new()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "A\n└── B\nA\n└── B\n");
}

#[rstest]
#[case("ascii", LineStyle::Ascii)]
#[case("ascii-emv", LineStyle::AsciiEmv)]
fn given_style_name_when_parsing_then_style(#[case] name: &str, #[case] expected: LineStyle) {
    assert_eq!(name.parse::<LineStyle>().unwrap(), expected);
    assert_eq!(expected.to_string(), name);
}
