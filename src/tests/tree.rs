use super::build;
use crate::input::split_lines;

#[test]
fn test_build_expands_every_level() {
    let lines = split_lines("# A\n## B\n@misc{k, title={T}}\n### C\n# D\n");
    let tree = build(&lines);

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].node.label, "A");
    assert_eq!(tree[0].node_count(), 4);

    let b = &tree[0].children[0];
    assert_eq!(b.node.label, "B");
    let labels: Vec<&str> = b.children.iter().map(|t| t.node.label.as_str()).collect();
    assert_eq!(labels, vec!["k", "C"]);
    assert!(b.children[0].children.is_empty());
    assert_eq!(tree[1].node_count(), 1);
}

#[test]
fn test_json_shape() {
    let lines = split_lines("# A\n@misc{k, title={T}}\n");
    let json = serde_json::to_value(build(&lines)).unwrap();

    assert_eq!(json[0]["label"], "A");
    assert_eq!(json[0]["line_start"], 0);
    assert_eq!(json[0]["line_end"], 2);
    assert_eq!(json[0]["expandable"], true);
    assert_eq!(json[0]["children"][0]["secondary_text"], "T");
    assert!(json[0]["children"][0].get("children").is_none());
}
