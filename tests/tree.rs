use qisas::models::{ContentRecord, Document, Story};
use qisas::tree::TreeNode;

fn record(path: &[&str]) -> ContentRecord {
    ContentRecord::new(
        path.iter().map(|s| s.to_string()).collect(),
        Document::default(),
    )
    .unwrap()
}

fn record_titled(path: &[&str], title: &str) -> ContentRecord {
    let document = Document {
        stories: vec![Story {
            title: title.to_string(),
            lines: vec![],
        }],
    };
    ContentRecord::new(path.iter().map(|s| s.to_string()).collect(), document).unwrap()
}

fn path(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

#[test]
fn build_is_a_bijection_on_unique_paths() {
    let inputs = vec![
        record(&["a", "1.json"]),
        record(&["a", "b", "2.json"]),
        record(&["3.json"]),
        record(&["c", "4.json"]),
    ];
    let mut expected: Vec<Vec<String>> = inputs.iter().map(|r| r.path().to_vec()).collect();

    let tree = TreeNode::build(inputs);
    let mut leaves = tree.leaf_paths();

    expected.sort();
    leaves.sort();
    assert_eq!(leaves, expected);

    for leaf in &leaves {
        assert!(tree.find_leaf(leaf).is_some());
    }
}

#[test]
fn rebuild_from_any_insertion_order_is_identical() {
    // unique sort keys throughout, so ordering never falls back to
    // insertion order
    let a = vec![
        record(&["suras", "1.json"]),
        record(&["suras", "2.json"]),
        record(&["intro", "1.json"]),
        record(&["9.json"]),
    ];
    let mut b = a.clone();
    b.reverse();

    assert_eq!(TreeNode::build(a), TreeNode::build(b));
}

#[test]
fn folders_order_before_leaves_at_the_same_level() {
    let tree = TreeNode::build(vec![record(&["1.json"]), record(&["A", "x.json"])]);
    let TreeNode::Folder { children, .. } = &tree else {
        panic!("root must be a folder");
    };
    assert_eq!(children[0].name(), "A");
    assert_eq!(children[1].name(), "1.json");
}

#[test]
fn leaves_order_numerically_not_lexicographically() {
    let tree = TreeNode::build(vec![
        record(&["2.json"]),
        record(&["10.json"]),
        record(&["1.json"]),
    ]);
    let names: Vec<String> = tree
        .leaf_paths()
        .into_iter()
        .map(|p| p.join("/"))
        .collect();
    assert_eq!(names, vec!["1.json", "2.json", "10.json"]);
}

#[test]
fn end_to_end_tree_shape() {
    let tree = TreeNode::build(vec![
        record_titled(&["a", "2.json"], "الثانية"),
        record_titled(&["a", "1.json"], "الأولى"),
        record_titled(&["b.json"], "ب"),
    ]);

    let TreeNode::Folder { children, .. } = &tree else {
        panic!("root must be a folder");
    };
    assert_eq!(children.len(), 2);
    assert!(matches!(&children[0], TreeNode::Folder { name, .. } if name == "a"));
    assert!(matches!(&children[1], TreeNode::Leaf { name, .. } if name == "b.json"));

    let TreeNode::Folder { children: inner, .. } = &children[0] else {
        panic!("a must be a folder");
    };
    assert_eq!(inner[0].name(), "1.json");
    assert_eq!(inner[1].name(), "2.json");

    let first = tree.find_leaf(&path(&["a", "1.json"])).unwrap();
    assert_eq!(first.document.stories[0].title, "الأولى");
}

#[test]
fn duplicate_paths_keep_the_later_record() {
    let tree = TreeNode::build(vec![
        record_titled(&["1.json"], "first"),
        record_titled(&["1.json"], "second"),
    ]);
    assert_eq!(tree.leaf_paths().len(), 1);
    let found = tree.find_leaf(&path(&["1.json"])).unwrap();
    assert_eq!(found.document.stories[0].title, "second");
}
