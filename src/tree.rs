use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::ContentRecord;

/// The content hierarchy: an explicit sum type instead of probing untyped
/// maps for a file marker.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Folder {
        name: String,
        children: Vec<TreeNode>,
    },
    Leaf {
        name: String,
        record: ContentRecord,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder { name, .. } => name,
            TreeNode::Leaf { name, .. } => name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Build the ordered content tree from a flat record list.
    ///
    /// Records are inserted in the given order; a duplicate leaf path
    /// overwrites the earlier record in place (last writer wins). The sort
    /// afterwards is stable, so ties keep insertion order and rebuilding
    /// from the same input yields an identical tree.
    pub fn build(records: Vec<ContentRecord>) -> TreeNode {
        let mut root = TreeNode::Folder {
            name: String::new(),
            children: Vec::new(),
        };
        for record in records {
            root.insert(record);
        }
        root.sort_children();
        root
    }

    fn insert(&mut self, record: ContentRecord) {
        let path = record.path().to_vec();
        let mut node = self;
        for (i, segment) in path.iter().enumerate() {
            let children = match node {
                TreeNode::Folder { children, .. } => children,
                // unreachable: node is only ever reassigned to a folder child
                TreeNode::Leaf { .. } => return,
            };
            if i == path.len() - 1 {
                if let Some(existing) = children
                    .iter_mut()
                    .find(|c| c.is_leaf() && c.name() == segment)
                {
                    *existing = TreeNode::Leaf {
                        name: segment.clone(),
                        record,
                    };
                } else {
                    children.push(TreeNode::Leaf {
                        name: segment.clone(),
                        record,
                    });
                }
                return;
            }
            let pos = children
                .iter()
                .position(|c| !c.is_leaf() && c.name() == segment);
            let pos = match pos {
                Some(pos) => pos,
                None => {
                    children.push(TreeNode::Folder {
                        name: segment.clone(),
                        children: Vec::new(),
                    });
                    children.len() - 1
                }
            };
            node = &mut children[pos];
        }
    }

    fn sort_children(&mut self) {
        if let TreeNode::Folder { children, .. } = self {
            children.sort_by(compare_siblings);
            for child in children {
                child.sort_children();
            }
        }
    }

    /// Look up the record of the leaf at `path`, if any.
    pub fn find_leaf(&self, path: &[String]) -> Option<&ContentRecord> {
        let (first, rest) = path.split_first()?;
        let children = match self {
            TreeNode::Folder { children, .. } => children,
            TreeNode::Leaf { .. } => return None,
        };
        if rest.is_empty() {
            children.iter().find_map(|c| match c {
                TreeNode::Leaf { name, record } if name == first => Some(record),
                _ => None,
            })
        } else {
            children
                .iter()
                .find(|c| !c.is_leaf() && c.name() == first)?
                .find_leaf(rest)
        }
    }

    /// Path of the first leaf in tree order; the default active story.
    pub fn first_leaf_path(&self) -> Option<Vec<String>> {
        self.leaf_paths().into_iter().next()
    }

    /// All leaf paths in tree order.
    pub fn leaf_paths(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        match self {
            TreeNode::Leaf { name, .. } => out.push(vec![name.clone()]),
            TreeNode::Folder { children, .. } => {
                for child in children {
                    match child {
                        TreeNode::Leaf { name, .. } => out.push(vec![name.clone()]),
                        TreeNode::Folder { name, .. } => {
                            for mut sub in child.leaf_paths() {
                                sub.insert(0, name.clone());
                                out.push(sub);
                            }
                        }
                    }
                }
            }
        }
        out
    }
}

/// Sibling ordering: folders first, folders by name, leaves by the numeric
/// prefix of their file name. Equal keys keep insertion order because the
/// caller uses a stable sort.
fn compare_siblings(a: &TreeNode, b: &TreeNode) -> Ordering {
    match (a, b) {
        (TreeNode::Folder { .. }, TreeNode::Leaf { .. }) => Ordering::Less,
        (TreeNode::Leaf { .. }, TreeNode::Folder { .. }) => Ordering::Greater,
        (TreeNode::Folder { name: a, .. }, TreeNode::Folder { name: b, .. }) => a.cmp(b),
        (TreeNode::Leaf { name: a, .. }, TreeNode::Leaf { name: b, .. }) => {
            numeric_prefix(a).cmp(&numeric_prefix(b))
        }
    }
}

/// First contiguous digit run in the name, or 0 when there is none.
///
/// Story files are named `12.json`, `3-intro.json` and so on; the number is
/// an ordering key only and is never shown as part of the title.
pub fn numeric_prefix(name: &str) -> u64 {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let digits = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("digit regex"));
    digits
        .find(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;

    fn record(path: &[&str]) -> ContentRecord {
        ContentRecord::new(
            path.iter().map(|s| s.to_string()).collect(),
            Document::default(),
        )
        .unwrap()
    }

    fn child_names(tree: &TreeNode) -> Vec<String> {
        match tree {
            TreeNode::Folder { children, .. } => {
                children.iter().map(|c| c.name().to_string()).collect()
            }
            TreeNode::Leaf { .. } => vec![],
        }
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("1.json"), 1);
        assert_eq!(numeric_prefix("10.json"), 10);
        assert_eq!(numeric_prefix("3-intro.json"), 3);
        assert_eq!(numeric_prefix("intro.json"), 0);
        assert_eq!(numeric_prefix(""), 0);
    }

    #[test]
    fn test_leaves_sort_numerically() {
        let tree = TreeNode::build(vec![
            record(&["2.json"]),
            record(&["10.json"]),
            record(&["1.json"]),
        ]);
        assert_eq!(child_names(&tree), vec!["1.json", "2.json", "10.json"]);
    }

    #[test]
    fn test_folders_sort_before_leaves() {
        let tree = TreeNode::build(vec![
            record(&["1.json"]),
            record(&["A", "1.json"]),
        ]);
        assert_eq!(child_names(&tree), vec!["A", "1.json"]);
    }

    #[test]
    fn test_folders_sort_lexicographically() {
        let tree = TreeNode::build(vec![
            record(&["b", "1.json"]),
            record(&["a", "1.json"]),
        ]);
        assert_eq!(child_names(&tree), vec!["a", "b"]);
    }

    #[test]
    fn test_no_digit_ties_keep_insertion_order() {
        let tree = TreeNode::build(vec![
            record(&["zebra.json"]),
            record(&["apple.json"]),
        ]);
        // both keys are 0, stable sort keeps insertion order
        assert_eq!(child_names(&tree), vec!["zebra.json", "apple.json"]);
    }

    #[test]
    fn test_duplicate_path_last_writer_wins() {
        let mut doc = Document::default();
        doc.stories.push(crate::models::Story {
            title: "second".to_string(),
            lines: vec![],
        });
        let tree = TreeNode::build(vec![
            record(&["1.json"]),
            ContentRecord::new(vec!["1.json".to_string()], doc).unwrap(),
        ]);
        assert_eq!(child_names(&tree).len(), 1);
        let found = tree.find_leaf(&["1.json".to_string()]).unwrap();
        assert_eq!(found.document.stories[0].title, "second");
    }

    #[test]
    fn test_find_leaf_nested() {
        let tree = TreeNode::build(vec![record(&["a", "b", "1.json"])]);
        let path: Vec<String> = ["a", "b", "1.json"].iter().map(|s| s.to_string()).collect();
        assert!(tree.find_leaf(&path).is_some());
        assert!(tree.find_leaf(&path[..2]).is_none());
        assert!(tree.find_leaf(&[]).is_none());
    }

    #[test]
    fn test_leaf_paths_in_tree_order() {
        let tree = TreeNode::build(vec![
            record(&["b.json"]),
            record(&["a", "2.json"]),
            record(&["a", "1.json"]),
        ]);
        assert_eq!(
            tree.leaf_paths(),
            vec![
                vec!["a".to_string(), "1.json".to_string()],
                vec!["a".to_string(), "2.json".to_string()],
                vec!["b.json".to_string()],
            ]
        );
    }

    #[test]
    fn test_first_leaf_path() {
        let tree = TreeNode::build(vec![
            record(&["z.json"]),
            record(&["a", "1.json"]),
        ]);
        assert_eq!(
            tree.first_leaf_path(),
            Some(vec!["a".to_string(), "1.json".to_string()])
        );

        let empty = TreeNode::build(vec![]);
        assert_eq!(empty.first_leaf_path(), None);
    }
}
