pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod models;
pub mod selection;
pub mod settings;
pub mod tree;
pub mod ui;
pub mod view;

use models::ContentRecord;
use selection::SelectionState;
use tree::TreeNode;

/// Build the content tree from the loaded records and pair it with a fresh
/// default selection state (first leaf active, all folders expanded, toggles
/// off). The tree is immutable for the rest of the session; the selection
/// state is mutated only through its transition methods.
pub fn init(records: Vec<ContentRecord>) -> (TreeNode, SelectionState) {
    let tree = TreeNode::build(records);
    let selection = SelectionState::new(&tree);
    (tree, selection)
}
