use std::collections::HashSet;

use crate::error::TransitionError;
use crate::models::{Document, WordRef};
use crate::tree::TreeNode;

/// All mutable UI state of a reading session.
///
/// Created once at startup and only ever changed through the transition
/// methods below; the view layer reads it and emits intents, it never
/// mutates directly. Nothing here survives the process.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    active_leaf: Option<Vec<String>>,
    /// Folders default to open, so membership here means collapsed. An
    /// untouched folder must render expanded.
    collapsed_folders: HashSet<Vec<String>>,
    selected_word: Option<WordRef>,
    pub hide_diacritics: bool,
    pub hide_gloss: bool,
    pub dark_theme: bool,
    pub settings_panel_visible: bool,
}

impl SelectionState {
    /// Defaults: first leaf active (if the tree has one), every folder
    /// expanded, both hide toggles off, light theme.
    pub fn new(tree: &TreeNode) -> Self {
        Self {
            active_leaf: tree.first_leaf_path(),
            collapsed_folders: HashSet::new(),
            selected_word: None,
            hide_diacritics: false,
            hide_gloss: false,
            dark_theme: false,
            settings_panel_visible: true,
        }
    }

    pub fn active_leaf(&self) -> Option<&[String]> {
        self.active_leaf.as_deref()
    }

    pub fn selected_word(&self) -> Option<WordRef> {
        self.selected_word
    }

    /// Activate the leaf at `path`. Switching stories always clears the word
    /// selection, even when re-selecting the already-active leaf.
    pub fn select_leaf(
        &mut self,
        tree: &TreeNode,
        path: &[String],
    ) -> Result<(), TransitionError> {
        if tree.find_leaf(path).is_none() {
            return Err(TransitionError::UnknownLeaf {
                path: path.to_vec(),
            });
        }
        self.active_leaf = Some(path.to_vec());
        self.selected_word = None;
        Ok(())
    }

    /// Flip a folder between open and collapsed.
    pub fn toggle_folder(&mut self, path: &[String]) {
        if !self.collapsed_folders.remove(path) {
            self.collapsed_folders.insert(path.to_vec());
        }
    }

    pub fn is_folder_open(&self, path: &[String]) -> bool {
        !self.collapsed_folders.contains(path)
    }

    /// Select a word, or deselect it when it is already selected (clicking
    /// the same word twice closes the detail pane).
    pub fn select_word(
        &mut self,
        document: &Document,
        word_ref: WordRef,
    ) -> Result<(), TransitionError> {
        if self.selected_word == Some(word_ref) {
            self.selected_word = None;
            return Ok(());
        }
        if document.word(word_ref).is_none() {
            return Err(TransitionError::UnknownWord {
                story: word_ref.story,
                line: word_ref.line,
                word: word_ref.word,
            });
        }
        self.selected_word = Some(word_ref);
        Ok(())
    }

    pub fn set_hide_diacritics(&mut self, hide: bool) {
        self.hide_diacritics = hide;
    }

    pub fn set_hide_gloss(&mut self, hide: bool) {
        self.hide_gloss = hide;
    }

    pub fn set_dark_theme(&mut self, dark: bool) {
        self.dark_theme = dark;
    }

    pub fn set_settings_panel_visible(&mut self, visible: bool) {
        self.settings_panel_visible = visible;
    }
}
