use serde::{Deserialize, Serialize};

/// Display defaults applied to a fresh session. These seed the in-memory
/// selection state; nothing is written back when the session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub hide_diacritics: bool,
    pub hide_gloss: bool,
    pub dark_theme: bool,
    pub show_settings_panel: bool,
    pub mouse_support: bool,
    /// Content directory opened when the command line names none.
    pub content_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hide_diacritics: false,
            hide_gloss: false,
            dark_theme: false,
            show_settings_panel: true,
            mouse_support: false,
            content_dir: None,
        }
    }
}

impl Settings {
    pub fn merge(&mut self, other: Self) {
        self.hide_diacritics = other.hide_diacritics;
        self.hide_gloss = other.hide_gloss;
        self.dark_theme = other.dark_theme;
        self.show_settings_panel = other.show_settings_panel;
        self.mouse_support = other.mouse_support;
        if other.content_dir.is_some() {
            self.content_dir = other.content_dir;
        }
    }
}

/// User-facing key names, one string per action. The first character of each
/// string is the bound key; arrows, Enter, Tab and Escape are built in and
/// not rebindable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CfgDefaultKeymaps {
    pub scroll_up: String,
    pub scroll_down: String,
    pub prev_word: String,
    pub next_word: String,
    pub toggle_navigator: String,
    pub toggle_diacritics: String,
    pub toggle_gloss: String,
    pub switch_theme: String,
    pub settings: String,
    pub yank_word: String,
    pub help: String,
    pub quit: String,
}

impl Default for CfgDefaultKeymaps {
    fn default() -> Self {
        Self {
            scroll_up: "k".to_string(),
            scroll_down: "j".to_string(),
            prev_word: "h".to_string(),
            next_word: "l".to_string(),
            toggle_navigator: "m".to_string(),
            toggle_diacritics: "d".to_string(),
            toggle_gloss: "e".to_string(),
            switch_theme: "c".to_string(),
            settings: "s".to_string(),
            yank_word: "y".to_string(),
            help: "?".to_string(),
            quit: "q".to_string(),
        }
    }
}

impl CfgDefaultKeymaps {
    pub fn merge(&mut self, other: Self) {
        self.scroll_up = other.scroll_up;
        self.scroll_down = other.scroll_down;
        self.prev_word = other.prev_word;
        self.next_word = other.next_word;
        self.toggle_navigator = other.toggle_navigator;
        self.toggle_diacritics = other.toggle_diacritics;
        self.toggle_gloss = other.toggle_gloss;
        self.switch_theme = other.switch_theme;
        self.settings = other.settings;
        self.yank_word = other.yank_word;
        self.help = other.help;
        self.quit = other.quit;
    }
}

/// Resolved key bindings used by the event loop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Keymap {
    pub scroll_up: Vec<char>,
    pub scroll_down: Vec<char>,
    pub prev_word: Vec<char>,
    pub next_word: Vec<char>,
    pub toggle_navigator: Vec<char>,
    pub toggle_diacritics: Vec<char>,
    pub toggle_gloss: Vec<char>,
    pub switch_theme: Vec<char>,
    pub settings: Vec<char>,
    pub yank_word: Vec<char>,
    pub help: Vec<char>,
    pub quit: Vec<char>,
}

impl Keymap {
    pub fn from_user_dict(dict: &CfgDefaultKeymaps) -> Self {
        let chars = |s: &str| s.chars().take(1).collect::<Vec<char>>();
        Self {
            scroll_up: chars(&dict.scroll_up),
            scroll_down: chars(&dict.scroll_down),
            prev_word: chars(&dict.prev_word),
            next_word: chars(&dict.next_word),
            toggle_navigator: chars(&dict.toggle_navigator),
            toggle_diacritics: chars(&dict.toggle_diacritics),
            toggle_gloss: chars(&dict.toggle_gloss),
            switch_theme: chars(&dict.switch_theme),
            settings: chars(&dict.settings),
            yank_word: chars(&dict.yank_word),
            help: chars(&dict.help),
            quit: chars(&dict.quit),
        }
    }
}
