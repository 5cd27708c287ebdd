use crate::settings::{CfgDefaultKeymaps, Keymap, Settings};
use eyre::Result;
use std::{fs, path::Path, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub keymap: Keymap,
    keymap_user_dict: CfgDefaultKeymaps,
    filepath: PathBuf,
}

impl Config {
    /// Load `configuration.json` from the app data prefix. A missing file
    /// yields the defaults; a present file overrides only the fields it
    /// names, under a `"Setting"` and a `"Keymap"` section.
    pub fn new() -> Result<Self> {
        let prefix = get_app_data_prefix()?;
        Self::from_file(prefix.join("configuration.json"))
    }

    /// Same as [`Config::new`] but with an explicit file path (the `-c` flag).
    pub fn from_file(filepath: PathBuf) -> Result<Self> {
        let mut settings = Settings::default();
        let mut keymap_user_dict = CfgDefaultKeymaps::default();

        if filepath.exists() {
            let config_str = fs::read_to_string(&filepath)?;
            if let Ok(user_config) = serde_json::from_str::<serde_json::Value>(&config_str) {
                if let Some(user_settings) = user_config.get("Setting") {
                    apply_settings(&mut settings, user_settings);
                }
                if let Some(user_keymap) = user_config.get("Keymap") {
                    apply_keymap(&mut keymap_user_dict, user_keymap);
                }
            }
        }

        let keymap = Keymap::from_user_dict(&keymap_user_dict);

        Ok(Self {
            settings,
            keymap,
            keymap_user_dict,
            filepath,
        })
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    /// Key names as configured, for the help window text.
    pub fn keymap_user_dict(&self) -> &CfgDefaultKeymaps {
        &self.keymap_user_dict
    }
}

impl Default for Config {
    fn default() -> Self {
        let keymap_user_dict = CfgDefaultKeymaps::default();
        Self {
            settings: Settings::default(),
            keymap: Keymap::from_user_dict(&keymap_user_dict),
            keymap_user_dict,
            filepath: PathBuf::new(),
        }
    }
}

fn apply_settings(settings: &mut Settings, value: &serde_json::Value) {
    let Some(map) = value.as_object() else {
        return;
    };
    if let Some(val) = map.get("hide_diacritics").and_then(|v| v.as_bool()) {
        settings.hide_diacritics = val;
    }
    if let Some(val) = map.get("hide_gloss").and_then(|v| v.as_bool()) {
        settings.hide_gloss = val;
    }
    if let Some(val) = map.get("dark_theme").and_then(|v| v.as_bool()) {
        settings.dark_theme = val;
    }
    if let Some(val) = map.get("show_settings_panel").and_then(|v| v.as_bool()) {
        settings.show_settings_panel = val;
    }
    if let Some(val) = map.get("mouse_support").and_then(|v| v.as_bool()) {
        settings.mouse_support = val;
    }
    if let Some(val) = map.get("content_dir").and_then(|v| v.as_str()) {
        settings.content_dir = Some(val.to_string());
    }
}

fn apply_keymap(keymaps: &mut CfgDefaultKeymaps, value: &serde_json::Value) {
    let Some(map) = value.as_object() else {
        return;
    };
    let fields: [(&str, &mut String); 12] = [
        ("scroll_up", &mut keymaps.scroll_up),
        ("scroll_down", &mut keymaps.scroll_down),
        ("prev_word", &mut keymaps.prev_word),
        ("next_word", &mut keymaps.next_word),
        ("toggle_navigator", &mut keymaps.toggle_navigator),
        ("toggle_diacritics", &mut keymaps.toggle_diacritics),
        ("toggle_gloss", &mut keymaps.toggle_gloss),
        ("switch_theme", &mut keymaps.switch_theme),
        ("settings", &mut keymaps.settings),
        ("yank_word", &mut keymaps.yank_word),
        ("help", &mut keymaps.help),
        ("quit", &mut keymaps.quit),
    ];
    for (name, slot) in fields {
        if let Some(val) = map.get(name).and_then(|v| v.as_str()) {
            *slot = val.to_string();
        }
    }
}

/// Configuration directory: `$XDG_CONFIG_HOME/qisas`, else `~/.config/qisas`.
pub fn get_app_data_prefix() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join("qisas"));
        }
    }
    let home = std::env::var("HOME").map_err(|_| eyre::eyre!("HOME is not set"))?;
    Ok(PathBuf::from(home).join(".config").join("qisas"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::from_file(PathBuf::from("/no/such/configuration.json")).unwrap();
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.keymap.quit, vec!['q']);
    }

    #[test]
    fn test_partial_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("configuration.json");
        fs::write(
            &path,
            r#"{
                "Setting": {"dark_theme": true, "content_dir": "/data/stories"},
                "Keymap": {"quit": "x"}
            }"#,
        )
        .unwrap();

        let config = Config::from_file(path).unwrap();
        assert!(config.settings.dark_theme);
        assert_eq!(config.settings.content_dir.as_deref(), Some("/data/stories"));
        assert!(!config.settings.hide_gloss);
        assert_eq!(config.keymap.quit, vec!['x']);
        assert_eq!(config.keymap.help, vec!['?']);
    }

    #[test]
    fn test_invalid_json_tolerated() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("configuration.json");
        fs::write(&path, "{not json").unwrap();

        let config = Config::from_file(path).unwrap();
        assert_eq!(config.settings, Settings::default());
    }
}
