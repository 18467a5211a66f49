use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Data directory holding items.json. A leading `~/` expands to $HOME.
    /// Absent = $XDG_DATA_HOME/floaty (or ~/.local/share/floaty).
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Save on every keystroke while editing a row instead of coalescing
    /// edits until the row loses focus or the panel goes idle.
    #[serde(default)]
    pub save_every_keystroke: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Outer width of the panel in cells
    #[serde(default = "default_width")]
    pub width: u16,
    /// Height of one row in cells
    #[serde(default = "default_row_height")]
    pub row_height: u16,
    /// Extra vertical padding inside the panel border
    #[serde(default)]
    pub padding: u16,
    /// Start with the panel hidden (only the status bar shows)
    #[serde(default)]
    pub start_hidden: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            width: default_width(),
            row_height: default_row_height(),
            padding: 0,
            start_hidden: false,
        }
    }
}

fn default_width() -> u16 {
    34
}

fn default_row_height() -> u16 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Kitty keyboard protocol: true = force on, false = force off, absent = on (default).
    /// Needed for Cmd (Super) chords. Without it Ctrl+Enter and Ctrl+Backspace
    /// arrive as Ctrl+J and Ctrl+H, which are bound to the same commands.
    #[serde(default)]
    pub kitty_keyboard: Option<bool>,
}
