use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Selected task index, if any
    #[serde(default)]
    pub selection: Option<usize>,
}

pub fn ui_state_path(state_dir: &Path) -> PathBuf {
    state_dir.join(".state.json")
}

/// Read .state.json from the state directory
pub fn read_ui_state(state_dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(ui_state_path(state_dir)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the state directory
pub fn write_ui_state(state_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(ui_state_path(state_dir), content)
}
