use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::store::StoreError;
use crate::model::config::StodoConfig;

pub fn config_path(state_dir: &Path) -> PathBuf {
    state_dir.join("config.toml")
}

/// Read `config.toml` from the state directory. A missing file yields the
/// defaults; a file that exists but doesn't parse is an error.
pub fn read_config(state_dir: &Path) -> Result<StodoConfig, StoreError> {
    let path = config_path(state_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StodoConfig::default()),
        Err(e) => return Err(StoreError::ReadError { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}
