//! Platform path resolution for picker files.
//!
//! ```text
//! ~/.config/routine-picker/
//! └── picker.toml          # Client configuration
//!
//! ~/.local/share/routine-picker/
//! └── store.json           # Key-value slots (selection)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "routine-picker";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct PickerPaths;

impl PickerPaths {
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Directory for persisted state such as the selection store.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("picker.toml"))
    }

    pub fn store_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("store.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = PickerPaths::config_file().unwrap();
        assert!(config_file.ends_with("routine-picker/picker.toml"));
        assert!(config_file.starts_with(PickerPaths::config_dir().unwrap()));
    }

    #[test]
    fn test_store_file() {
        let store_file = PickerPaths::store_file().unwrap();
        assert!(store_file.ends_with("store.json"));
        assert!(store_file.starts_with(PickerPaths::data_dir().unwrap()));
    }
}
