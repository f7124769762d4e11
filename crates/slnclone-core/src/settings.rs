//! Clone settings stored in settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::solution::SolutionError;

/// Settings that shape the text and files a clone produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneSettings {
    /// Project file extension used when the source path has none
    pub project_file_extension: String,

    /// Separator used in paths written into the manifest
    pub path_separator: char,

    /// Replicate the project directory after editing the manifest
    pub copy_project_tree: bool,
}

impl Default for CloneSettings {
    fn default() -> Self {
        Self {
            project_file_extension: "csproj".to_string(),
            path_separator: '\\',
            copy_project_tree: false,
        }
    }
}

impl CloneSettings {
    /// Default settings location: `<config dir>/slnclone/settings.json`
    pub fn default_path() -> io::Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?;
        Ok(base.join("slnclone").join("settings.json"))
    }

    /// Load settings; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, SolutionError> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                SolutionError::Settings(format!("{}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save settings, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<(), SolutionError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SolutionError::Settings(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }
}
