//! Solution Manifest Parser
//!
//! Parses line-oriented solution manifests. Three sections are recognized:
//! - The project list (`Project(...)` / `EndProject` blocks)
//! - `GlobalSection(ProjectConfigurationPlatforms)`
//! - `GlobalSection(NestedProjects)` (optional)
//!
//! Every section records the exact lines it occupies so that edits can be
//! expressed as insertions at line offsets of the original text.

mod error;
pub mod guid;
mod parser;
pub mod scanner;
mod types;

pub use error::SolutionError;
pub use parser::{detect_line_ending, split_lines};
pub use types::*;

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// A parsed solution manifest
///
/// Built once per parse and never modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Declared projects, in source order
    pub projects: Vec<ProjectEntry>,

    /// Lines occupied by the project list
    pub projects_section: LineRange,

    /// Configuration rows grouped by project identifier
    pub configurations: HashMap<String, Vec<ConfigurationRow>>,

    /// Lines occupied by `ProjectConfigurationPlatforms`
    pub configurations_section: LineRange,

    /// Folder membership, if the manifest has a `NestedProjects` section
    pub folders: Option<FolderMapping>,

    /// Lines occupied by `NestedProjects`
    pub folders_section: Option<LineRange>,

    /// Line terminator used by the manifest (`\n` or `\r\n`)
    pub line_ending: String,

    /// Number of lines the manifest was split into
    pub line_count: usize,
}

impl Solution {
    /// Parse a solution from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SolutionError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse a solution from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SolutionError> {
        parser::parse_solution(content)
    }

    /// Find a project by identifier (braces and case are ignored)
    pub fn project(&self, guid: &str) -> Option<&ProjectEntry> {
        let guid = guid::normalize(guid);
        self.projects.iter().find(|p| p.identifier_guid == guid)
    }

    /// Configuration rows owned by a project
    pub fn configurations(&self, guid: &str) -> Option<&[ConfigurationRow]> {
        self.configurations
            .get(&guid::normalize(guid))
            .map(Vec::as_slice)
    }

    /// Identifier of the folder containing a project
    pub fn folder_of(&self, guid: &str) -> Option<&str> {
        self.folders.as_ref()?.folder_of(&guid::normalize(guid))
    }

    /// Projects that exist on disk, i.e. everything except solution folders
    pub fn buildable_projects(&self) -> impl Iterator<Item = &ProjectEntry> {
        self.projects.iter().filter(|p| !p.is_folder())
    }

    /// Every identifier the manifest uses: projects, configuration owners, folders
    pub fn known_guids(&self) -> Vec<&str> {
        let mut guids: Vec<&str> = self
            .projects
            .iter()
            .map(|p| p.identifier_guid.as_str())
            .chain(self.configurations.keys().map(String::as_str))
            .collect();
        if let Some(folders) = &self.folders {
            guids.extend(folders.mapping.values().map(String::as_str));
        }
        guids.sort_unstable();
        guids.dedup();
        guids
    }
}
