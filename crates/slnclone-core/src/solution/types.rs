//! Value types for a parsed solution manifest

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Container type used by Visual Studio for solution folders
pub const SOLUTION_FOLDER_TYPE: &str = "2150E333-8FDC-42A3-9474-1A3956D46DE8";

/// Inclusive span of lines owned by one parsed section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    /// First line of the section
    pub begin: usize,
    /// Last line of the section
    pub end: usize,
}

impl LineRange {
    /// Create a new range; `end` must not precede `begin`
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(end >= begin, "line range {}..={} is inverted", begin, end);
        Self { begin, end }
    }

    /// Check whether a line index falls inside this range
    pub fn contains(&self, line: usize) -> bool {
        line >= self.begin && line <= self.end
    }

    /// Check whether two ranges share any line
    pub fn overlaps(&self, other: &LineRange) -> bool {
        self.begin <= other.end && other.begin <= self.end
    }
}

/// One `Project(...) = ...` / `EndProject` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Line index of the `EndProject` that closes this block
    pub declaring_line: usize,

    /// Project type identifier from `Project("{...}")`
    pub container_type_guid: String,

    /// Display name
    pub name: String,

    /// Path relative to the solution, using the manifest's own separators
    pub relative_path: String,

    /// The project's own identifier (upper-case, no braces)
    pub identifier_guid: String,
}

impl ProjectEntry {
    /// Solution folders are declared like projects but have no file on disk
    pub fn is_folder(&self) -> bool {
        self.relative_path == self.name
            || self.container_type_guid.eq_ignore_ascii_case(SOLUTION_FOLDER_TYPE)
    }

    /// Extension of the project file (`csproj`, `vcxproj`, ...), if any
    pub fn project_file_extension(&self) -> Option<&str> {
        let file_name = self
            .relative_path
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(&self.relative_path);
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

/// One `{GUID}.<platform>.<key> = <value>` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRow {
    /// Line index in the manifest
    pub line_index: usize,

    /// Leading whitespace, kept verbatim
    pub indentation: String,

    /// Identifier of the project this row belongs to
    pub owner_guid: String,

    /// Configuration and platform, e.g. `Debug|x64`
    pub platform_key: String,

    /// Setting kind, e.g. `ActiveCfg` or `Build.0`
    pub config_key: String,

    /// Right-hand side of the row
    pub value: String,
}

impl ConfigurationRow {
    /// Render this row for another project, without a line terminator
    pub fn render_for(&self, guid: &str) -> String {
        format!(
            "{}{{{}}}.{}.{} = {}",
            self.indentation, guid, self.platform_key, self.config_key, self.value
        )
    }
}

/// Contents of the `NestedProjects` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMapping {
    /// Project identifier -> containing folder identifier
    pub mapping: HashMap<String, String>,

    /// Indentation used when synthesizing new mapping lines
    pub indentation: String,
}

impl FolderMapping {
    /// Identifier of the folder containing a project
    pub fn folder_of(&self, project_guid: &str) -> Option<&str> {
        self.mapping
            .get(&project_guid.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Mapping line placing `new_guid` in the same folder as `old_guid`
    pub fn render_mapping(&self, old_guid: &str, new_guid: &str) -> Option<String> {
        self.folder_of(old_guid)
            .map(|folder| format!("{}{{{}}} = {{{}}}", self.indentation, new_guid, folder))
    }
}

/// Text to insert, as whole lines, before line `line` of the original manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertion {
    /// Target line index in the original text
    pub line: usize,

    /// Complete lines, each with its terminator
    pub text: String,
}

impl Insertion {
    /// Create a new insertion
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}
