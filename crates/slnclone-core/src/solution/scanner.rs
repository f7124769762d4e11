//! Section extractors
//!
//! Each extractor looks at a candidate start line and either claims the
//! section that begins there or reports that it is not its kind. Extractors
//! never mutate anything, so the parser can try them speculatively at every
//! line.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::{
    guid,
    types::{ConfigurationRow, FolderMapping, LineRange, ProjectEntry},
    SolutionError,
};

// Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "Lib", "Lib\Lib.csproj", "{A5C37F46-8482-4519-94A2-B706DEBD596A}"
static PROJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*Project\s*\(\s*"\{([^"]+)\}"\s*\)\s*=\s*"([^"]+)"\s*,\s*"([^"]+)"\s*,\s*"\{([^\}]+)\}""#,
    )
    .expect("project declaration pattern")
});

static END_PROJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*EndProject\s*$").expect("project terminator pattern"));

static CONFIG_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*GlobalSection\(ProjectConfigurationPlatforms\)\s*=\s*postSolution")
        .expect("configuration section pattern")
});

// {FB4CFB33-2D1C-498B-AEF8-4E5E6562D792}.Debug|x64.ActiveCfg = Debug|x64
static CONFIG_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)\{([^\}]+)\}\.([^.]+)\.(\S+)\s*=\s*(.+)").expect("configuration row pattern")
});

static FOLDERS_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*GlobalSection\(NestedProjects\)\s*=\s*preSolution")
        .expect("nested projects section pattern")
});

// {<project-guid>} = {<folder-guid>}
static FOLDER_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)\{([^\}]+)\}\s*=\s*\{([^\}]+)\}").expect("folder row pattern")
});

static END_SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*EndGlobalSection").expect("section terminator pattern"));

/// Configuration rows grouped by owning project, in source order
pub type ConfigurationMap = HashMap<String, Vec<ConfigurationRow>>;

/// The section kinds the parser recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Consecutive `Project(...)` declarations
    Projects,
    /// `GlobalSection(ProjectConfigurationPlatforms)`
    Configurations,
    /// `GlobalSection(NestedProjects)`
    Folders,
}

impl SectionKind {
    /// Order in which the parser tries extractors at each line
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Projects,
        SectionKind::Configurations,
        SectionKind::Folders,
    ];
}

/// A successfully extracted section
#[derive(Debug, Clone)]
pub enum Section {
    /// Declared projects in source order
    Projects(Vec<ProjectEntry>),
    /// Configuration rows by owning project
    Configurations(ConfigurationMap),
    /// Project to folder assignments
    Folders(FolderMapping),
}

/// Try the extractor for `kind` at line `begin`
pub fn try_extract(
    kind: SectionKind,
    lines: &[&str],
    begin: usize,
) -> Result<Option<(LineRange, Section)>, SolutionError> {
    Ok(match kind {
        SectionKind::Projects => {
            extract_projects(lines, begin)?.map(|(r, p)| (r, Section::Projects(p)))
        }
        SectionKind::Configurations => {
            extract_configurations(lines, begin).map(|(r, c)| (r, Section::Configurations(c)))
        }
        SectionKind::Folders => {
            extract_folders(lines, begin).map(|(r, f)| (r, Section::Folders(f)))
        }
    })
}

struct OpenDeclaration {
    line: usize,
    container_type_guid: String,
    name: String,
    relative_path: String,
    identifier_guid: String,
}

/// Extract the project list starting at `begin`
///
/// Scans to the end of input. The range ends at the last `EndProject` seen.
/// A declaration opened while another is still open, or left open at end of
/// input, makes the whole manifest unparsable.
pub fn extract_projects(
    lines: &[&str],
    begin: usize,
) -> Result<Option<(LineRange, Vec<ProjectEntry>)>, SolutionError> {
    let mut projects = Vec::new();
    let mut open: Option<OpenDeclaration> = None;
    let mut last_end: Option<usize> = None;

    for (i, line) in lines.iter().enumerate().skip(begin) {
        if let Some(caps) = PROJECT_RE.captures(line) {
            if let Some(previous) = &open {
                return Err(SolutionError::unparsable(format!(
                    "project declared at line {} before the project at line {} was terminated",
                    i + 1,
                    previous.line + 1
                )));
            }
            open = Some(OpenDeclaration {
                line: i,
                container_type_guid: guid::normalize(&caps[1]),
                name: caps[2].to_string(),
                relative_path: caps[3].to_string(),
                identifier_guid: guid::normalize(&caps[4]),
            });
        } else if i == begin {
            return Ok(None);
        } else if END_PROJECT_RE.is_match(line) {
            // A stray EndProject with nothing open is ignored
            if let Some(decl) = open.take() {
                projects.push(ProjectEntry {
                    declaring_line: i,
                    container_type_guid: decl.container_type_guid,
                    name: decl.name,
                    relative_path: decl.relative_path,
                    identifier_guid: decl.identifier_guid,
                });
                last_end = Some(i);
            }
        }
    }

    if let Some(decl) = open {
        return Err(SolutionError::unparsable(format!(
            "project '{}' declared at line {} has no EndProject",
            decl.name,
            decl.line + 1
        )));
    }

    Ok(last_end.map(|end| (LineRange::new(begin, end), projects)))
}

/// Index of the `EndGlobalSection` closing a section opened at `begin`
///
/// An unterminated section runs to the last line.
fn section_end(lines: &[&str], begin: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(begin + 1)
        .find(|(_, line)| END_SECTION_RE.is_match(line))
        .map(|(i, _)| i)
        .unwrap_or_else(|| lines.len().saturating_sub(1).max(begin))
}

/// Extract the `ProjectConfigurationPlatforms` section starting at `begin`
pub fn extract_configurations(
    lines: &[&str],
    begin: usize,
) -> Option<(LineRange, ConfigurationMap)> {
    if !CONFIG_OPEN_RE.is_match(lines.get(begin)?) {
        return None;
    }

    let end = section_end(lines, begin);
    let mut configs: ConfigurationMap = HashMap::new();

    for (i, line) in lines.iter().enumerate().take(end + 1).skip(begin + 1) {
        let Some(caps) = CONFIG_ROW_RE.captures(line) else {
            continue;
        };

        let owner = guid::normalize(&caps[2]);
        configs
            .entry(owner.clone())
            .or_default()
            .push(ConfigurationRow {
                line_index: i,
                indentation: caps[1].to_string(),
                owner_guid: owner,
                platform_key: caps[3].to_string(),
                config_key: caps[4].to_string(),
                value: caps[5].trim_end().to_string(),
            });
    }

    Some((LineRange::new(begin, end), configs))
}

/// Extract the `NestedProjects` section starting at `begin`
pub fn extract_folders(lines: &[&str], begin: usize) -> Option<(LineRange, FolderMapping)> {
    if !FOLDERS_OPEN_RE.is_match(lines.get(begin)?) {
        return None;
    }

    let end = section_end(lines, begin);
    let mut folders = FolderMapping::default();
    let mut indentation: Option<String> = None;

    for line in lines.iter().take(end + 1).skip(begin + 1) {
        let Some(caps) = FOLDER_ROW_RE.captures(line) else {
            continue;
        };

        indentation.get_or_insert_with(|| caps[1].to_string());
        folders
            .mapping
            .insert(guid::normalize(&caps[2]), guid::normalize(&caps[3]));
    }

    folders.indentation = indentation.unwrap_or_default();
    Some((LineRange::new(begin, end), folders))
}

/// Whether a line is a `#` comment
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
