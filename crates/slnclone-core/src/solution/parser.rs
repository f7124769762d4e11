//! Manifest parser
//!
//! Single forward pass over the manifest lines, handing each unclaimed line
//! to the section extractors in a fixed order.

use std::collections::HashSet;
use tracing::debug;

use super::{
    scanner::{self, ConfigurationMap, Section, SectionKind},
    types::{FolderMapping, LineRange, ProjectEntry},
    Solution, SolutionError,
};

#[derive(Default)]
struct ParserState {
    projects: Option<(LineRange, Vec<ProjectEntry>)>,
    configurations: Option<(LineRange, ConfigurationMap)>,
    folders: Option<(LineRange, FolderMapping)>,
}

impl ParserState {
    fn found(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Projects => self.projects.is_some(),
            SectionKind::Configurations => self.configurations.is_some(),
            SectionKind::Folders => self.folders.is_some(),
        }
    }

    fn store(&mut self, range: LineRange, section: Section) {
        match section {
            Section::Projects(p) => self.projects = Some((range, p)),
            Section::Configurations(c) => self.configurations = Some((range, c)),
            Section::Folders(f) => self.folders = Some((range, f)),
        }
    }
}

/// Split manifest text into lines, keeping indices aligned with `\n`
///
/// A trailing `\r` is dropped from each line for matching purposes.
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Line terminator used by the manifest
pub fn detect_line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Parse a complete manifest into a [`Solution`]
pub fn parse_solution(content: &str) -> Result<Solution, SolutionError> {
    let lines = split_lines(content);
    let mut state = ParserState::default();
    let mut i = 0;

    'lines: while i < lines.len() {
        if scanner::is_comment(lines[i]) {
            i += 1;
            continue;
        }

        for kind in SectionKind::ALL {
            if state.found(kind) {
                continue;
            }
            if let Some((range, section)) = scanner::try_extract(kind, &lines, i)? {
                debug!(
                    "found {:?} section at lines {}..={}",
                    kind, range.begin, range.end
                );
                state.store(range, section);
                i = range.end + 1;
                continue 'lines;
            }
        }

        i += 1;
    }

    let Some((projects_section, projects)) = state.projects else {
        return Err(SolutionError::unparsable("no project declarations found"));
    };
    let Some((configurations_section, configurations)) = state.configurations else {
        return Err(SolutionError::unparsable(
            "missing GlobalSection(ProjectConfigurationPlatforms)",
        ));
    };

    let mut seen = HashSet::new();
    for project in &projects {
        if !seen.insert(project.identifier_guid.as_str()) {
            return Err(SolutionError::unparsable(format!(
                "project identifier {{{}}} is declared more than once",
                project.identifier_guid
            )));
        }
    }

    let (folders_section, folders) = match state.folders {
        Some((range, folders)) => (Some(range), Some(folders)),
        None => (None, None),
    };

    debug!(
        "parsed solution: {} projects, {} configured, folders: {}",
        projects.len(),
        configurations.len(),
        folders.is_some()
    );

    Ok(Solution {
        projects,
        projects_section,
        configurations,
        configurations_section,
        folders,
        folders_section,
        line_ending: detect_line_ending(content).to_string(),
        line_count: lines.len(),
    })
}
