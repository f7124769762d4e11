//! Clone planning
//!
//! Computes the manifest insertions that add a copy of an existing project.
//! Nothing is applied here; the result is plain data.

use serde::Serialize;
use tracing::info;

use crate::settings::CloneSettings;
use crate::solution::{guid, Insertion, ProjectEntry, Solution, SolutionError};

/// Everything a clone adds to the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClonePlan {
    /// Identifier of the project being cloned
    pub source_guid: String,

    /// Freshly generated identifier of the clone
    pub new_guid: String,

    /// Name of the clone
    pub new_name: String,

    /// Manifest path of the clone's project file
    pub new_relative_path: String,

    /// Insertions in order: project block, configuration rows, folder mapping
    pub insertions: Vec<Insertion>,
}

/// Default name offered for a clone
pub fn suggest_clone_name(name: &str) -> String {
    format!("{}-copy", name)
}

/// Manifest path for a cloned project: `<name><sep><name>.<ext>`
pub fn clone_relative_path(
    source: &ProjectEntry,
    new_name: &str,
    settings: &CloneSettings,
) -> String {
    let extension = source
        .project_file_extension()
        .unwrap_or(settings.project_file_extension.as_str());
    format!(
        "{}{}{}.{}",
        new_name, settings.path_separator, new_name, extension
    )
}

/// Plan the insertions that clone `source_guid` as `new_name`
///
/// Name collisions are not checked; only the identifier is guaranteed unique.
pub fn plan_clone(
    solution: &Solution,
    source_guid: &str,
    new_name: &str,
    settings: &CloneSettings,
) -> Result<ClonePlan, SolutionError> {
    let source_guid = guid::normalize(source_guid);

    let project = solution
        .project(&source_guid)
        .ok_or_else(|| SolutionError::ProjectNotFound {
            guid: source_guid.clone(),
        })?;

    let rows = solution
        .configurations(&source_guid)
        .filter(|rows| !rows.is_empty())
        .ok_or_else(|| SolutionError::NoConfigurationForProject {
            guid: source_guid.clone(),
        })?;

    let new_guid = guid::new_guid(solution.known_guids());
    let new_relative_path = clone_relative_path(project, new_name, settings);
    let eol = solution.line_ending.as_str();

    let mut insertions = Vec::with_capacity(rows.len() + 2);

    insertions.push(Insertion::new(
        project.declaring_line + 1,
        format!(
            "Project(\"{{{}}}\") = \"{}\", \"{}\", \"{{{}}}\"{eol}EndProject{eol}",
            project.container_type_guid, new_name, new_relative_path, new_guid
        ),
    ));

    // Rows go right after the source's last row
    let after_rows = rows.iter().map(|r| r.line_index).max().unwrap_or(0) + 1;
    insertions.extend(
        rows.iter()
            .map(|row| Insertion::new(after_rows, format!("{}{eol}", row.render_for(&new_guid)))),
    );

    if let (Some(folders), Some(section)) = (&solution.folders, solution.folders_section) {
        if let Some(mapping) = folders.render_mapping(&source_guid, &new_guid) {
            insertions.push(Insertion::new(section.end, format!("{}{eol}", mapping)));
        }
    }

    info!(
        "planned clone of '{}' {{{}}} as '{}' {{{}}}: {} insertions",
        project.name,
        source_guid,
        new_name,
        new_guid,
        insertions.len()
    );

    Ok(ClonePlan {
        source_guid,
        new_guid,
        new_name: new_name.to_string(),
        new_relative_path,
        insertions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> ProjectEntry {
        ProjectEntry {
            declaring_line: 3,
            container_type_guid: "8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942".to_string(),
            name: "Native".to_string(),
            relative_path: path.to_string(),
            identifier_guid: "AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA".to_string(),
        }
    }

    #[test]
    fn test_relative_path_reuses_source_extension() {
        let settings = CloneSettings::default();
        assert_eq!(
            clone_relative_path(&entry("Native\\Native.vcxproj"), "Other", &settings),
            "Other\\Other.vcxproj"
        );
    }

    #[test]
    fn test_relative_path_falls_back_to_settings() {
        let settings = CloneSettings {
            project_file_extension: "fsproj".to_string(),
            path_separator: '/',
            ..Default::default()
        };
        assert_eq!(
            clone_relative_path(&entry("Native/Makefile"), "Other", &settings),
            "Other/Other.fsproj"
        );
    }

    #[test]
    fn test_suggest_clone_name() {
        assert_eq!(suggest_clone_name("Alpha"), "Alpha-copy");
    }
}
