//! Command implementations

use anyhow::{bail, Context, Result};
use slnclone_core::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Arguments of the `clone` command
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    pub guid: String,
    pub name: Option<String>,
    pub dry_run: bool,
    pub copy_files: bool,
    pub extension: Option<String>,
    pub config: Option<PathBuf>,
}

/// Project names end up as directory and file names; no whitespace allowed
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("project name cannot be empty");
    }
    if name.chars().any(char::is_whitespace) {
        bail!("project name cannot include spaces: '{}'", name);
    }
    Ok(())
}

fn load_settings(options: &CloneOptions) -> Result<CloneSettings> {
    let path = match &options.config {
        Some(path) => Some(path.clone()),
        None => CloneSettings::default_path().ok(),
    };

    let mut settings = match path {
        Some(path) => CloneSettings::load(&path)?,
        None => CloneSettings::default(),
    };

    if let Some(ext) = &options.extension {
        settings.project_file_extension = ext.trim_start_matches('.').to_string();
    }
    if options.copy_files {
        settings.copy_project_tree = true;
    }
    Ok(settings)
}

/// Directory the solution's relative project paths resolve against
fn solution_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn read_solution(path: &Path) -> Result<(String, Solution)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("can't read solution {}", path.display()))?;
    let solution = Solution::from_str(&content)
        .with_context(|| format!("can't parse solution {}", path.display()))?;
    Ok((content, solution))
}

/// List the projects of a solution
pub fn list(path: &Path, all: bool, json: bool) -> Result<()> {
    let (_, solution) = read_solution(path)?;
    let projects: Vec<&ProjectEntry> = solution
        .projects
        .iter()
        .filter(|p| all || !p.is_folder())
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    for project in projects {
        println!(
            "{:<30} {{{}}}  {}",
            project.name, project.identifier_guid, project.relative_path
        );
    }
    Ok(())
}

/// Clone a project, write the solution back, optionally copy its directory
pub async fn clone(path: &Path, options: &CloneOptions) -> Result<()> {
    let settings = load_settings(options)?;
    let (content, solution) = read_solution(path)?;

    let name = match &options.name {
        Some(name) => name.clone(),
        None => match solution.project(&options.guid) {
            Some(source) => suggest_clone_name(&source.name),
            None => bail!(SolutionError::ProjectNotFound {
                guid: options.guid.clone()
            }),
        },
    };
    validate_project_name(&name)?;

    let plan = plan_clone(&solution, &options.guid, &name, &settings)
        .with_context(|| format!("can't clone project in {}", path.display()))?;

    if options.dry_run {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    // Check the source tree before touching the manifest
    let base_dir = solution_dir(path);
    let source = solution
        .project(&plan.source_guid)
        .context("source project disappeared from the parsed solution")?;
    if settings.copy_project_tree {
        source_project_dir(base_dir, source).context("can't copy project files")?;
    }

    let updated = apply_insertions(&content, &plan.insertions);
    fs::write(path, updated)
        .with_context(|| format!("can't write solution {}", path.display()))?;
    info!("added '{}' {{{}}} to {}", name, plan.new_guid, path.display());
    println!("Cloned as '{}' {{{}}}", name, plan.new_guid);

    if settings.copy_project_tree {
        let report = replicate_project(base_dir, source, &plan)
            .await
            .with_context(|| {
                format!(
                    "{} was updated but the project files could not be copied",
                    path.display()
                )
            })?;
        for (file, reason) in &report.failed {
            warn!("not copied: {} ({})", file.display(), reason);
        }
        println!(
            "Copied {} files into {} ({} skipped, {} failed)",
            report.copied.len(),
            report.project_dir.display(),
            report.skipped.len(),
            report.failed.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SOLUTION: &str = "\
Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"Alpha\", \"Alpha\\Alpha.csproj\", \"{AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA}\"
EndProject
Global
\tGlobalSection(ProjectConfigurationPlatforms) = postSolution
\t\t{AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA}.Debug|x64.ActiveCfg = Debug|x64
\tEndGlobalSection
EndGlobal
";

    fn setup() -> (TempDir, PathBuf, CloneOptions) {
        let dir = TempDir::new().unwrap();
        let sln = dir.path().join("App.sln");
        fs::write(&sln, SOLUTION).unwrap();
        fs::create_dir_all(dir.path().join("Alpha")).unwrap();
        fs::write(dir.path().join("Alpha").join("Alpha.csproj"), "<Project />\n").unwrap();

        let options = CloneOptions {
            guid: "AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA".to_string(),
            config: Some(dir.path().join("settings.json")),
            ..Default::default()
        };
        (dir, sln, options)
    }

    #[test]
    fn test_validate_project_name() {
        assert!(validate_project_name("Alpha-copy").is_ok());
        assert!(validate_project_name("Alpha copy").is_err());
        assert!(validate_project_name("Alpha\tcopy").is_err());
        assert!(validate_project_name("").is_err());
    }

    #[tokio::test]
    async fn test_clone_writes_solution() {
        let (dir, sln, options) = setup();

        clone(&sln, &options).await.unwrap();

        let solution = Solution::from_file(&sln).unwrap();
        assert_eq!(solution.projects.len(), 2);
        assert_eq!(solution.projects[1].name, "Alpha-copy");
        assert!(!dir.path().join("Alpha-copy").exists());
    }

    #[tokio::test]
    async fn test_clone_dry_run_leaves_file() {
        let (_dir, sln, mut options) = setup();
        options.dry_run = true;
        options.name = Some("Beta".to_string());

        clone(&sln, &options).await.unwrap();
        assert_eq!(fs::read_to_string(&sln).unwrap(), SOLUTION);
    }

    #[tokio::test]
    async fn test_clone_with_files() {
        let (dir, sln, mut options) = setup();
        options.name = Some("Beta".to_string());
        options.copy_files = true;

        clone(&sln, &options).await.unwrap();
        assert!(dir.path().join("Beta").join("Beta.csproj").is_file());
    }

    #[test]
    fn test_solution_dir() {
        assert_eq!(solution_dir(Path::new("App.sln")), Path::new("."));
        assert_eq!(solution_dir(Path::new("src/App.sln")), Path::new("src"));
    }

    // The only test that changes the working directory
    #[tokio::test]
    async fn test_clone_bare_solution_name_with_root_project() {
        let dir = TempDir::new().unwrap();
        let root_level = SOLUTION.replace("Alpha\\Alpha.csproj", "Alpha.csproj");
        fs::write(dir.path().join("App.sln"), &root_level).unwrap();
        fs::write(dir.path().join("Alpha.csproj"), "<Project>Alpha</Project>\n").unwrap();
        fs::write(dir.path().join("Program.cs"), "class Program {}\n").unwrap();
        fs::create_dir_all(dir.path().join("Other")).unwrap();
        fs::write(dir.path().join("Other").join("Other.csproj"), "<Project />\n").unwrap();

        let options = CloneOptions {
            guid: "AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA".to_string(),
            name: Some("Beta".to_string()),
            copy_files: true,
            config: Some(dir.path().join("settings.json")),
            ..Default::default()
        };

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let result = clone(Path::new("App.sln"), &options).await;
        std::env::set_current_dir(previous).unwrap();
        result.unwrap();

        let beta = dir.path().join("Beta");
        assert_eq!(
            fs::read_to_string(beta.join("Beta.csproj")).unwrap(),
            "<Project>Beta</Project>\n"
        );
        assert!(beta.join("Program.cs").is_file());
        assert!(!beta.join("App.sln").exists());
        assert!(!beta.join("Other").exists());

        let solution = Solution::from_file(dir.path().join("App.sln")).unwrap();
        assert_eq!(solution.projects[1].relative_path, "Beta\\Beta.csproj");
    }

    #[tokio::test]
    async fn test_clone_missing_source_dir_keeps_solution() {
        let (dir, sln, mut options) = setup();
        fs::remove_dir_all(dir.path().join("Alpha")).unwrap();
        options.name = Some("Beta".to_string());
        options.copy_files = true;

        assert!(clone(&sln, &options).await.is_err());
        assert_eq!(fs::read_to_string(&sln).unwrap(), SOLUTION);
        assert!(!dir.path().join("Beta").exists());
    }

    #[tokio::test]
    async fn test_clone_rejects_spaces() {
        let (_dir, sln, mut options) = setup();
        options.name = Some("Not Valid".to_string());

        assert!(clone(&sln, &options).await.is_err());
        assert_eq!(fs::read_to_string(&sln).unwrap(), SOLUTION);
    }

    #[tokio::test]
    async fn test_clone_unknown_project() {
        let (_dir, sln, mut options) = setup();
        options.guid = "12345678-1234-1234-1234-123456789ABC".to_string();

        let err = clone(&sln, &options).await.unwrap_err();
        assert!(err.to_string().contains("12345678-1234-1234-1234-123456789ABC"));
    }

    #[test]
    fn test_extension_override() {
        let options = CloneOptions {
            extension: Some(".vbproj".to_string()),
            config: Some(PathBuf::from("/nonexistent/settings.json")),
            ..Default::default()
        };
        assert_eq!(load_settings(&options).unwrap().project_file_extension, "vbproj");
    }
}
