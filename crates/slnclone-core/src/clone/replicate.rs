//! Project tree replication
//!
//! Copies a cloned project's directory on disk. The target directory and the
//! placeholder project file are created first; the individual file copies then
//! run concurrently and are joined before the report is returned. A file that
//! fails to copy is recorded and skipped, it never stops its siblings.

use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::ClonePlan;
use crate::solution::{ProjectEntry, SolutionError};

/// Outcome of a replication
#[derive(Debug, Clone, Default)]
pub struct ReplicationReport {
    /// Directory created for the clone
    pub project_dir: PathBuf,

    /// The clone's project file
    pub project_file: PathBuf,

    /// Files written, including the rewritten project file
    pub copied: Vec<PathBuf>,

    /// Files left out because the project file references them
    pub skipped: Vec<PathBuf>,

    /// Files that could not be copied, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl ReplicationReport {
    /// True when every file was copied
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert a manifest path (either separator) into a native relative path
pub fn manifest_path_to_native(path: &str) -> PathBuf {
    path.split(['\\', '/'])
        .filter(|part| !part.is_empty())
        .collect()
}

/// Literal replacements applied to the cloned project file, in order
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    pairs: Vec<(String, String)>,
}

impl Substitutions {
    /// Add a replacement; empty patterns are ignored
    pub fn with(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        let old = old.into();
        if !old.is_empty() {
            self.pairs.push((old, new.into()));
        }
        self
    }

    /// Add a path replacement using each path's display form
    pub fn with_path(self, old: &Path, new: &Path) -> Self {
        self.with(old.display().to_string(), new.display().to_string())
    }

    /// Apply every replacement globally
    pub fn apply(&self, content: &str) -> String {
        self.pairs
            .iter()
            .fold(content.to_string(), |text, (old, new)| text.replace(old, new))
    }
}

/// Absolute locations of a source project on disk
struct SourceLayout {
    base_dir: PathBuf,
    project_file: PathBuf,
    project_dir: PathBuf,
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, SolutionError> {
    // `Path::new("App.sln").parent()` is the empty path
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    std::path::absolute(dir).map_err(|e| SolutionError::filesystem(dir, e))
}

fn resolve_source(
    base_dir: &Path,
    source: &ProjectEntry,
) -> Result<SourceLayout, SolutionError> {
    let base_dir = absolute_dir(base_dir)?;
    let project_file = base_dir.join(manifest_path_to_native(&source.relative_path));
    let project_dir = project_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| base_dir.clone());

    if !project_dir.is_dir() {
        return Err(SolutionError::filesystem(
            &project_dir,
            "source project directory does not exist",
        ));
    }

    Ok(SourceLayout {
        base_dir,
        project_file,
        project_dir,
    })
}

/// Absolute directory holding `source`'s project file
///
/// Fails with [`SolutionError::FilesystemUnavailable`] when the directory is
/// missing, the same check [`replicate_project`] starts with.
pub fn source_project_dir(
    base_dir: &Path,
    source: &ProjectEntry,
) -> Result<PathBuf, SolutionError> {
    resolve_source(base_dir, source).map(|layout| layout.project_dir)
}

fn is_solution_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sln"))
}

/// Replicate `source`'s project directory for the clone described by `plan`
///
/// `base_dir` is the directory the manifest's relative paths resolve against;
/// it may be relative to the working directory. A project that sits next to
/// the manifest only has its own files copied: subdirectories and solution
/// files at that level belong to the solution.
pub async fn replicate_project(
    base_dir: &Path,
    source: &ProjectEntry,
    plan: &ClonePlan,
) -> Result<ReplicationReport, SolutionError> {
    let SourceLayout {
        base_dir,
        project_file: source_file,
        project_dir: source_dir,
    } = resolve_source(base_dir, source)?;
    let at_root = source_dir == base_dir;

    let new_dir = base_dir.join(&plan.new_name);
    let new_file = base_dir.join(manifest_path_to_native(&plan.new_relative_path));

    tokio::fs::create_dir_all(&new_dir)
        .await
        .map_err(|e| SolutionError::filesystem(&new_dir, e))?;
    if let Some(parent) = new_file.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| SolutionError::filesystem(parent, e))?;
    }
    tokio::fs::File::create(&new_file)
        .await
        .map_err(|e| SolutionError::filesystem(&new_file, e))?;

    let mut report = ReplicationReport {
        project_dir: new_dir.clone(),
        project_file: new_file.clone(),
        ..Default::default()
    };

    let project_content = match tokio::fs::read_to_string(&source_file).await {
        Ok(content) => Some(content),
        Err(e) => {
            warn!("can't read project file {}: {}", source_file.display(), e);
            report.failed.push((source_file.clone(), e.to_string()));
            None
        }
    };

    let mut copies = JoinSet::new();

    let walk = WalkDir::new(&source_dir);
    let walk = if at_root { walk.max_depth(1) } else { walk };

    for entry in walk
        .into_iter()
        .filter_entry(|e| !e.path().starts_with(&new_dir))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || path == source_file {
            continue;
        }
        if at_root && is_solution_file(path) {
            debug!("skipping {}: solution file", path.display());
            continue;
        }

        // Files the project file names by absolute path are left out
        if let Some(content) = &project_content {
            if content.contains(&path.display().to_string()) {
                debug!("skipping {}: referenced by the project file", path.display());
                report.skipped.push(path.to_path_buf());
                continue;
            }
        }

        let relative = path.strip_prefix(&source_dir).unwrap_or(path);
        let from = path.to_path_buf();
        let to = new_dir.join(relative);
        copies.spawn(async move {
            let result = copy_file(&from, &to).await;
            (from, to, result)
        });
    }

    if let Some(content) = &project_content {
        let substitutions = Substitutions::default()
            .with(source.identifier_guid.as_str(), plan.new_guid.as_str())
            .with(
                source.identifier_guid.to_ascii_lowercase(),
                plan.new_guid.to_ascii_lowercase(),
            )
            .with_path(&source_file, &new_file)
            .with_path(&source_dir, &new_dir)
            .with(source.name.as_str(), plan.new_name.as_str());
        match tokio::fs::write(&new_file, substitutions.apply(content)).await {
            Ok(()) => report.copied.push(new_file.clone()),
            Err(e) => {
                warn!("can't write project file {}: {}", new_file.display(), e);
                report.failed.push((new_file.clone(), e.to_string()));
            }
        }
    }

    while let Some(joined) = copies.join_next().await {
        match joined {
            Ok((_, to, Ok(()))) => report.copied.push(to),
            Ok((from, _, Err(e))) => {
                warn!("can't copy {}: {}", from.display(), e);
                report.failed.push((from, e.to_string()));
            }
            Err(e) => warn!("copy task failed: {}", e),
        }
    }

    info!(
        "replicated {} into {}: {} copied, {} skipped, {} failed",
        source_dir.display(),
        new_dir.display(),
        report.copied.len(),
        report.skipped.len(),
        report.failed.len()
    );

    Ok(report)
}

async fn copy_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if let Some(parent) = to.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::copy(from, to).await?;
    Ok(())
}
