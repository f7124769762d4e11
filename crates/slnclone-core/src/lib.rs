//! # slnclone Core Library
//!
//! Core functionality for cloning sub-projects inside solution manifests.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Solution manifest parsing with exact line ranges for every section
//! - Clone planning: the text insertions that add a copy of a project
//! - Insertion application against the original manifest text
//! - Project tree replication on disk
//!
//! ## Example
//!
//! ```rust,ignore
//! use slnclone_core::prelude::*;
//!
//! let content = std::fs::read_to_string("App.sln")?;
//! let solution = Solution::from_str(&content)?;
//!
//! let plan = plan_clone(&solution, "A5C37F46-8482-4519-94A2-B706DEBD596A", "Beta", &CloneSettings::default())?;
//! let updated = apply_insertions(&content, &plan.insertions);
//! std::fs::write("App.sln", updated)?;
//! ```

pub mod clone;
pub mod edit;
pub mod settings;
pub mod solution;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::clone::{
        plan_clone, replicate_project, source_project_dir, suggest_clone_name, ClonePlan,
        ReplicationReport,
    };
    pub use crate::edit::apply_insertions;
    pub use crate::settings::CloneSettings;
    pub use crate::solution::{
        ConfigurationRow, FolderMapping, Insertion, LineRange, ProjectEntry, Solution,
        SolutionError,
    };
}
