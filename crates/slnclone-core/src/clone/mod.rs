//! Project Cloning
//!
//! A clone adds three things to a solution manifest:
//! ```text
//! Project("{type}") = "New", "New\New.csproj", "{NEW-GUID}"   after the source's EndProject
//! EndProject
//! {NEW-GUID}.Debug|x64.ActiveCfg = Debug|x64                  after the last configuration row
//! {NEW-GUID} = {FOLDER-GUID}                                  before NestedProjects' EndGlobalSection
//! ```
//! and can optionally replicate the source project's directory on disk.

mod planner;
mod replicate;

pub use planner::{clone_relative_path, plan_clone, suggest_clone_name, ClonePlan};
pub use replicate::{
    manifest_path_to_native, replicate_project, source_project_dir, ReplicationReport,
    Substitutions,
};
