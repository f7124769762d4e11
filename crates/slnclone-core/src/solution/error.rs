//! Error types for solution parsing and project cloning

use thiserror::Error;

/// Errors that can occur while parsing a solution or cloning a project
#[derive(Error, Debug)]
pub enum SolutionError {
    /// Mandatory section missing or malformed project list
    #[error("Couldn't parse solution file: {0}")]
    Unparsable(String),

    /// No project with this identifier
    #[error("Can't clone project {{{guid}}}: no such project in the solution")]
    ProjectNotFound {
        /// Identifier that was requested
        guid: String,
    },

    /// The project has no configuration rows to copy
    #[error("Can't clone project {{{guid}}}: it has no configuration rows")]
    NoConfigurationForProject {
        /// Identifier of the project
        guid: String,
    },

    /// The source project directory is missing or a target can't be created
    #[error("Can't replicate project tree: '{path}' is unavailable ({message})")]
    FilesystemUnavailable {
        /// Path that was unavailable
        path: String,
        /// Underlying reason
        message: String,
    },

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(String),

    /// The settings file couldn't be read or written
    #[error("Settings error: {0}")]
    Settings(String),
}

impl SolutionError {
    pub(crate) fn unparsable(message: impl Into<String>) -> Self {
        Self::Unparsable(message.into())
    }

    pub(crate) fn filesystem(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::FilesystemUnavailable {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for SolutionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
