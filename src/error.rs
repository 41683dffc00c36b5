//! Error types shared by every scaffolding step.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error(
        "Directory {} does not exist (creation was declined earlier)",
        .0.display()
    )]
    DeclinedDirectory(PathBuf),

    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("'{0}' was not found on PATH")]
    ToolNotFound(String),

    #[error("`{command}` failed ({reason})")]
    ToolFailed { command: String, reason: String },

    #[error("Word list error: {0}")]
    WordList(String),

    #[error("No title accepted after {0} attempts; pass one with -n")]
    TitleNotAccepted(usize),

    #[error("Invalid project name '{0}': use letters, digits, '.', '_' or '-'")]
    InvalidName(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt failed: {0} (use -y to run without a terminal)")]
    Prompt(String),

    #[error("Interrupted")]
    Interrupted,

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// Wrap an IO error with the path or action it came from.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<inquire::InquireError> for ScaffoldError {
    fn from(e: inquire::InquireError) -> Self {
        match e {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => Self::Interrupted,
            other => Self::Prompt(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupts_map_to_interrupted() {
        let e: ScaffoldError = inquire::InquireError::OperationInterrupted.into();
        assert!(matches!(e, ScaffoldError::Interrupted));
        let e: ScaffoldError = inquire::InquireError::OperationCanceled.into();
        assert!(matches!(e, ScaffoldError::Interrupted));
    }

    #[test]
    fn test_not_tty_suggests_yes_flag() {
        let e: ScaffoldError = inquire::InquireError::NotTTY.into();
        assert!(e.to_string().contains("-y"));
    }
}
