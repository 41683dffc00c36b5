//! Directory preparation with confirmation before anything is created.

use crate::error::{Result, ScaffoldError};
use crate::prompt::Confirmer;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Existed,
    Created,
    /// The operator said no; nothing was created.
    Declined,
}

pub struct Preparer<'a> {
    confirmer: &'a mut dyn Confirmer,
    declined: Vec<PathBuf>,
}

impl<'a> Preparer<'a> {
    pub fn new(confirmer: &'a mut dyn Confirmer) -> Self {
        Self {
            confirmer,
            declined: Vec::new(),
        }
    }

    /// Create `path` (and parents) after confirmation. Existing dirs are a no-op.
    pub fn ensure_directory(&mut self, path: &Path) -> Result<DirStatus> {
        if path.is_dir() {
            return Ok(DirStatus::Existed);
        }
        let shown = display_path(path);
        if !self.confirmer.confirm(&format!("Create: {}?", shown))? {
            println!("{} Skipped creating {}", "!".yellow(), shown);
            self.declined.push(path.to_path_buf());
            return Ok(DirStatus::Declined);
        }
        println!("{} Creating location: {}", "+".green(), shown);
        fs::create_dir_all(path)
            .map_err(|e| ScaffoldError::io(format!("Failed to create {}", shown), e))?;
        Ok(DirStatus::Created)
    }

    /// Fail if `path` is missing, naming an earlier refusal when there was one.
    pub fn require_directory(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        if self.declined.iter().any(|d| path.starts_with(d)) {
            Err(ScaffoldError::DeclinedDirectory(path.to_path_buf()))
        } else {
            Err(ScaffoldError::MissingDirectory(path.to_path_buf()))
        }
    }
}

fn display_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{ConfirmPolicy, ScriptedConfirmer};

    #[test]
    fn test_existing_directory_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut confirmer = ScriptedConfirmer::new(&[], false);
        let mut prep = Preparer::new(&mut confirmer);
        assert_eq!(prep.ensure_directory(dir.path()).unwrap(), DirStatus::Existed);
        assert_eq!(prep.ensure_directory(dir.path()).unwrap(), DirStatus::Existed);
        drop(prep);
        assert!(confirmer.asked.is_empty());
    }

    #[test]
    fn test_accepted_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b");
        let mut policy = ConfirmPolicy::AutoAccept;
        let mut prep = Preparer::new(&mut policy);
        assert_eq!(prep.ensure_directory(&target).unwrap(), DirStatus::Created);
        assert!(target.is_dir());
        prep.require_directory(&target).unwrap();
    }

    #[test]
    fn test_declined_is_reported_later() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("projects");
        let mut policy = ConfirmPolicy::AutoReject;
        let mut prep = Preparer::new(&mut policy);
        assert_eq!(prep.ensure_directory(&target).unwrap(), DirStatus::Declined);
        assert!(!target.exists());

        assert!(matches!(
            prep.require_directory(&target),
            Err(ScaffoldError::DeclinedDirectory(p)) if p == target
        ));
        assert!(matches!(
            prep.require_directory(&target.join("app")),
            Err(ScaffoldError::DeclinedDirectory(_))
        ));
        assert!(matches!(
            prep.require_directory(&dir.path().join("other")),
            Err(ScaffoldError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_prompt_names_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("new");
        let mut confirmer = ScriptedConfirmer::new(&[false], false);
        let mut prep = Preparer::new(&mut confirmer);
        prep.ensure_directory(&target).unwrap();
        drop(prep);
        assert_eq!(confirmer.asked.len(), 1);
        assert!(confirmer.asked[0].starts_with("Create: "));
        assert!(confirmer.asked[0].contains("new"));
    }
}
