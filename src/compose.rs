//! `docker-compose.yml` assembly.
//!
//! Builders append one fragment per service as they succeed; the document is
//! rendered and written once, after every builder has run.

use crate::error::{Result, ScaffoldError};
use crate::templates::COMPOSE_HEADER;
use std::fs;
use std::path::{Path, PathBuf};

pub const COMPOSE_FILE: &str = "docker-compose.yml";

#[derive(Debug, Default, Clone)]
pub struct ComposeDocument {
    fragments: Vec<(String, String)>,
}

impl ComposeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_fragment(&mut self, service: &str, fragment: impl Into<String>) {
        tracing::debug!(service, "compose fragment added");
        self.fragments.push((service.to_string(), fragment.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Service names in the order they were added.
    pub fn services(&self) -> Vec<&str> {
        self.fragments.iter().map(|(s, _)| s.as_str()).collect()
    }

    pub fn finalize(&self) -> String {
        let mut out = String::from(COMPOSE_HEADER);
        for (_, fragment) in &self.fragments {
            out.push_str(fragment);
            if !fragment.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }

    /// Write `<root>/docker-compose.yml` and return its path.
    pub fn write(&self, root: &Path) -> Result<PathBuf> {
        let path = root.join(COMPOSE_FILE);
        fs::write(&path, self.finalize())
            .map_err(|e| ScaffoldError::io(format!("Failed to write {}", path.display()), e))?;
        Ok(path)
    }
}
