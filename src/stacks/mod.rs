//! Stack builders.
//!
//! Each builder lays out one stack under the project root and, only once
//! every step has succeeded, appends its services to the compose document.

pub mod css;
mod fastapi;
mod react;

use crate::compose::ComposeDocument;
use crate::error::Result;
use crate::prepare::Preparer;
use crate::process::ToolRunner;
use crate::project::{Project, Settings};
use std::fmt;

pub use fastapi::{API_DIR, build_fastapi};
pub use react::{APP_DIR, build_react, create_skeleton};

/// Build order follows declaration order: React first, then the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stack {
    React,
    FastApi,
}

impl Stack {
    pub fn label(&self) -> &'static str {
        match self {
            Stack::React => "React app",
            Stack::FastApi => "FastAPI backend",
        }
    }

    /// Directory the stack owns under the project root.
    pub fn dir(&self) -> &'static str {
        match self {
            Stack::React => APP_DIR,
            Stack::FastApi => API_DIR,
        }
    }

    pub fn build(
        &self,
        project: &Project,
        settings: &Settings,
        runner: &mut dyn ToolRunner,
        preparer: &Preparer,
        compose: &mut ComposeDocument,
    ) -> Result<()> {
        match self {
            Stack::React => build_react(project, settings, runner, preparer, compose),
            Stack::FastApi => build_fastapi(project, settings, preparer, compose),
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
