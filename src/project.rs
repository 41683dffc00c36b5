//! Project description and the scaffolding sequence.
//!
//! The sequence is: resolve a title, make sure the location exists, run each
//! selected stack builder in order, then write the compose file if asked.
//! A failing stack is reported and recorded; the remaining stacks still run.

use crate::compose::{COMPOSE_FILE, ComposeDocument};
use crate::config::{DockerConfig, StackgenConfig};
use crate::error::{Result, ScaffoldError};
use crate::prepare::{DirStatus, Preparer};
use crate::process::{PackageManager, StderrPolicy, ToolRunner};
use crate::prompt::Confirmer;
use crate::stacks::Stack;
use crate::title::{self, WordSource};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub react: bool,
    /// Only meaningful together with `react`.
    pub typescript: bool,
    pub fastapi: bool,
    pub dockerize: bool,
}

impl Options {
    /// Stacks to build, in build order.
    pub fn stacks(&self) -> Vec<Stack> {
        let mut stacks = Vec::new();
        if self.react {
            stacks.push(Stack::React);
        }
        if self.fastapi {
            stacks.push(Stack::FastApi);
        }
        stacks
    }

    /// `false` means there is nothing to do.
    pub fn has_stack(&self) -> bool {
        self.react || self.fastapi
    }
}

/// What the operator asked for; the title may still be unknown.
#[derive(Debug, Clone)]
pub struct ProjectSpec {
    pub title: Option<String>,
    pub location: PathBuf,
    pub options: Options,
}

impl ProjectSpec {
    pub fn with_title(self, title: String) -> Project {
        Project {
            title,
            location: self.location,
            options: self.options,
        }
    }
}

/// A project with its title settled.
#[derive(Debug, Clone)]
pub struct Project {
    pub title: String,
    pub location: PathBuf,
    pub options: Options,
}

impl Project {
    /// `<location>/<title>`.
    pub fn root(&self) -> PathBuf {
        self.location.join(&self.title)
    }
}

/// Runtime settings derived from the config file and CLI overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub package_manager: PackageManager,
    pub stderr_policy: StderrPolicy,
    pub word_list: PathBuf,
    pub max_title_attempts: usize,
    pub docker: DockerConfig,
}

impl Settings {
    pub fn from_config(config: &StackgenConfig) -> Self {
        Self {
            package_manager: config.tools.package_manager,
            stderr_policy: StderrPolicy::from_strict(config.tools.strict_stderr),
            word_list: config.title.word_list.clone(),
            max_title_attempts: config.title.max_attempts.max(1),
            docker: config.docker.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&StackgenConfig::default())
    }
}

/// Use the given name, or offer random ones. `load_words` runs only when needed.
pub fn resolve_title<W, F>(
    given: Option<&str>,
    load_words: F,
    confirmer: &mut dyn Confirmer,
    max_attempts: usize,
) -> Result<String>
where
    W: WordSource,
    F: FnOnce() -> Result<W>,
{
    match given {
        Some(name) => {
            title::validate_name(name)?;
            Ok(name.to_string())
        }
        None => {
            let mut words = load_words()?;
            title::generate_title(&mut words, confirmer, max_attempts)
        }
    }
}

#[derive(Debug)]
pub struct StackOutcome {
    pub stack: Stack,
    pub error: Option<ScaffoldError>,
}

#[derive(Debug)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub location_status: DirStatus,
    pub outcomes: Vec<StackOutcome>,
    pub compose: ComposeDocument,
    /// Set when `docker-compose.yml` was written.
    pub compose_path: Option<PathBuf>,
    /// Set when `docker-compose.yml` could not be written.
    pub compose_error: Option<ScaffoldError>,
}

impl ScaffoldReport {
    pub fn failed(&self) -> impl Iterator<Item = &StackOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed().next().is_none() && self.compose_error.is_none()
    }
}

/// Run every selected stack builder, then write the compose file if asked.
///
/// Only errors outside a single stack (the location prompt, writing the
/// compose file) are returned as `Err`. A `docker-compose.yml` that was
/// already present before any builder ran is never overwritten; it is
/// reported in `compose_error` instead.
pub fn scaffold(
    project: &Project,
    settings: &Settings,
    runner: &mut dyn ToolRunner,
    confirmer: &mut dyn Confirmer,
) -> Result<ScaffoldReport> {
    let mut preparer = Preparer::new(confirmer);
    let location_status = preparer.ensure_directory(&project.location)?;

    let root = project.root();
    let compose_target = root.join(COMPOSE_FILE);
    let compose_preexisting =
        project.options.dockerize && fs::symlink_metadata(&compose_target).is_ok();

    let mut compose = ComposeDocument::new();
    let mut outcomes = Vec::new();

    for stack in project.options.stacks() {
        tracing::info!(%stack, root = %project.root().display(), "building stack");
        let result = stack.build(project, settings, runner, &preparer, &mut compose);
        let error = match result {
            Ok(()) => None,
            Err(ScaffoldError::Interrupted) => return Err(ScaffoldError::Interrupted),
            Err(e) => {
                println!("{} ERROR: creating {}: {}", "x".red(), stack, e);
                tracing::warn!(%stack, error = %e, "stack failed");
                Some(e)
            }
        };
        outcomes.push(StackOutcome { stack, error });
    }

    let mut compose_error = None;
    let compose_path = if !project.options.dockerize {
        None
    } else if compose_preexisting {
        let e = ScaffoldError::DestinationExists(compose_target);
        println!("{} ERROR: writing {}: {}", "x".red(), COMPOSE_FILE, e);
        compose_error = Some(e);
        None
    } else {
        write_compose(&compose, &root)?
    };

    Ok(ScaffoldReport {
        root,
        location_status,
        outcomes,
        compose,
        compose_path,
        compose_error,
    })
}

fn write_compose(compose: &ComposeDocument, root: &Path) -> Result<Option<PathBuf>> {
    if compose.is_empty() {
        println!(
            "{} No services were built; skipping docker-compose.yml",
            "!".yellow()
        );
        return Ok(None);
    }
    println!("{} Writing docker-compose.yml", "🐳".blue());
    compose.write(root).map(Some)
}
