use crate::compose::ComposeDocument;
use crate::error::{Result, ScaffoldError};
use crate::prepare::Preparer;
use crate::project::{Project, Settings};
use crate::templates;
use colored::*;
use std::fs;
use std::path::Path;

pub const API_DIR: &str = "api";

fn write_file(path: &Path, contents: &str) -> Result<()> {
    println!("   {} {}", "+".green(), path.display());
    fs::write(path, contents)
        .map_err(|e| ScaffoldError::io(format!("Failed to write {}", path.display()), e))
}

/// Lay out `<root>/api` and append the `api` and `db` services.
///
/// The project root may already exist (the React builder creates it); the
/// `api` directory may not.
pub fn build_fastapi(
    project: &Project,
    settings: &Settings,
    preparer: &Preparer,
    compose: &mut ComposeDocument,
) -> Result<()> {
    preparer.require_directory(&project.location)?;

    let api = project.root().join(API_DIR);
    if api.exists() {
        return Err(ScaffoldError::DestinationExists(api));
    }

    println!("{} Creating FastAPI backend in {}", "🐍".cyan(), api.display());
    fs::create_dir_all(&api)
        .map_err(|e| ScaffoldError::io(format!("Failed to create {}", api.display()), e))?;

    write_file(&api.join("requirements.txt"), templates::REQUIREMENTS_TXT)?;
    write_file(&api.join("main.py"), &templates::fastapi_main(&project.title))?;
    write_file(
        &api.join("Dockerfile"),
        &templates::api_dockerfile(&settings.docker),
    )?;

    compose.add_fragment("api", templates::api_compose(&project.title));
    compose.add_fragment("db", templates::db_compose(&project.title, &settings.docker));

    println!("{} FastAPI backend ready", "✓".green());
    Ok(())
}
