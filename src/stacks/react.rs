use super::css::{self, CSS_DIR};
use crate::compose::ComposeDocument;
use crate::error::{Result, ScaffoldError};
use crate::prepare::Preparer;
use crate::process::{ToolRunner, run_checked};
use crate::project::{Project, Settings};
use crate::templates;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "app";

const EXTRA_DEPS: &[&str] = &["node-sass", "jotai"];

/// Folders created under `app/src`.
fn skeleton(typescript: bool) -> Vec<PathBuf> {
    let base = if typescript { "ts" } else { "js" };
    vec![
        Path::new(base).join("components"),
        Path::new(base).join("types"),
        PathBuf::from(CSS_DIR),
        Path::new("assets").join("img"),
        PathBuf::from("data"),
    ]
}

pub fn create_skeleton(src: &Path, typescript: bool) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for folder in skeleton(typescript) {
        let path = src.join(&folder);
        fs::create_dir_all(&path)
            .map_err(|e| ScaffoldError::io(format!("Failed to create {}", path.display()), e))?;
        println!("   {}", folder.display());
        created.push(path);
    }
    Ok(created)
}

/// Scaffold the React app under `<root>/app`.
///
/// Any failing tool run stops the build before the folder layout, the SCSS
/// migration and the compose fragment.
pub fn build_react(
    project: &Project,
    settings: &Settings,
    runner: &mut dyn ToolRunner,
    preparer: &Preparer,
    compose: &mut ComposeDocument,
) -> Result<()> {
    let root = project.root();
    if root.exists() {
        return Err(ScaffoldError::DestinationExists(root));
    }
    preparer.require_directory(&project.location)?;

    println!("{} Creating React app in {}", "⚛".cyan(), root.display());
    fs::create_dir(&root)
        .map_err(|e| ScaffoldError::io(format!("Failed to create {}", root.display()), e))?;

    let pm = settings.package_manager;
    let policy = settings.stderr_policy;

    println!("{} Installing base dependencies ({})", "📦".blue(), pm);
    run_checked(runner, &pm.install(&root), policy)?;

    run_checked(
        runner,
        &pm.create_react_app(&root, APP_DIR, project.options.typescript),
        policy,
    )?;

    let app = root.join(APP_DIR);
    println!("{} Installing {}", "📦".blue(), EXTRA_DEPS.join(", "));
    run_checked(runner, &pm.add(&app, EXTRA_DEPS), policy)?;

    println!("\n{}", "Creating React folders:".bold());
    let src = app.join("src");
    create_skeleton(&src, project.options.typescript)?;

    let report = css::migrate_to_scss(&src)?;
    for (from, to) in &report.renamed {
        println!(
            "   {} {} -> {}",
            "~".yellow(),
            file_label(from),
            to.strip_prefix(&src).unwrap_or(to).display()
        );
    }
    for path in &report.rewritten {
        println!("   {} updated {}", "~".yellow(), file_label(path));
    }

    let dockerfile = app.join("Dockerfile");
    fs::write(&dockerfile, templates::react_dockerfile(pm, &settings.docker)).map_err(|e| {
        ScaffoldError::io(format!("Failed to write {}", dockerfile.display()), e)
    })?;
    compose.add_fragment("react", templates::react_compose(&project.title));

    println!("{} React app ready", "✓".green());
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
