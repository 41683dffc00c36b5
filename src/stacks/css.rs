//! CSS → SCSS migration for a freshly generated React `src/` directory.
//!
//! This is a line-level text heuristic, not a parser: a line mentioning
//! `.css` is assumed to hold one `/`-delimited relative path.

use crate::error::{Result, ScaffoldError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where stylesheets end up, relative to `src/`.
pub const CSS_DIR: &str = "assets/css";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// `(from, to)` for every moved stylesheet.
    pub renamed: Vec<(PathBuf, PathBuf)>,
    pub rewritten: Vec<PathBuf>,
}

/// Redirect a `.css` reference into `assets/css/` and swap the extension.
///
/// `import './App.css';` becomes `import './assets/css/App.scss';`. Lines
/// without `.css`, or without any `/`, come back unchanged.
pub fn rewrite_line(line: &str) -> String {
    if !line.contains(".css") {
        return line.to_string();
    }
    match (line.split_once('/'), line.rsplit_once('/')) {
        (Some((first, _)), Some((_, last))) => {
            format!("{}/{}/{}", first, CSS_DIR, last).replace(".css", ".scss")
        }
        _ => line.to_string(),
    }
}

/// Apply [`rewrite_line`] to every line, keeping line endings intact.
pub fn rewrite_source(source: &str) -> String {
    source
        .split_inclusive('\n')
        .map(|chunk| {
            let (body, ending) = match chunk.strip_suffix("\r\n") {
                Some(body) => (body, "\r\n"),
                None => match chunk.strip_suffix('\n') {
                    Some(body) => (body, "\n"),
                    None => (chunk, ""),
                },
            };
            let mut out = rewrite_line(body);
            out.push_str(ending);
            out
        })
        .collect()
}

/// `App.css` → `App.scss`; `None` for anything that isn't a stylesheet.
pub fn scss_name(file_name: &str) -> Option<String> {
    file_name
        .strip_suffix(".css")
        .filter(|stem| !stem.is_empty())
        .map(|stem| format!("{}.scss", stem))
}

/// Move stylesheets directly inside `src` into `src/assets/css/*.scss` and
/// rewrite references in the remaining top-level files.
///
/// `src/assets/css` must already exist. Subdirectories are not visited.
pub fn migrate_to_scss(src: &Path) -> Result<MigrationReport> {
    let css_dir = src.join(CSS_DIR);
    let mut report = MigrationReport::default();

    // Snapshot first: we move files while iterating.
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(src).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            ScaffoldError::io(format!("Failed to scan {}", src.display()), e.into())
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    for path in files {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(target_name) = scss_name(file_name) {
            let target = css_dir.join(target_name);
            tracing::debug!("moving {} -> {}", path.display(), target.display());
            fs::rename(&path, &target).map_err(|e| {
                ScaffoldError::io(format!("Failed to move {}", path.display()), e)
            })?;
            report.renamed.push((path, target));
            continue;
        }

        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::debug!("skipping non-text file {}", path.display());
                continue;
            }
            Err(e) => {
                return Err(ScaffoldError::io(
                    format!("Failed to read {}", path.display()),
                    e,
                ));
            }
        };
        let rewritten = rewrite_source(&source);
        if rewritten != source {
            fs::write(&path, rewritten).map_err(|e| {
                ScaffoldError::io(format!("Failed to rewrite {}", path.display()), e)
            })?;
            report.rewritten.push(path);
        }
    }

    Ok(report)
}
