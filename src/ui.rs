//! Terminal output helpers.
//!
//! `Table` draws a box-bordered table sized to its content and clipped to the
//! terminal width; it is used for the build plan and the final summary.

use crate::compose::COMPOSE_FILE;
use crate::prepare::DirStatus;
use crate::project::{Project, ScaffoldReport};
use crate::stacks::Stack;
use colored::*;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(console::measure_text_width(cell));
            }
        }

        // Shrink the widest column until the table fits, never below 8.
        let overhead = 3 + 3 * widths.len();
        while overhead + widths.iter().sum::<usize>() > max_width {
            let Some((idx, &widest)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
                break;
            };
            if widest <= 8 {
                break;
            }
            widths[idx] -= 1;
        }
        widths
    }

    /// Render to lines, fitting within `max_width` columns where possible.
    pub fn render(&self, max_width: usize) -> Vec<String> {
        if self.headers.is_empty() {
            return Vec::new();
        }
        let widths = self.column_widths(max_width);

        let border = |left: &str, mid: &str, right: &str| {
            let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, inner.join(mid), right)
        };
        let line = |cells: &[String], bold: bool| {
            let mut s = String::from("  │");
            for (cell, &width) in cells.iter().zip(&widths) {
                let clean = cell.replace(['\n', '\r', '\t'], " ");
                let text = console::truncate_str(&clean, width, "...").to_string();
                let pad = width.saturating_sub(console::measure_text_width(&text));
                let text = if bold { text.bold().to_string() } else { text };
                s.push_str(&format!(" {}{} │", text, " ".repeat(pad)));
            }
            s
        };

        let mut out = vec![border("┌", "┬", "┐"), line(&self.headers[..], true)];
        out.push(border("├", "┼", "┤"));
        for row in &self.rows {
            out.push(line(&row[..], false));
        }
        out.push(border("└", "┴", "┘"));
        out
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        for line in self.render(term_width as usize) {
            println!("{}", line);
        }
    }
}

/// What is about to be built, one row per stack.
pub fn plan_table(project: &Project) -> Table {
    let mut table = Table::new(&["Stack", "Directory", "Docker"]);
    let root = project.root();
    for stack in project.options.stacks() {
        let variant = match stack {
            Stack::React if project.options.typescript => format!("{} (TypeScript)", stack),
            _ => stack.to_string(),
        };
        let docker = if project.options.dockerize {
            "compose".to_string()
        } else {
            "Dockerfile".to_string()
        };
        table.add_row(vec![
            variant,
            root.join(stack.dir()).display().to_string(),
            docker,
        ]);
    }
    table
}

/// Final status of the location, every stack, and the compose file.
pub fn summary_table(report: &ScaffoldReport) -> Table {
    let mut table = Table::new(&["Status", "Step", "Detail"]);

    let (status, detail) = match report.location_status {
        DirStatus::Existed => ("✓".green().to_string(), "already present"),
        DirStatus::Created => ("✓".green().to_string(), "created"),
        DirStatus::Declined => ("!".yellow().to_string(), "not created (declined)"),
    };
    table.add_row(vec![status, "Location".to_string(), detail.to_string()]);

    for outcome in &report.outcomes {
        let (status, detail) = match &outcome.error {
            None => ("✓".green().to_string(), "created".to_string()),
            Some(e) => ("x".red().to_string(), e.to_string()),
        };
        table.add_row(vec![status, outcome.stack.to_string(), detail]);
    }

    if let Some(e) = &report.compose_error {
        table.add_row(vec!["x".red().to_string(), COMPOSE_FILE.to_string(), e.to_string()]);
    } else if report.compose_path.is_some() {
        table.add_row(vec![
            "✓".green().to_string(),
            COMPOSE_FILE.to_string(),
            report.compose.services().join(", "),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ComposeDocument;
    use crate::error::ScaffoldError;
    use crate::project::{Options, StackOutcome};
    use std::path::PathBuf;

    #[test]
    fn test_render_shape() {
        colored::control::set_override(false);
        let mut table = Table::new(&["Name", "Value"]);
        table.add_row(vec!["key".to_string(), "value".to_string()]);
        table.add_row(vec!["dropped".to_string()]);
        let lines = table.render(80);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "  ┌──────┬───────┐");
        assert_eq!(lines[1], "  │ Name │ Value │");
        assert_eq!(lines[3], "  │ key  │ value │");
        assert_eq!(lines[4], "  └──────┴───────┘");
    }

    #[test]
    fn test_render_shrinks_to_width() {
        let mut table = Table::new(&["Path"]);
        table.add_row(vec!["x".repeat(100)]);
        let lines = table.render(40);
        assert!(lines.iter().all(|l| console::measure_text_width(l) <= 40));
        assert!(lines[3].contains("..."));
    }

    #[test]
    fn test_plan_rows_follow_build_order() {
        let project = Project {
            title: "demo".to_string(),
            location: PathBuf::from("/tmp"),
            options: Options {
                react: true,
                typescript: true,
                fastapi: true,
                dockerize: false,
            },
        };
        let table = plan_table(&project);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "React app (TypeScript)");
        assert_eq!(table.rows[0][1], "/tmp/demo/app");
        assert_eq!(table.rows[1][1], "/tmp/demo/api");
    }

    #[test]
    fn test_summary_reports_location_stacks_and_compose() {
        colored::control::set_override(false);
        let mut compose = ComposeDocument::new();
        compose.add_fragment("api", "  api:\n");
        compose.add_fragment("db", "  db:\n");
        let report = ScaffoldReport {
            root: PathBuf::from("/tmp/demo"),
            location_status: DirStatus::Created,
            outcomes: vec![
                StackOutcome {
                    stack: Stack::React,
                    error: Some(ScaffoldError::ToolNotFound("npm".to_string())),
                },
                StackOutcome {
                    stack: Stack::FastApi,
                    error: None,
                },
            ],
            compose,
            compose_path: Some(PathBuf::from("/tmp/demo/docker-compose.yml")),
            compose_error: None,
        };

        let table = summary_table(&report);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0][1], "Location");
        assert_eq!(table.rows[0][2], "created");
        assert_eq!(table.rows[1][0], "x");
        assert!(table.rows[1][2].contains("npm"));
        assert_eq!(table.rows[3][1], "docker-compose.yml");
        assert_eq!(table.rows[3][2], "api, db");
    }

    #[test]
    fn test_summary_shows_compose_refusal() {
        let path = PathBuf::from("/tmp/demo/docker-compose.yml");
        let report = ScaffoldReport {
            root: PathBuf::from("/tmp/demo"),
            location_status: DirStatus::Existed,
            outcomes: Vec::new(),
            compose: ComposeDocument::new(),
            compose_path: None,
            compose_error: Some(ScaffoldError::DestinationExists(path)),
        };
        let table = summary_table(&report);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2], "already present");
        assert!(table.rows[1][2].contains("already exists"));
    }
}
