//! # stackgen CLI Entry Point
//!
//! Parses the short flags into a project description, resolves the title,
//! runs the selected stack builders and prints a summary.
//!
//! ```text
//! -r  React app            -t  TypeScript template (with -r)
//! -f  FastAPI backend      -d  write docker-compose.yml
//! -n  project name         -l  parent directory
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use colored::*;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use stackgen::config;
use stackgen::error::ScaffoldError;
use stackgen::process::{PackageManager, SystemRunner};
use stackgen::project::{self, Options, ProjectSpec, Settings};
use stackgen::prompt::ConfirmPolicy;
use stackgen::title::WordList;
use stackgen::ui;

#[derive(Parser)]
#[command(name = "stackgen")]
#[command(
    about = "Scaffold a React app and/or a FastAPI backend, optionally dockerized",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Create a React app (create-react-app)
    #[arg(short = 'r', long = "react")]
    react: bool,
    /// Use the TypeScript template (with -r)
    #[arg(short = 't', long = "typescript")]
    typescript: bool,
    /// Create a FastAPI backend
    #[arg(short = 'f', long = "fastapi")]
    fastapi: bool,
    /// Dockerize: write docker-compose.yml for the created services
    #[arg(short = 'd', long = "dockerize")]
    dockerize: bool,
    /// Project name [default: two random words]
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    name: Option<String>,
    /// Directory the project is created in
    #[arg(short = 'l', long = "location", value_name = "LOCATION")]
    location: Option<PathBuf>,
    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long = "yes")]
    yes: bool,
    /// Show debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
    /// Package manager to drive (overrides the config file)
    #[arg(long, value_enum, value_name = "PM")]
    package_manager: Option<PackageManager>,
    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            react: self.react,
            typescript: self.typescript,
            fastapi: self.fastapi,
            dockerize: self.dockerize,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("stackgen=debug")
    } else {
        EnvFilter::try_from_env("STACKGEN_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            if matches!(
                e.downcast_ref::<ScaffoldError>(),
                Some(ScaffoldError::Interrupted)
            ) {
                println!("\nAdios!\n");
                return;
            }
            eprintln!("{} {:#}", "x".red(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut io::stdout());
        return Ok(0);
    }

    let options = cli.options();
    if !options.has_stack() {
        println!("No project type selected.\nUse -h for HELP.");
        return Ok(0);
    }

    let config = config::load_config().context("Failed to load configuration")?;
    let mut settings = Settings::from_config(&config);
    if let Some(pm) = cli.package_manager {
        settings.package_manager = pm;
    }

    let mut confirmer = if cli.yes {
        ConfirmPolicy::AutoAccept
    } else {
        ConfirmPolicy::Interactive
    };

    let spec = ProjectSpec {
        title: cli.name,
        location: cli.location.unwrap_or_else(|| config.default_location()),
        options,
    };

    let title = project::resolve_title(
        spec.title.as_deref(),
        || WordList::from_file(&settings.word_list),
        &mut confirmer,
        settings.max_title_attempts,
    )?;
    let project = spec.with_title(title);

    println!(
        "{} Scaffolding {} in {}",
        "🚀".cyan(),
        project.title.bold(),
        project.location.display()
    );
    ui::plan_table(&project).print();
    println!();

    let report = project::scaffold(&project, &settings, &mut SystemRunner, &mut confirmer)?;

    println!();
    ui::summary_table(&report).print();
    if let Some(path) = &report.compose_path {
        println!("{} Wrote {}", "✓".green(), path.display());
    }

    if report.all_succeeded() {
        println!(
            "{} Created new project: {}",
            "✓".green(),
            project.title.bold()
        );
        println!("  cd {}", report.root.display());
        Ok(0)
    } else {
        Ok(1)
    }
}
