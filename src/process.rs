//! External tool invocation (package managers and generators).
//!
//! Tools are black boxes: we spawn them, wait, and look at the exit status and
//! the captured streams. Nothing is retried and nothing is rolled back.

use crate::error::{Result, ScaffoldError};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: &str, args: &[&str], cwd: &Path) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.to_path_buf(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn from_status(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            code: status.code(),
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a finished run into an error when it failed under `policy`.
    pub fn check(&self, invocation: &Invocation, policy: StderrPolicy) -> Result<()> {
        let reason = if !self.success() {
            Some(match self.code {
                Some(code) => format!("exit status {}", code),
                None => "terminated by signal".to_string(),
            })
        } else if policy == StderrPolicy::Fatal && !self.stderr.trim().is_empty() {
            Some("wrote to stderr".to_string())
        } else {
            None
        };

        match reason {
            None => Ok(()),
            Some(reason) => Err(ScaffoldError::ToolFailed {
                command: invocation.to_string(),
                reason,
            }),
        }
    }
}

/// Whether stderr output alone fails a tool run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StderrPolicy {
    Fatal,
    Ignore,
}

impl StderrPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            StderrPolicy::Fatal
        } else {
            StderrPolicy::Ignore
        }
    }
}

pub trait ToolRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<ToolOutput>;
}

/// Runs tools for real, with a spinner while waiting.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<ToolOutput> {
        tracing::debug!(cwd = %invocation.cwd.display(), "running `{}`", invocation);

        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
                .tick_chars("◜◠◝◞◡◟"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Running {}...", invocation));

        let result = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .output();
        pb.finish_and_clear();

        let output = result.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScaffoldError::ToolNotFound(invocation.program.clone())
            } else {
                ScaffoldError::io(format!("Failed to run `{}`", invocation), e)
            }
        })?;

        let out = ToolOutput::from_status(output.status, &output.stdout, &output.stderr);
        tracing::debug!(code = ?out.code, "`{}` finished", invocation);
        Ok(out)
    }
}

/// Run `invocation` and fail on a bad exit status (or stderr under `policy`).
///
/// Output is echoed either way: stdout on success, stderr on failure.
pub fn run_checked(
    runner: &mut dyn ToolRunner,
    invocation: &Invocation,
    policy: StderrPolicy,
) -> Result<ToolOutput> {
    let output = runner.run(invocation)?;
    match output.check(invocation, policy) {
        Ok(()) => {
            if !output.stdout.trim().is_empty() {
                println!("{}", output.stdout.trim_end());
            }
            Ok(output)
        }
        Err(e) => {
            if !output.stderr.trim().is_empty() {
                eprintln!("{}", output.stderr.trim_end());
            }
            Err(e)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Yarn,
    Npm,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// Install whatever the manifest in `cwd` asks for.
    pub fn install(&self, cwd: &Path) -> Invocation {
        match self {
            PackageManager::Yarn => Invocation::new("yarn", &[], cwd),
            PackageManager::Npm => Invocation::new("npm", &["install"], cwd),
        }
    }

    /// Scaffold a React app into `cwd/<dir>`.
    pub fn create_react_app(&self, cwd: &Path, dir: &str, typescript: bool) -> Invocation {
        let mut args = match self {
            PackageManager::Yarn => vec!["create", "react-app", dir],
            PackageManager::Npm => vec!["init", "react-app", dir],
        };
        if typescript {
            if *self == PackageManager::Npm {
                args.push("--");
            }
            args.extend(["--template", "typescript"]);
        }
        Invocation::new(self.program(), &args, cwd)
    }

    pub fn add(&self, cwd: &Path, packages: &[&str]) -> Invocation {
        let verb = match self {
            PackageManager::Yarn => "add",
            PackageManager::Npm => "install",
        };
        let mut args = vec![verb];
        args.extend_from_slice(packages);
        Invocation::new(self.program(), &args, cwd)
    }

    /// Dockerfile line installing tools globally.
    pub fn global_install_line(&self, packages: &str) -> String {
        match self {
            PackageManager::Yarn => format!("RUN yarn global add {}", packages),
            PackageManager::Npm => format!("RUN npm install -g {}", packages),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(code: Option<i32>, stderr: &str) -> ToolOutput {
        ToolOutput {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    fn inv() -> Invocation {
        Invocation::new("yarn", &["add", "jotai"], Path::new("."))
    }

    #[test]
    fn test_nonzero_exit_fails_under_any_policy() {
        for policy in [StderrPolicy::Fatal, StderrPolicy::Ignore] {
            let err = output(Some(1), "").check(&inv(), policy).unwrap_err();
            assert!(err.to_string().contains("exit status 1"));
            assert!(err.to_string().contains("yarn add jotai"));
        }
        assert!(output(None, "").check(&inv(), StderrPolicy::Ignore).is_err());
    }

    #[test]
    fn test_stderr_is_fatal_only_when_strict() {
        let warned = output(Some(0), "warning: peer dependency\n");
        assert!(warned.check(&inv(), StderrPolicy::Fatal).is_err());
        assert!(warned.check(&inv(), StderrPolicy::Ignore).is_ok());
        assert!(output(Some(0), "  \n").check(&inv(), StderrPolicy::Fatal).is_ok());
    }

    #[test]
    fn test_missing_program_is_tool_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = Invocation::new("stackgen-no-such-tool", &[], dir.path());
        assert!(matches!(
            SystemRunner.run(&invocation),
            Err(ScaffoldError::ToolNotFound(p)) if p == "stackgen-no-such-tool"
        ));
    }

    #[test]
    fn test_package_manager_commands() {
        let cwd = Path::new("/tmp/p");
        assert_eq!(PackageManager::Yarn.install(cwd).to_string(), "yarn");
        assert_eq!(PackageManager::Npm.install(cwd).to_string(), "npm install");
        assert_eq!(
            PackageManager::Yarn.create_react_app(cwd, "app", true).to_string(),
            "yarn create react-app app --template typescript"
        );
        assert_eq!(
            PackageManager::Npm.create_react_app(cwd, "app", true).to_string(),
            "npm init react-app app -- --template typescript"
        );
        assert_eq!(
            PackageManager::Npm.create_react_app(cwd, "app", false).to_string(),
            "npm init react-app app"
        );
        assert_eq!(
            PackageManager::Yarn.add(cwd, &["node-sass", "jotai"]).to_string(),
            "yarn add node-sass jotai"
        );
        assert_eq!(
            PackageManager::Npm.add(cwd, &["node-sass", "jotai"]).to_string(),
            "npm install node-sass jotai"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_streams() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = Invocation::new("sh", &["-c", "echo out; echo err 1>&2; exit 3"], dir.path());
        let out = SystemRunner.run(&invocation).unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
    }
}
