//! # stackgen - React / FastAPI project scaffolding
//!
//! stackgen creates a project directory, drives the package manager and the
//! React app generator, migrates the generated stylesheets to SCSS, writes a
//! small FastAPI service, and describes everything in a `docker-compose.yml`.
//!
//! ## Quick Start
//!
//! ```bash
//! # React (TypeScript) + FastAPI, dockerized, with a random two-word name
//! stackgen -r -t -f -d
//!
//! # FastAPI only, named, under ~/work, no prompts
//! stackgen -f -n billing -l ~/work -y
//! ```
//!
//! ## Module Organization
//!
//! - [`project`] - Project description and the scaffolding sequence
//! - [`stacks`] - React and FastAPI builders, SCSS migration
//! - [`process`] - External tool invocation
//! - [`compose`] - `docker-compose.yml` assembly

/// `docker-compose.yml` assembly.
pub mod compose;

/// Configuration file parsing (`~/.stackgen/config.toml`).
pub mod config;

/// Error types.
pub mod error;

/// Directory preparation with confirmation.
pub mod prepare;

/// External tool invocation and package managers.
pub mod process;

/// Project description and the scaffolding sequence.
pub mod project;

/// Yes/no confirmation policies.
pub mod prompt;

/// Stack builders (React, FastAPI).
pub mod stacks;

/// Dockerfile, compose and FastAPI templates.
pub mod templates;

/// Project titles.
pub mod title;

/// Terminal UI utilities (tables).
pub mod ui;
