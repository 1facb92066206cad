//! Shared test utilities for the effconf workspace.
//!
//! This crate provides standardised project fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for project
//!   layouts with resource directories, `config/`, `.env` and
//!   `gradle.properties`

pub mod project;

pub use project::TestProject;
