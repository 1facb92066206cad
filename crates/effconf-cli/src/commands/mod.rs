//! Command implementations for effconf-cli

pub mod completions;
pub mod get;
pub mod profile;
pub mod show;
pub mod sources;

pub use completions::run_completions;
pub use get::run_get;
pub use profile::run_profile;
pub use show::{ShowOptions, run_show};
pub use sources::run_sources;
