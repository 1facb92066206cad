//! Project detection and resolver setup
//!
//! Without `-C`, commands work from anywhere inside a project: the nearest
//! ancestor holding a Gradle build or settings script is taken as the root.

use std::path::{Path, PathBuf};

use effconf_core::{ConfigResolver, Snapshot};

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Files whose presence marks a project root
const PROJECT_MARKERS: [&str; 4] = [
    "settings.gradle.kts",
    "settings.gradle",
    "build.gradle.kts",
    "build.gradle",
];

/// Walk up from `cwd` to the nearest directory containing a project marker,
/// or `cwd` itself when there is none.
pub fn find_project_root(cwd: &Path) -> PathBuf {
    cwd.ancestors()
        .find(|dir| PROJECT_MARKERS.iter().any(|marker| dir.join(marker).is_file()))
        .unwrap_or(cwd)
        .to_path_buf()
}

/// Build a resolver from the global command-line options.
pub fn resolver(cli: &Cli) -> Result<ConfigResolver> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dunce::canonicalize(dir).map_err(|e| {
            CliError::user(format!(
                "Project directory {} is not accessible: {e}",
                dir.display()
            ))
        })?,
        None => find_project_root(&dunce::canonicalize(std::env::current_dir()?)?),
    };
    tracing::debug!(?project_dir, "Using project directory");

    let snapshot = Snapshot::capture().with_system_properties(cli.system.iter().cloned());

    let mut resolver = ConfigResolver::new(project_dir)
        .snapshot(snapshot)
        .launch_mode(cli.mode.into());

    for dir in &cli.resource_dirs {
        resolver = resolver.resource_dir(dir);
    }
    for (key, value) in &cli.project {
        resolver = resolver.project(key, value.as_str());
    }
    for (key, value) in &cli.build {
        resolver = resolver.build(key, value);
    }
    if let Some(profile) = &cli.profile {
        resolver = resolver.profile(profile);
    }

    Ok(resolver)
}
