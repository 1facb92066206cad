//! [`TestProject`] builder for configuration resolution scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Default resource directory, relative to the project root.
pub const RESOURCES: &str = "src/main/resources";

/// A temporary project directory with helpers for laying out the files a
/// resolver looks at.
///
/// # Example
///
/// ```rust,no_run
/// use effconf_test_utils::TestProject;
///
/// let project = TestProject::new()
///     .with_resource("application.properties", "quarkus.http.port=8080\n")
///     .with_dotenv("QUARKUS_HTTP_PORT=9090\n");
/// project.assert_file_exists(".env");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
        path
    }

    /// Write a file into the default resource directory.
    pub fn with_resource(self, name: &str, content: &str) -> Self {
        self.write(&format!("{RESOURCES}/{name}"), content);
        self
    }

    /// Write a file into an arbitrary resource directory.
    pub fn with_resource_in(self, dir: &str, name: &str, content: &str) -> Self {
        self.write(&format!("{dir}/{name}"), content);
        self
    }

    /// Write a file into the project `config/` directory.
    pub fn with_project_config(self, name: &str, content: &str) -> Self {
        self.write(&format!("config/{name}"), content);
        self
    }

    pub fn with_gradle_properties(self, content: &str) -> Self {
        self.write("gradle.properties", content);
        self
    }

    pub fn with_dotenv(self, content: &str) -> Self {
        self.write(".env", content);
        self
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.path(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
