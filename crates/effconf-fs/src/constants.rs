//! Conventional configuration file names and directories.

use std::path::Path;

use crate::Format;

/// Resource directory used when a project declares none.
pub const DEFAULT_RESOURCE_DIR: &str = "src/main/resources";

/// Directory under the project root holding working-directory overrides.
pub const PROJECT_CONFIG_DIR: &str = "config";

/// Configuration files recognised by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFile {
    /// `application.properties`
    ApplicationProperties,
    /// `application.yaml`
    ApplicationYaml,
    /// `application.yml`
    ApplicationYml,
    /// `META-INF/microprofile-config.properties`
    MicroprofileConfig,
    /// `.env` in the project directory
    DotEnv,
    /// `gradle.properties` in the project directory
    GradleProperties,
}

impl ConfigFile {
    /// Application files looked up in every resource directory, in load order.
    pub const RESOURCE_FILES: [ConfigFile; 4] = [
        Self::ApplicationProperties,
        Self::ApplicationYaml,
        Self::ApplicationYml,
        Self::MicroprofileConfig,
    ];

    /// Application files looked up in the project `config/` directory.
    pub const PROJECT_CONFIG_FILES: [ConfigFile; 3] = [
        Self::ApplicationProperties,
        Self::ApplicationYaml,
        Self::ApplicationYml,
    ];

    /// Path relative to the directory the file is looked up in.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationProperties => "application.properties",
            Self::ApplicationYaml => "application.yaml",
            Self::ApplicationYml => "application.yml",
            Self::MicroprofileConfig => "META-INF/microprofile-config.properties",
            Self::DotEnv => ".env",
            Self::GradleProperties => "gradle.properties",
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Self::ApplicationProperties | Self::MicroprofileConfig | Self::GradleProperties => {
                Format::Properties
            }
            Self::ApplicationYaml | Self::ApplicationYml => Format::Yaml,
            Self::DotEnv => Format::DotEnv,
        }
    }
}

impl AsRef<Path> for ConfigFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_variants_share_format() {
        assert_eq!(ConfigFile::ApplicationYaml.format(), Format::Yaml);
        assert_eq!(ConfigFile::ApplicationYml.format(), Format::Yaml);
    }

    #[test]
    fn microprofile_file_lives_under_meta_inf() {
        let path: &Path = ConfigFile::MicroprofileConfig.as_ref();
        assert_eq!(path.parent(), Some(Path::new("META-INF")));
    }
}
