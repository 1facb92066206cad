//! File format detection

use std::path::Path;

/// Supported flat-config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Java-style `.properties`
    Properties,
    /// YAML, flattened to dotted keys
    Yaml,
    /// `KEY=value` lines in environment-variable naming
    DotEnv,
}

impl Format {
    /// Detect the format from a file name.
    ///
    /// `.env` is matched by name; everything else by extension.
    pub fn detect(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        if file_name == ".env" {
            return Some(Self::DotEnv);
        }
        let extension = path.extension()?.to_str()?;
        match extension.to_lowercase().as_str() {
            "properties" => Some(Self::Properties),
            "yaml" | "yml" => Some(Self::Yaml),
            "env" => Some(Self::DotEnv),
            _ => None,
        }
    }

    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Yaml => "YAML",
            Self::DotEnv => "dotenv",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
