//! Format-dispatching loading and saving of flat configuration files

use std::path::Path;

use crate::{Error, Format, ParseError, PropertyMap, Result, dotenv, io, properties, yaml};

/// Loads configuration files of any supported [`Format`] into flat maps.
///
/// The format is taken from the file name unless one is forced with
/// [`ConfigStore::with_format`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore {
    format: Option<Format>,
}

impl ConfigStore {
    /// Create a store that detects formats from file names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that reads every file as `format`.
    pub fn with_format(format: Format) -> Self {
        Self {
            format: Some(format),
        }
    }

    /// Load a file into a flat map.
    ///
    /// A parse failure is reported as [`Error::ConfigParse`] naming the file;
    /// no partial map is returned.
    pub fn load(&self, path: &Path) -> Result<PropertyMap> {
        let format = self.format_of(path)?;
        let content = io::read_text(path)?;
        Self::parse(path, format, &content)
    }

    /// Load a file into a flat map, or `None` when the file does not exist.
    pub fn load_if_exists(&self, path: &Path) -> Result<Option<PropertyMap>> {
        let format = self.format_of(path)?;
        match io::read_text_if_exists(path)? {
            Some(content) => Self::parse(path, format, &content).map(Some),
            None => Ok(None),
        }
    }

    /// Save a flat map as a `.properties` file, atomically.
    pub fn save_properties(
        &self,
        path: &Path,
        map: &PropertyMap,
        header: Option<&str>,
    ) -> Result<()> {
        io::write_text(path, &properties::to_string(map, header))
    }

    fn format_of(&self, path: &Path) -> Result<Format> {
        self.format
            .or_else(|| Format::detect(path))
            .ok_or_else(|| Error::UnsupportedFormat {
                file_name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            })
    }

    fn parse(path: &Path, format: Format, content: &str) -> Result<PropertyMap> {
        let parsed: std::result::Result<PropertyMap, ParseError> = match format {
            Format::Properties => properties::parse(content),
            Format::Yaml => yaml::flatten(content),
            Format::DotEnv => dotenv::parse(content),
        };
        parsed.map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.name().into(),
            message: e.to_string(),
        })
    }
}
