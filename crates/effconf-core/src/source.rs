//! Named, ordered property sources

use effconf_fs::PropertyMap;
use serde::Serialize;

/// Fixed ordinals of the configuration tiers. Higher wins.
pub mod ordinal {
    /// Properties forced by the build tool itself
    pub const FORCED: i32 = 600;
    /// Properties declared on the task being run
    pub const TASK: i32 = 500;
    pub const SYSTEM: i32 = 400;
    pub const ENVIRONMENT: i32 = 300;
    /// `.env` file in the project directory
    pub const DOTENV: i32 = 295;
    /// Properties declared in the build script
    pub const BUILD: i32 = 290;
    /// `gradle.properties` and explicitly passed project properties
    pub const PROJECT: i32 = 280;
    /// `config/application.yaml` / `.yml` under the project directory
    pub const PROJECT_CONFIG_YAML: i32 = 265;
    /// `config/application.properties` under the project directory
    pub const PROJECT_CONFIG_PROPERTIES: i32 = 260;
    /// `application.yaml` / `.yml` in a resource directory
    pub const APPLICATION_YAML: i32 = 255;
    /// `application.properties` in a resource directory
    pub const APPLICATION_PROPERTIES: i32 = 250;
    /// `META-INF/microprofile-config.properties` in a resource directory
    pub const MICROPROFILE_CONFIG: i32 = 100;
    /// Caller-supplied defaults
    pub const DEFAULTS: i32 = 0;
}

/// A named mapping of keys to values with an integer priority (ordinal).
///
/// Sources are built once per resolution and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySource {
    name: String,
    ordinal: i32,
    properties: PropertyMap,
}

impl PropertySource {
    pub fn new(name: impl Into<String>, ordinal: i32, properties: PropertyMap) -> Self {
        Self {
            name: name.into(),
            ordinal,
            properties,
        }
    }

    /// Build a source from key/value pairs.
    pub fn from_pairs<I, K, V>(name: impl Into<String>, ordinal: i32, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            name,
            ordinal,
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ordinal(&self) -> i32 {
        self.ordinal
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Summary used for reporting which sources went into a result.
    pub fn info(&self) -> SourceInfo {
        SourceInfo {
            name: self.name.clone(),
            ordinal: self.ordinal,
            entries: self.properties.len(),
        }
    }
}

/// Name, ordinal and size of a source that took part in a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub name: String,
    pub ordinal: i32,
    pub entries: usize,
}
