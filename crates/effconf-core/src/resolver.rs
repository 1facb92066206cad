//! Assembly of every configuration tier for a project
//!
//! The `ConfigResolver` gathers the in-memory property maps it was given, the
//! process snapshot and the configuration files found in the project, turns
//! each into a [`PropertySource`] with its tier's ordinal and merges them for
//! the active profile.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use effconf_fs::constants::{DEFAULT_RESOURCE_DIR, PROJECT_CONFIG_DIR};
use effconf_fs::{ConfigFile, ConfigStore, PropertyMap};
use serde_json::Value;

use crate::collect::{collect_env, collect_prefixed, collect_system, env_name_to_key};
use crate::profile::{LaunchMode, ProfileResolver, ResolvedProfile};
use crate::{EffectiveConfig, KeyPrefix, PropertySource, Result, Snapshot, ordinal};

/// Resolves the effective configuration of a project.
///
/// Sources, highest ordinal first:
/// 1. Forced properties (600)
/// 2. Task properties (500)
/// 3. System properties from the snapshot (400)
/// 4. Environment variables from the snapshot (300)
/// 5. `.env` in the project directory (295)
/// 6. Build properties (290)
/// 7. `gradle.properties` plus explicit project properties (280)
/// 8. `config/application.{yaml,yml}` (265) and `config/application.properties` (260)
/// 9. Per resource directory: `application.{yaml,yml}` (255),
///    `application.properties` (250) and `META-INF/microprofile-config.properties` (100)
/// 10. Defaults (0)
///
/// System, environment and project properties are restricted to the key
/// prefix. Missing files are skipped; a file that fails to parse aborts
/// resolution.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    project_dir: PathBuf,
    resource_dirs: Vec<PathBuf>,
    forced: PropertyMap,
    task: PropertyMap,
    build: PropertyMap,
    project: BTreeMap<String, Value>,
    defaults: PropertyMap,
    snapshot: Snapshot,
    launch_mode: LaunchMode,
    profile: Option<String>,
    prefix: KeyPrefix,
}

impl ConfigResolver {
    /// Create a resolver for the project rooted at `project_dir`.
    ///
    /// The snapshot starts empty; pass [`Snapshot::capture`] to see the real
    /// process environment.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            resource_dirs: Vec::new(),
            forced: PropertyMap::new(),
            task: PropertyMap::new(),
            build: PropertyMap::new(),
            project: BTreeMap::new(),
            defaults: PropertyMap::new(),
            snapshot: Snapshot::new(),
            launch_mode: LaunchMode::default(),
            profile: None,
            prefix: KeyPrefix::default(),
        }
    }

    /// Add a resource directory. Relative paths are taken from the project
    /// directory. Later directories win over earlier ones at equal ordinals.
    ///
    /// Without any, `src/main/resources` is used.
    pub fn resource_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.resource_dirs.push(self.project_dir.join(dir));
        self
    }

    pub fn forced(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.forced.insert(key.into(), value.into());
        self
    }

    pub fn task(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.task.insert(key.into(), value.into());
        self
    }

    pub fn build(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.build.insert(key.into(), value.into());
        self
    }

    /// Add a project property. Only string values ever reach the result.
    pub fn project(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.project.insert(key.into(), value.into());
        self
    }

    pub fn defaults(mut self, defaults: PropertyMap) -> Self {
        self.defaults.extend(defaults);
        self
    }

    pub fn snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn launch_mode(mut self, mode: LaunchMode) -> Self {
        self.launch_mode = mode;
        self
    }

    /// Use `profile` instead of walking the profile chain.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn prefix(mut self, prefix: KeyPrefix) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Resource directories in lookup order.
    pub fn resource_dirs(&self) -> Vec<PathBuf> {
        if self.resource_dirs.is_empty() {
            vec![self.project_dir.join(DEFAULT_RESOURCE_DIR)]
        } else {
            self.resource_dirs.clone()
        }
    }

    /// Determine the active profile and where it came from.
    pub fn resolve_profile(&self) -> Result<ResolvedProfile> {
        let project = self.project_properties()?;
        Ok(self.profile_from(&project))
    }

    /// Build every non-empty source in declaration order.
    pub fn sources(&self) -> Result<Vec<PropertySource>> {
        let project = self.project_properties()?;
        self.sources_from(&project)
    }

    /// Resolve the effective configuration.
    pub fn resolve(&self) -> Result<EffectiveConfig> {
        let project = self.project_properties()?;
        let sources = self.sources_from(&project)?;
        let profile = self.profile_from(&project);
        Ok(EffectiveConfig::from_sources(
            &sources,
            profile.profile,
            &self.prefix,
        ))
    }

    fn profile_from(&self, project: &BTreeMap<String, Value>) -> ResolvedProfile {
        ProfileResolver::new(&self.prefix, &self.snapshot)
            .build_properties(&self.build)
            .project_properties(project)
            .launch_mode(self.launch_mode)
            .explicit(self.profile.as_deref())
            .resolve()
    }

    /// `gradle.properties` overlaid with the explicitly passed project
    /// properties.
    fn project_properties(&self) -> Result<BTreeMap<String, Value>> {
        let path = self.project_dir.join(ConfigFile::GradleProperties);
        let mut project: BTreeMap<String, Value> = match ConfigStore::new().load_if_exists(&path)? {
            Some(loaded) => {
                tracing::debug!(?path, entries = loaded.len(), "Loaded project properties");
                loaded
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect()
            }
            None => {
                tracing::debug!(?path, "No gradle.properties found, skipping");
                BTreeMap::new()
            }
        };
        project.extend(self.project.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(project)
    }

    fn sources_from(&self, project: &BTreeMap<String, Value>) -> Result<Vec<PropertySource>> {
        let mut sources = Vec::new();

        push_nonempty(&mut sources, "forced", ordinal::FORCED, self.forced.clone());
        push_nonempty(&mut sources, "task", ordinal::TASK, self.task.clone());
        push_nonempty(
            &mut sources,
            "system",
            ordinal::SYSTEM,
            collect_system(&self.snapshot, &self.prefix),
        );
        push_nonempty(
            &mut sources,
            "environment",
            ordinal::ENVIRONMENT,
            collect_env(self.snapshot.env(), &self.prefix),
        );

        if let Some(source) = self.dotenv_source()? {
            sources.push(source);
        }

        push_nonempty(&mut sources, "build", ordinal::BUILD, self.build.clone());
        push_nonempty(
            &mut sources,
            "project",
            ordinal::PROJECT,
            collect_prefixed(project, &self.prefix),
        );

        let config_dir = self.project_dir.join(PROJECT_CONFIG_DIR);
        for file in ConfigFile::PROJECT_CONFIG_FILES {
            let ordinal = match file {
                ConfigFile::ApplicationProperties => ordinal::PROJECT_CONFIG_PROPERTIES,
                _ => ordinal::PROJECT_CONFIG_YAML,
            };
            sources.extend(self.file_source(&config_dir, file, ordinal)?);
        }

        for dir in self.resource_dirs() {
            for file in ConfigFile::RESOURCE_FILES {
                sources.extend(self.file_source(&dir, file, resource_ordinal(file))?);
            }
        }

        push_nonempty(&mut sources, "defaults", ordinal::DEFAULTS, self.defaults.clone());

        Ok(sources)
    }

    /// Variables from `<project>/.env`, converted like environment variables.
    fn dotenv_source(&self) -> Result<Option<PropertySource>> {
        let path = self.project_dir.join(ConfigFile::DotEnv);
        let Some(vars) = ConfigStore::new().load_if_exists(&path)? else {
            tracing::debug!(?path, "No .env file found, skipping");
            return Ok(None);
        };

        let properties: PropertyMap = vars
            .iter()
            .filter_map(|(name, value)| Some((env_name_to_key(name, &self.prefix)?, value.clone())))
            .collect();
        tracing::debug!(?path, entries = properties.len(), "Loaded .env file");

        Ok(Some(PropertySource::new(
            self.source_name(&path),
            ordinal::DOTENV,
            properties,
        )))
    }

    fn file_source(
        &self,
        dir: &Path,
        file: ConfigFile,
        ordinal: i32,
    ) -> Result<Option<PropertySource>> {
        let path = dir.join(file);
        match ConfigStore::with_format(file.format()).load_if_exists(&path)? {
            Some(properties) => {
                tracing::debug!(?path, ordinal, entries = properties.len(), "Loaded config file");
                Ok(Some(PropertySource::new(
                    self.source_name(&path),
                    ordinal,
                    properties,
                )))
            }
            None => {
                tracing::debug!(?path, "Config file not found, skipping");
                Ok(None)
            }
        }
    }

    /// Name of a file source: its path relative to the project when possible.
    fn source_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.project_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

fn resource_ordinal(file: ConfigFile) -> i32 {
    match file {
        ConfigFile::ApplicationYaml | ConfigFile::ApplicationYml => ordinal::APPLICATION_YAML,
        ConfigFile::MicroprofileConfig => ordinal::MICROPROFILE_CONFIG,
        _ => ordinal::APPLICATION_PROPERTIES,
    }
}

fn push_nonempty(
    sources: &mut Vec<PropertySource>,
    name: &str,
    ordinal: i32,
    properties: PropertyMap,
) {
    if properties.is_empty() {
        tracing::debug!(source = name, "No entries, skipping");
        return;
    }
    tracing::debug!(source = name, ordinal, entries = properties.len(), "Collected properties");
    sources.push(PropertySource::new(name, ordinal, properties));
}
