//! Active profile resolution
//!
//! The profile comes from the first of these that is set and not blank:
//!
//! 1. an explicit override
//! 2. system property `quarkus.profile`
//! 3. environment variable `QUARKUS_PROFILE`
//! 4. build property `quarkus.profile`
//! 5. project property `quarkus.profile`
//!
//! and otherwise falls back to the launch mode default (`prod` for a normal
//! launch). Resolution cannot fail.

use std::collections::BTreeMap;

use effconf_fs::PropertyMap;
use serde::Serialize;
use serde_json::Value;

use crate::{KeyPrefix, PropertySource, Snapshot, merge};

/// Profile used when nothing selects one and the launch mode is normal.
pub const DEFAULT_PROFILE: &str = "prod";

/// How the application is being launched; picks the fallback profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LaunchMode {
    #[default]
    Normal,
    Development,
    Test,
}

impl LaunchMode {
    pub fn default_profile(&self) -> &'static str {
        match self {
            Self::Normal => DEFAULT_PROFILE,
            Self::Development => "dev",
            Self::Test => "test",
        }
    }
}

/// Which input the active profile was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileOrigin {
    Override,
    SystemProperty(String),
    Environment(String),
    BuildProperty(String),
    ProjectProperty(String),
    LaunchMode,
}

impl std::fmt::Display for ProfileOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "explicit override"),
            Self::SystemProperty(key) => write!(f, "system property {key}"),
            Self::Environment(name) => write!(f, "environment variable {name}"),
            Self::BuildProperty(key) => write!(f, "build property {key}"),
            Self::ProjectProperty(key) => write!(f, "project property {key}"),
            Self::LaunchMode => write!(f, "launch mode default"),
        }
    }
}

/// The resolved profile value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProfile {
    pub profile: String,
    pub origin: ProfileOrigin,
}

/// Walks the profile fallback chain over borrowed inputs.
#[derive(Debug)]
pub struct ProfileResolver<'a> {
    prefix: &'a KeyPrefix,
    snapshot: &'a Snapshot,
    build: Option<&'a PropertyMap>,
    project: Option<&'a BTreeMap<String, Value>>,
    launch_mode: LaunchMode,
    explicit: Option<&'a str>,
}

impl<'a> ProfileResolver<'a> {
    pub fn new(prefix: &'a KeyPrefix, snapshot: &'a Snapshot) -> Self {
        Self {
            prefix,
            snapshot,
            build: None,
            project: None,
            launch_mode: LaunchMode::default(),
            explicit: None,
        }
    }

    pub fn build_properties(mut self, build: &'a PropertyMap) -> Self {
        self.build = Some(build);
        self
    }

    pub fn project_properties(mut self, project: &'a BTreeMap<String, Value>) -> Self {
        self.project = Some(project);
        self
    }

    pub fn launch_mode(mut self, mode: LaunchMode) -> Self {
        self.launch_mode = mode;
        self
    }

    pub fn explicit(mut self, profile: Option<&'a str>) -> Self {
        self.explicit = profile;
        self
    }

    /// The active profile name.
    pub fn resolve_profile(&self) -> String {
        self.resolve().profile
    }

    /// The active profile name together with the input that supplied it.
    pub fn resolve(&self) -> ResolvedProfile {
        let key = self.prefix.profile_key();
        let env_name = self.prefix.profile_env();

        let candidates = [
            (self.explicit, ProfileOrigin::Override),
            (
                self.snapshot.system_property(&key),
                ProfileOrigin::SystemProperty(key.clone()),
            ),
            (
                self.snapshot.env_var(&env_name),
                ProfileOrigin::Environment(env_name.clone()),
            ),
            (
                self.build.and_then(|b| b.get(&key)).map(String::as_str),
                ProfileOrigin::BuildProperty(key.clone()),
            ),
            (
                self.project.and_then(|p| p.get(&key)).and_then(Value::as_str),
                ProfileOrigin::ProjectProperty(key.clone()),
            ),
        ];

        for (value, origin) in candidates {
            if let Some(profile) = value.map(str::trim).filter(|v| !v.is_empty()) {
                tracing::debug!(profile, %origin, "Resolved active profile");
                return ResolvedProfile {
                    profile: profile.to_string(),
                    origin,
                };
            }
        }

        let profile = self.launch_mode.default_profile();
        tracing::debug!(
            profile,
            mode = ?self.launch_mode,
            "No profile set, using launch mode default"
        );
        ResolvedProfile {
            profile: profile.to_string(),
            origin: ProfileOrigin::LaunchMode,
        }
    }
}

/// Split a profile value into individual names: `"dev, staging"` gives
/// `["dev", "staging"]`. Empty segments are skipped.
pub fn parse_profiles(value: &str) -> Vec<String> {
    let mut profiles: Vec<String> = Vec::new();
    for segment in value.split(',') {
        let name = segment.trim();
        if name.is_empty() {
            if !value.trim().is_empty() {
                tracing::warn!(value, "Ignoring empty segment in profile list");
            }
            continue;
        }
        if !profiles.iter().any(|p| p == name) {
            profiles.push(name.to_string());
        }
    }
    profiles
}

/// Insert each profile's parent immediately before it.
///
/// The parent is read from `parent_key` (`quarkus.config.profile.parent`),
/// preferring the profile's own `%profile.` entry over the base value. Only
/// one level is followed; a parent already in the list is not repeated.
pub fn with_parents(
    sources: &[PropertySource],
    profiles: &[String],
    parent_key: &str,
) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::with_capacity(profiles.len());

    for profile in profiles {
        let parent = merge::lookup(sources, parent_key, std::slice::from_ref(profile))
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != profile.as_str());

        if let Some(parent) = parent {
            if !expanded.iter().any(|p| p == parent) && !profiles.iter().any(|p| p == parent) {
                tracing::debug!(profile, parent, "Applying parent profile");
                expanded.push(parent.to_string());
            }
        }
        if !expanded.iter().any(|p| p == profile) {
            expanded.push(profile.clone());
        }
    }

    expanded
}
