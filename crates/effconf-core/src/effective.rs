//! The merged, read-only result of configuration resolution

use std::collections::BTreeMap;

use effconf_fs::{PropertyMap, checksum, properties};
use serde::Serialize;

use crate::merge::{self, Origin};
use crate::profile::{parse_profiles, with_parents};
use crate::{KeyPrefix, PropertySource, Result, SourceInfo, expand};

/// Final key/value mapping after merging every source for the active profile.
///
/// Besides the values it records the profile string it was computed for,
/// the profiles actually applied (parents included), where each value came
/// from and which sources took part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    profile: String,
    profiles: Vec<String>,
    values: PropertyMap,
    origins: BTreeMap<String, Origin>,
    sources: Vec<SourceInfo>,
}

impl EffectiveConfig {
    /// Merge `sources` for `profile`.
    ///
    /// `profile` may be a comma-separated list. Parent profiles named by the
    /// prefix's `config.profile.parent` key are applied before their child.
    pub fn from_sources(
        sources: &[PropertySource],
        profile: impl Into<String>,
        prefix: &KeyPrefix,
    ) -> Self {
        let profile = profile.into();
        let profiles = with_parents(
            sources,
            &parse_profiles(&profile),
            &prefix.parent_profile_key(),
        );
        let merged = merge::merge_with_origins(sources, &profiles);

        tracing::debug!(
            profile = %profile,
            applied = ?profiles,
            sources = sources.len(),
            keys = merged.values.len(),
            "Merged effective configuration"
        );

        Self {
            profile,
            profiles,
            values: merged.values,
            origins: merged.origins,
            sources: sources.iter().map(PropertySource::info).collect(),
        }
    }

    /// The active profile as resolved, e.g. `prod` or `dev,staging`.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Profiles applied during the merge, in application order.
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Raw values, before `${...}` expansion.
    pub fn values(&self) -> &PropertyMap {
        &self.values
    }

    pub fn origin(&self, key: &str) -> Option<&Origin> {
        self.origins.get(key)
    }

    pub fn origins(&self) -> &BTreeMap<String, Origin> {
        &self.origins
    }

    /// Sources that took part in the merge, in declaration order.
    pub fn sources(&self) -> &[SourceInfo] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries whose key starts with `prefix`, e.g. the `quarkus.` subset.
    pub fn with_prefix(&self, prefix: &str) -> PropertyMap {
        self.values
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// All values with `${...}` references expanded.
    pub fn expanded(&self) -> Result<PropertyMap> {
        expand::expand_all(&self.values)
    }

    /// One value with `${...}` references expanded, or `None` if unset.
    pub fn get_expanded(&self, key: &str) -> Result<Option<String>> {
        self.values
            .get(key)
            .map(|raw| expand::expand_value(&self.values, key, raw))
            .transpose()
    }

    /// Stable `sha256:<hex>` digest of the profile and all values.
    pub fn fingerprint(&self) -> String {
        checksum::compute_map_checksum(&self.profile, &self.values)
    }

    /// Render the values as a `.properties` document.
    pub fn to_properties(&self, header: Option<&str>) -> String {
        properties::to_string(&self.values, header)
    }
}
