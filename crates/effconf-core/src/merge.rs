//! Layered merge of property sources
//!
//! Sources are applied from the lowest ordinal to the highest so that later
//! writes win. Sources with the same ordinal keep their position in the input
//! list, which makes the source listed last win among equals.
//!
//! The base pass copies every key not starting with `%`. Each active profile
//! then gets its own pass over the same ordered sources, copying
//! `%profile.`-prefixed keys with the qualifier stripped. A profiled value
//! therefore overrides the base value regardless of which source held either.

use std::collections::BTreeMap;

use effconf_fs::PropertyMap;
use serde::Serialize;

use crate::PropertySource;

/// Where the winning value of a key came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    /// Name of the source holding the value
    pub source: String,
    pub ordinal: i32,
    /// Profile whose `%profile.` entry supplied the value, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// Result of a merge that tracks the origin of every key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merged {
    pub values: PropertyMap,
    pub origins: BTreeMap<String, Origin>,
}

/// Merge `sources` for a single active profile.
///
/// `active_profile` is the profile name as resolved; a comma-separated list
/// applies each profile in turn, the last one winning.
pub fn merge(sources: &[PropertySource], active_profile: &str) -> PropertyMap {
    merge_with_origins(sources, &crate::profile::parse_profiles(active_profile)).values
}

/// Merge `sources`, applying `profiles` in order after the base pass.
pub fn merge_with_origins(sources: &[PropertySource], profiles: &[String]) -> Merged {
    let ordered = by_ascending_ordinal(sources);
    let mut merged = Merged::default();

    for source in &ordered {
        for (key, value) in source.properties() {
            if key.starts_with('%') {
                continue;
            }
            merged.insert(key, value, source, None);
        }
    }

    for profile in profiles {
        let qualifier = format!("%{profile}.");
        for source in &ordered {
            for (key, value) in source.properties() {
                if let Some(stripped) = key.strip_prefix(&qualifier) {
                    merged.insert(stripped, value, source, Some(profile));
                }
            }
        }
    }

    merged
}

/// Look up the winning value of one key without merging everything.
///
/// The highest-priority value of the last profile in `profiles` that defines
/// the key wins; otherwise the highest-priority base value.
pub fn lookup<'a>(
    sources: &'a [PropertySource],
    key: &str,
    profiles: &[String],
) -> Option<&'a str> {
    let ordered = by_ascending_ordinal(sources);

    for profile in profiles.iter().rev() {
        let qualified = format!("%{profile}.{key}");
        if let Some(value) = ordered.iter().rev().copied().find_map(|s| s.get(&qualified)) {
            return Some(value);
        }
    }

    ordered.iter().rev().copied().find_map(|s| s.get(key))
}

fn by_ascending_ordinal(sources: &[PropertySource]) -> Vec<&PropertySource> {
    let mut ordered: Vec<&PropertySource> = sources.iter().collect();
    // Stable: equal ordinals keep input order.
    ordered.sort_by_key(|source| source.ordinal());
    ordered
}

impl Merged {
    fn insert(
        &mut self,
        key: &str,
        value: &str,
        source: &PropertySource,
        profile: Option<&String>,
    ) {
        self.values.insert(key.to_string(), value.to_string());
        self.origins.insert(
            key.to_string(),
            Origin {
                source: source.name().to_string(),
                ordinal: source.ordinal(),
                profile: profile.cloned(),
            },
        );
    }
}
