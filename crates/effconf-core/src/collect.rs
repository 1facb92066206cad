//! Property source collectors
//!
//! Turn raw inputs (loosely typed property maps, system properties,
//! environment variables) into flat maps restricted to the recognised prefix.
//! Entries that do not qualify are dropped silently.

use std::collections::BTreeMap;

use effconf_fs::PropertyMap;
use serde_json::Value;

use crate::{KeyPrefix, Snapshot};

/// Keep the entries whose key starts with `prefix` and whose value is a string.
pub fn collect(raw: &BTreeMap<String, Value>, prefix: &str) -> PropertyMap {
    raw.iter()
        .filter(|(key, _)| key.starts_with(prefix))
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key.clone(), s.clone())),
            _ => None,
        })
        .collect()
}

/// Keep the string entries carrying `prefix`, including `%profile.`-qualified
/// ones.
pub fn collect_prefixed(raw: &BTreeMap<String, Value>, prefix: &KeyPrefix) -> PropertyMap {
    raw.iter()
        .filter(|(key, _)| prefix.matches(key))
        .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
        .collect()
}

/// System properties carrying the prefix, keys unchanged.
pub fn collect_system(snapshot: &Snapshot, prefix: &KeyPrefix) -> PropertyMap {
    snapshot
        .system()
        .iter()
        .filter(|(key, _)| prefix.matches(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Environment variables carrying the prefix, converted to property keys.
///
/// `QUARKUS_PACKAGE_TYPE` becomes `quarkus.package.type`, and the profiled
/// form `_DEV_QUARKUS_HTTP_PORT` becomes `%dev.quarkus.http.port`.
pub fn collect_env<'a, I>(vars: I, prefix: &KeyPrefix) -> PropertyMap
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    vars.into_iter()
        .filter_map(|(name, value)| Some((env_name_to_key(name, prefix)?, value.clone())))
        .collect()
}

/// Convert one environment variable name to a property key, or `None` when it
/// does not carry the prefix.
pub fn env_name_to_key(name: &str, prefix: &KeyPrefix) -> Option<String> {
    if let Some(rest) = name.strip_prefix('_') {
        let (profile, unqualified) = rest.split_once('_')?;
        if profile.is_empty() || !prefix.matches_env(unqualified) {
            return None;
        }
        return Some(format!(
            "%{}.{}",
            profile.to_lowercase(),
            env_to_property_key(unqualified)
        ));
    }

    prefix.matches_env(name).then(|| env_to_property_key(name))
}

/// Dotted lower-case spelling of an environment variable name.
pub fn env_to_property_key(name: &str) -> String {
    name.to_lowercase().replace('_', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(value: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn collect_keeps_prefixed_string_entries() {
        let input = raw(json!({
            "quarkus.package.type": "fast-jar",
            "quarkus.http.port": 8080,
            "quarkus.native.enabled": true,
            "org.gradle.jvmargs": "-Xmx2g",
        }));

        let collected = collect(&input, "quarkus.");

        assert_eq!(collected.len(), 1);
        assert_eq!(collected["quarkus.package.type"], "fast-jar");
    }

    #[test]
    fn collect_prefixed_accepts_profiled_keys() {
        let input = raw(json!({
            "%dev.quarkus.http.port": "8081",
            "%dev.app.name": "x",
            "quarkus.http.port": "8080",
        }));

        let collected = collect_prefixed(&input, &KeyPrefix::default());

        assert_eq!(
            collected.keys().collect::<Vec<_>>(),
            vec!["%dev.quarkus.http.port", "quarkus.http.port"]
        );
    }

    #[test]
    fn env_package_type_becomes_dotted_key() {
        let env = Snapshot::new()
            .with_env("QUARKUS_PACKAGE_TYPE", "fast-jar")
            .with_env("PATH", "/usr/bin");

        let collected = collect_env(env.env(), &KeyPrefix::default());

        assert_eq!(collected.len(), 1);
        assert_eq!(collected["quarkus.package.type"], "fast-jar");
    }

    #[test]
    fn env_profiled_form_gets_percent_prefix() {
        let prefix = KeyPrefix::default();
        assert_eq!(
            env_name_to_key("_DEV_QUARKUS_HTTP_PORT", &prefix).as_deref(),
            Some("%dev.quarkus.http.port")
        );
        assert_eq!(env_name_to_key("_DEV_OTHER_THING", &prefix), None);
        assert_eq!(env_name_to_key("__QUARKUS_X", &prefix), None);
        assert_eq!(env_name_to_key("_PWD", &prefix), None);
    }

    #[test]
    fn system_properties_are_used_as_is() {
        let snapshot = Snapshot::new()
            .with_system_property("quarkus.Profile.Odd", "kept")
            .with_system_property("java.home", "/jdk");

        let collected = collect_system(&snapshot, &KeyPrefix::default());

        assert_eq!(collected.len(), 1);
        assert_eq!(collected["quarkus.Profile.Odd"], "kept");
    }
}
