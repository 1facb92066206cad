//! Read-only snapshot of process-wide inputs
//!
//! Resolution never consults the process environment directly; it reads the
//! snapshot it was given, which keeps results reproducible in tests.

use effconf_fs::PropertyMap;

/// System properties and environment variables as seen at one point in time.
///
/// Rust processes have no system-property store, so `system` starts empty and
/// is filled by the caller (the CLI maps `-D key=value` arguments onto it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    system: PropertyMap,
    env: PropertyMap,
}

impl Snapshot {
    /// An empty snapshot: no system properties, no environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let env = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect::<PropertyMap>();
        tracing::debug!(variables = env.len(), "Captured environment snapshot");
        Self {
            system: PropertyMap::new(),
            env,
        }
    }

    pub fn with_system_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.system.insert(key.into(), value.into());
        self
    }

    pub fn with_system_properties<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.system
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    pub fn system(&self) -> &PropertyMap {
        &self.system
    }

    pub fn env(&self) -> &PropertyMap {
        &self.env
    }

    pub fn system_property(&self, key: &str) -> Option<&str> {
        self.system.get(key).map(String::as_str)
    }

    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_accumulate_entries() {
        let snapshot = Snapshot::new()
            .with_system_property("quarkus.profile", "dev")
            .with_system_properties([("a", "1"), ("b", "2")])
            .with_env("QUARKUS_HTTP_PORT", "9000");

        assert_eq!(snapshot.system_property("quarkus.profile"), Some("dev"));
        assert_eq!(snapshot.system().len(), 3);
        assert_eq!(snapshot.env_var("QUARKUS_HTTP_PORT"), Some("9000"));
        assert_eq!(snapshot.env_var("HOME"), None);
    }

    #[test]
    fn capture_starts_without_system_properties() {
        assert!(Snapshot::capture().system().is_empty());
    }
}
