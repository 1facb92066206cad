//! The recognised key prefix and the well-known keys derived from it

/// Property prefix recognised by default.
pub const DEFAULT_PROPERTY_PREFIX: &str = "quarkus.";

/// Environment variable prefix recognised by default.
pub const DEFAULT_ENV_PREFIX: &str = "QUARKUS_";

/// The prefix that marks a key as relevant to the build, in both property
/// (`quarkus.`) and environment variable (`QUARKUS_`) spelling.
///
/// The profile keys are derived from it: `quarkus.profile`,
/// `QUARKUS_PROFILE` and `quarkus.config.profile.parent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPrefix {
    property: String,
    env: String,
}

impl Default for KeyPrefix {
    fn default() -> Self {
        Self {
            property: DEFAULT_PROPERTY_PREFIX.to_string(),
            env: DEFAULT_ENV_PREFIX.to_string(),
        }
    }
}

impl KeyPrefix {
    /// Build a prefix from a bare name: `app` gives `app.` and `APP_`.
    pub fn new(name: &str) -> Self {
        let name = name.trim_end_matches(['.', '_']);
        Self {
            property: format!("{}.", name.to_lowercase()),
            env: format!("{}_", name.to_uppercase().replace(['.', '-'], "_")),
        }
    }

    /// Property spelling, e.g. `quarkus.`
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Environment spelling, e.g. `QUARKUS_`
    pub fn env(&self) -> &str {
        &self.env
    }

    /// Key naming the active profile(s), e.g. `quarkus.profile`.
    pub fn profile_key(&self) -> String {
        format!("{}profile", self.property)
    }

    /// Environment variable naming the active profile(s), e.g. `QUARKUS_PROFILE`.
    pub fn profile_env(&self) -> String {
        format!("{}PROFILE", self.env)
    }

    /// Key naming a profile's parent, e.g. `quarkus.config.profile.parent`.
    pub fn parent_profile_key(&self) -> String {
        format!("{}config.profile.parent", self.property)
    }

    /// Whether a property key carries the prefix, either directly or behind a
    /// `%profile.` qualifier.
    pub fn matches(&self, key: &str) -> bool {
        strip_profile(key).starts_with(&self.property)
    }

    /// Whether an environment variable name carries the prefix.
    pub fn matches_env(&self, name: &str) -> bool {
        name.starts_with(&self.env)
    }
}

/// Strip a leading `%profile.` qualifier from a key, if present.
pub(crate) fn strip_profile(key: &str) -> &str {
    if let Some(rest) = key.strip_prefix('%') {
        if let Some((_, unqualified)) = rest.split_once('.') {
            return unqualified;
        }
    }
    key
}
