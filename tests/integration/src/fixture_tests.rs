//! Golden-file tests using test-fixtures/
//!
//! Resolve the fixture projects end to end and compare the expanded result
//! with the expected `.properties` files.

use effconf_core::{ConfigResolver, LaunchMode, Snapshot};
use effconf_fs::properties;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;

/// Normalize line endings to LF for cross-platform comparison.
fn normalize_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n")
}

/// Path to the test-fixtures directory (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures")
}

fn project_dir(name: &str) -> PathBuf {
    fixtures_dir().join("projects").join(name)
}

fn load_expected(name: &str) -> String {
    let path = fixtures_dir().join("expected").join(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read expected output at {}: {}", path.display(), e));
    normalize_line_endings(&content)
}

#[rstest]
#[case(None, "greeting-service-prod.properties")]
#[case(Some("staging"), "greeting-service-staging.properties")]
fn greeting_service_matches_golden_file(#[case] profile: Option<&str>, #[case] expected: &str) {
    let mut resolver = ConfigResolver::new(project_dir("greeting-service"));
    if let Some(profile) = profile {
        resolver = resolver.profile(profile);
    }

    let config = resolver.resolve().unwrap();
    let actual = properties::to_string(&config.expanded().unwrap(), None);

    assert_eq!(actual, load_expected(expected));
}

#[test]
fn greeting_service_lists_every_tier_found() {
    let sources = ConfigResolver::new(project_dir("greeting-service"))
        .sources()
        .unwrap();
    let names: Vec<(&str, i32)> = sources.iter().map(|s| (s.name(), s.ordinal())).collect();

    assert_eq!(
        names,
        vec![
            (".env", 295),
            ("project", 280),
            ("config/application.properties", 260),
            ("src/main/resources/application.properties", 250),
            ("src/main/resources/application.yaml", 255),
            ("src/main/resources/META-INF/microprofile-config.properties", 100),
        ]
    );
}

#[test]
fn greeting_service_test_mode_switches_datasource() {
    let config = ConfigResolver::new(project_dir("greeting-service"))
        .launch_mode(LaunchMode::Test)
        .resolve()
        .unwrap();

    assert_eq!(config.profile(), "test");
    assert_eq!(config.get("quarkus.datasource.db-kind"), Some("h2"));
    assert_eq!(config.get("quarkus.http.port"), Some("8090"));
}

#[test]
fn greeting_service_system_property_beats_dotenv() {
    let config = ConfigResolver::new(project_dir("greeting-service"))
        .snapshot(Snapshot::new().with_system_property("quarkus.http.port", "7000"))
        .resolve()
        .unwrap();

    assert_eq!(config.get("quarkus.http.port"), Some("7000"));
    assert_eq!(config.origin("quarkus.http.port").unwrap().source, "system");
}

#[test]
fn greeting_service_fingerprint_is_stable_across_resolutions() {
    let first = ConfigResolver::new(project_dir("greeting-service"))
        .resolve()
        .unwrap();
    let second = ConfigResolver::new(project_dir("greeting-service"))
        .resolve()
        .unwrap();

    assert_eq!(first.fingerprint(), second.fingerprint());
}
