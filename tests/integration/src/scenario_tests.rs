//! End-to-end resolution scenarios across effconf-fs and effconf-core

use effconf_core::{ConfigResolver, PropertySource, Snapshot, merge, ordinal};
use effconf_fs::ConfigStore;
use effconf_test_utils::TestProject;
use pretty_assertions::assert_eq;
use serde_json::json;

/// A project as a build would see it: files on disk, properties from the
/// build script and a task, and the process environment.
fn build_invocation(project: &TestProject) -> ConfigResolver {
    ConfigResolver::new(project.root())
        .snapshot(
            Snapshot::new()
                .with_env("QUARKUS_PACKAGE_TYPE", "fast-jar")
                .with_env("PATH", "/usr/bin"),
        )
        .build("quarkus.package.type", "legacy-jar")
        .build("quarkus.native.container-build", "true")
        .project("quarkus.native.enabled", json!(false))
}

#[test]
fn environment_package_type_wins_over_build_script() {
    let project = TestProject::new()
        .with_resource("application.properties", "quarkus.package.type=uber-jar\n");

    let config = build_invocation(&project).resolve().unwrap();

    assert_eq!(config.get("quarkus.package.type"), Some("fast-jar"));
    assert_eq!(config.get("quarkus.native.container-build"), Some("true"));
    assert_eq!(config.get("quarkus.native.enabled"), None);
    assert_eq!(config.profile(), "prod");
}

#[test]
fn task_property_wins_over_environment() {
    let project = TestProject::new();
    let config = build_invocation(&project)
        .task("quarkus.package.type", "native")
        .resolve()
        .unwrap();
    assert_eq!(config.get("quarkus.package.type"), Some("native"));
}

#[test]
fn saved_configuration_reloads_identically() {
    let project = TestProject::new()
        .with_resource(
            "application.yaml",
            concat!(
                "quarkus:\n  http:\n    cors:\n      origins:\n",
                "        - http://a.example\n        - http://b.example\n",
            ),
        )
        .with_resource("application.properties", "motd=Welcome = friend: #1!\n");

    let config = ConfigResolver::new(project.root()).resolve().unwrap();
    let target = project.path("build/effective.properties");
    ConfigStore::new()
        .save_properties(&target, config.values(), Some("generated"))
        .unwrap();

    let reloaded = ConfigStore::new().load(&target).unwrap();
    assert_eq!(&reloaded, config.values());
    assert_eq!(
        reloaded["quarkus.http.cors.origins"],
        "http://a.example,http://b.example"
    );
    project.assert_file_contains("build/effective.properties", "# generated");
}

#[test]
fn yaml_profile_section_and_env_profile_form_combine() {
    let project = TestProject::new().with_resource(
        "application.yaml",
        concat!(
            "quarkus:\n  http:\n    port: 8080\n",
            "\"%dev\":\n  quarkus:\n    http:\n      port: 8081\n      host: localhost\n",
        ),
    );

    let config = ConfigResolver::new(project.root())
        .snapshot(
            Snapshot::new()
                .with_env("QUARKUS_PROFILE", "dev")
                .with_env("_DEV_QUARKUS_HTTP_PORT", "9001"),
        )
        .resolve()
        .unwrap();

    assert_eq!(config.get("quarkus.http.port"), Some("9001"));
    assert_eq!(config.get("quarkus.http.host"), Some("localhost"));
    assert_eq!(config.origin("quarkus.http.port").unwrap().source, "environment");
}

#[test]
fn several_resource_dirs_and_comma_profiles() {
    let project = TestProject::new()
        .with_resource_in("main", "application.properties", "x=main\n%a.x=main-a\n")
        .with_resource_in("extra", "application.properties", "%b.x=extra-b\n");

    let config = ConfigResolver::new(project.root())
        .resource_dir("main")
        .resource_dir("extra")
        .profile("a,b")
        .resolve()
        .unwrap();

    assert_eq!(config.profiles(), ["a".to_string(), "b".to_string()]);
    assert_eq!(config.get("x"), Some("extra-b"));
}

#[test]
fn forced_and_build_tiers_merge() {
    let sources = [
        PropertySource::from_pairs("s1", ordinal::FORCED, [("a.b", "final")]),
        PropertySource::from_pairs("s2", ordinal::BUILD, [("a.b", "build"), ("a.c", "keep")]),
    ];
    let merged = merge(&sources, "prod");
    assert_eq!(merged["a.b"], "final");
    assert_eq!(merged["a.c"], "keep");
    assert_eq!(merged, merge(&sources, "prod"));
}
