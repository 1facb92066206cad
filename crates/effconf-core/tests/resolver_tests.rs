//! Tests for resolving whole projects

use effconf_core::{ConfigResolver, Error, KeyPrefix, LaunchMode, ProfileOrigin, Snapshot, ordinal};
use effconf_test_utils::TestProject;
use rstest::rstest;
use serde_json::json;

mod tiers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn forced_beats_every_other_tier() {
        let project = TestProject::new()
            .with_resource("application.properties", "quarkus.package.type=legacy-jar\n")
            .with_gradle_properties("quarkus.package.type=uber-jar\n");

        let config = ConfigResolver::new(project.root())
            .snapshot(
                Snapshot::new()
                    .with_system_property("quarkus.package.type", "mutable-jar")
                    .with_env("QUARKUS_PACKAGE_TYPE", "native"),
            )
            .task("quarkus.package.type", "fast-jar")
            .build("quarkus.package.type", "native-sources")
            .forced("quarkus.package.type", "forced-jar")
            .resolve()
            .unwrap();

        assert_eq!(config.get("quarkus.package.type"), Some("forced-jar"));
        assert_eq!(config.origin("quarkus.package.type").unwrap().ordinal, ordinal::FORCED);
    }

    #[test]
    fn environment_beats_application_properties() {
        let project = TestProject::new()
            .with_resource("application.properties", "quarkus.package.type=legacy-jar\n");

        let config = ConfigResolver::new(project.root())
            .snapshot(Snapshot::new().with_env("QUARKUS_PACKAGE_TYPE", "fast-jar"))
            .resolve()
            .unwrap();

        assert_eq!(config.get("quarkus.package.type"), Some("fast-jar"));
        assert_eq!(config.origin("quarkus.package.type").unwrap().source, "environment");
    }

    #[test]
    fn unprefixed_system_and_env_entries_are_ignored() {
        let project = TestProject::new();
        let config = ConfigResolver::new(project.root())
            .snapshot(
                Snapshot::new()
                    .with_system_property("java.version", "21")
                    .with_env("HOME", "/home/me"),
            )
            .resolve()
            .unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn non_string_project_properties_are_dropped() {
        let project = TestProject::new();
        let config = ConfigResolver::new(project.root())
            .project("quarkus.native.enabled", json!(true))
            .project("quarkus.package.type", "uber-jar")
            .resolve()
            .unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("quarkus.package.type"), Some("uber-jar"));
    }

    #[test]
    fn explicit_project_property_overrides_gradle_properties() {
        let project = TestProject::new().with_gradle_properties("quarkus.package.type=uber-jar\n");
        let config = ConfigResolver::new(project.root())
            .project("quarkus.package.type", "fast-jar")
            .resolve()
            .unwrap();
        assert_eq!(config.get("quarkus.package.type"), Some("fast-jar"));
    }

    #[test]
    fn defaults_fill_gaps_only() {
        let project = TestProject::new().with_resource("application.yml", "greeting: hello\n");
        let defaults = [("greeting", "default"), ("farewell", "bye")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let config = ConfigResolver::new(project.root())
            .defaults(defaults)
            .resolve()
            .unwrap();

        assert_eq!(config.get("greeting"), Some("hello"));
        assert_eq!(config.get("farewell"), Some("bye"));
    }

    #[test]
    fn file_sources_keep_application_keys() {
        let project = TestProject::new().with_project_config(
            "application.yaml",
            "app:\n  name: demo\nquarkus:\n  http:\n    port: 8081\n",
        );
        let config = ConfigResolver::new(project.root()).resolve().unwrap();
        assert_eq!(config.get("app.name"), Some("demo"));
        assert_eq!(config.get("quarkus.http.port"), Some("8081"));
        assert_eq!(config.origin("app.name").unwrap().ordinal, ordinal::PROJECT_CONFIG_YAML);
    }
}

mod profiles {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case(LaunchMode::Normal, "prod", "8080")]
    #[case(LaunchMode::Development, "dev", "8081")]
    #[case(LaunchMode::Test, "test", "8082")]
    fn launch_mode_selects_profile(
        #[case] mode: LaunchMode,
        #[case] profile: &str,
        #[case] port: &str,
    ) {
        let project = TestProject::new().with_resource(
            "application.properties",
            "quarkus.http.port=8080\n%dev.quarkus.http.port=8081\n%test.quarkus.http.port=8082\n",
        );
        let config = ConfigResolver::new(project.root())
            .launch_mode(mode)
            .resolve()
            .unwrap();
        assert_eq!(config.profile(), profile);
        assert_eq!(config.get("quarkus.http.port"), Some(port));
    }

    #[test]
    fn environment_profile_selects_yaml_profile_section() {
        let project = TestProject::new().with_resource(
            "application.yaml",
            "greeting: hello\n\"%staging\":\n  greeting: hello staging\n",
        );
        let resolver = ConfigResolver::new(project.root())
            .snapshot(Snapshot::new().with_env("QUARKUS_PROFILE", "staging"));

        let profile = resolver.resolve_profile().unwrap();
        assert_eq!(profile.profile, "staging");
        assert_eq!(profile.origin, ProfileOrigin::Environment("QUARKUS_PROFILE".into()));
        assert_eq!(resolver.resolve().unwrap().get("greeting"), Some("hello staging"));
    }

    #[test]
    fn system_property_profile_beats_build_property() {
        let project = TestProject::new();
        let profile = ConfigResolver::new(project.root())
            .snapshot(Snapshot::new().with_system_property("quarkus.profile", "sys"))
            .build("quarkus.profile", "build")
            .resolve_profile()
            .unwrap();
        assert_eq!(profile.profile, "sys");
    }

    #[test]
    fn profiled_environment_variable_applies_for_its_profile() {
        let project = TestProject::new()
            .with_resource("application.properties", "%dev.quarkus.http.port=8081\n");
        let config = ConfigResolver::new(project.root())
            .snapshot(Snapshot::new().with_env("_DEV_QUARKUS_HTTP_PORT", "9999"))
            .profile("dev")
            .resolve()
            .unwrap();
        assert_eq!(config.get("quarkus.http.port"), Some("9999"));
    }

    #[test]
    fn parent_profile_from_config_file() {
        let project = TestProject::new().with_resource(
            "application.properties",
            "%staging.quarkus.config.profile.parent=dev\n\
             %dev.quarkus.log.level=DEBUG\n\
             %dev.quarkus.http.port=8081\n\
             %staging.quarkus.http.port=8090\n",
        );
        let config = ConfigResolver::new(project.root())
            .profile("staging")
            .resolve()
            .unwrap();
        assert_eq!(config.profiles(), ["dev".to_string(), "staging".to_string()]);
        assert_eq!(config.get("quarkus.log.level"), Some("DEBUG"));
        assert_eq!(config.get("quarkus.http.port"), Some("8090"));
    }
}

mod prefixes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn custom_prefix_changes_filters_and_profile_key() {
        let project = TestProject::new();
        let config = ConfigResolver::new(project.root())
            .prefix(KeyPrefix::new("app"))
            .snapshot(
                Snapshot::new()
                    .with_env("APP_PROFILE", "dev")
                    .with_env("APP_HTTP_PORT", "1")
                    .with_env("QUARKUS_HTTP_PORT", "2"),
            )
            .resolve()
            .unwrap();
        assert_eq!(config.profile(), "dev");
        assert_eq!(config.get("app.http.port"), Some("1"));
        assert_eq!(config.get("app.profile"), Some("dev"));
        assert_eq!(config.get("quarkus.http.port"), None);
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn malformed_properties_file_names_the_file() {
        let project = TestProject::new()
            .with_resource("application.properties", "bad=\\u12zz\n");
        let err = ConfigResolver::new(project.root()).resolve().unwrap_err();
        match err {
            Error::Fs(effconf_fs::Error::ConfigParse { path, format, .. }) => {
                assert!(path.ends_with("src/main/resources/application.properties"));
                assert_eq!(format, "properties");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_dotenv_is_fatal() {
        let project = TestProject::new().with_dotenv("QUARKUS_X=\"unterminated\n");
        assert!(ConfigResolver::new(project.root()).resolve().is_err());
    }

    #[test]
    fn unresolved_reference_surfaces_on_expansion_only() {
        let project = TestProject::new()
            .with_resource("application.properties", "url=http://${host}/\n");
        let config = ConfigResolver::new(project.root()).resolve().unwrap();
        assert_eq!(config.get("url"), Some("http://${host}/"));
        assert!(matches!(
            config.expanded(),
            Err(Error::UnresolvedReference { .. })
        ));
    }
}
