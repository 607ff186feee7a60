//! Runtime configuration-read scenarios over on-disk extension fixtures.

use std::fs;
use std::path::Path;

use confpack::{
    ConfigMap, ConfigProvider, ConfigReader, Error, Extension, ExtensionConfigSource,
    ExtensionManager, ExtensionRegistry, ProviderRegistry, ReaderFactory, Result,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Mirrors the fixture provider: a fixed payload regardless of options.
struct TestProvider;

impl ConfigProvider for TestProvider {
    fn has_config(&self, _options: &ConfigMap) -> bool {
        true
    }

    fn get_config(&self, _options: &ConfigMap) -> Result<ConfigMap> {
        Ok(json!({
            "TEST": {
                "Key1": "ConfigProvider",
                "Key2": "ConfigProvider",
                "Key3": "ConfigProvider",
                "Key4": "ConfigProvider",
            },
            "TEST_CLASS": {
                "Key1": "ConfigProvider",
                "Key2": "ConfigProvider",
                "Key3": "ConfigProvider",
            },
        })
        .as_object()
        .cloned()
        .unwrap())
    }
}

/// A provider that never has configuration.
struct SilentProvider;

impl ConfigProvider for SilentProvider {
    fn has_config(&self, _options: &ConfigMap) -> bool {
        false
    }

    fn get_config(&self, _options: &ConfigMap) -> Result<ConfigMap> {
        unreachable!("get_config must not be called when has_config is false")
    }
}

fn providers() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register("test-provider", || Box::new(TestProvider));
    registry.register("silent-provider", || Box::new(SilentProvider));
    registry
}

fn manager(extensions: Vec<Extension>) -> ExtensionManager {
    ExtensionManager::new(Box::new(ExtensionRegistry::from_ordered(extensions)))
}

fn write_config(install: &Path, file: &str, content: &str) {
    let dir = install.join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
}

/// The standard `test` fixture: one YAML and one TOML file, with keys that
/// overlap each other and the provider payload.
fn write_test_fixture(install: &Path) {
    write_config(
        install,
        "config.yaml",
        concat!(
            "TEST:\n",
            "  Key1: config.yaml\n",
            "  Key2: config.yaml\n",
            "  Key3: config.yaml\n",
            "  Key5: config.yaml\n",
            "  Key6: config.yaml\n",
            "TEST_YAML:\n",
            "  Key1: config.yaml\n",
            "  Key2: config.yaml\n",
            "  Key3: config.yaml\n",
        ),
    );
    write_config(
        install,
        "config.toml",
        concat!(
            "[TEST]\n",
            "Key2 = \"config.toml\"\n",
            "Key7 = \"config.toml\"\n",
            "\n",
            "[TEST_TOML]\n",
            "Key1 = \"config.toml\"\n",
            "Key2 = \"config.toml\"\n",
            "Key3 = \"config.toml\"\n",
        ),
    );
}

#[test]
fn empty_registry_has_no_config() {
    let manager = manager(Vec::new());
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    assert!(!source.has_config());
    assert!(source.read_config().unwrap().is_empty());
}

#[test]
fn provider_only_ignores_config_dir() {
    let tmp = TempDir::new().unwrap();
    write_test_fixture(tmp.path());

    let mut ext = Extension::new("test", tmp.path());
    ext.provider = "test-provider".to_string();
    let manager = manager(vec![ext]);
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    assert_eq!(
        Value::Object(source.read_config().unwrap()),
        json!({
            "TEST": {
                "Key1": "ConfigProvider",
                "Key2": "ConfigProvider",
                "Key3": "ConfigProvider",
                "Key4": "ConfigProvider",
            },
            "TEST_CLASS": {
                "Key1": "ConfigProvider",
                "Key2": "ConfigProvider",
                "Key3": "ConfigProvider",
            },
        })
    );
}

#[test]
fn provider_and_config_dir_combined() {
    let tmp = TempDir::new().unwrap();
    write_test_fixture(tmp.path());

    let mut ext = Extension::new("test", tmp.path());
    ext.provider = "test-provider".to_string();
    ext.force_config_dir = true;
    let manager = manager(vec![ext]);
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    // Within one extension the provider wins over the directory for shared
    // keys; directory-only keys survive. config.toml sorts before
    // config.yaml, so config.yaml wins their Key2 overlap.
    assert_eq!(
        Value::Object(source.read_config().unwrap()),
        json!({
            "TEST": {
                "Key1": "ConfigProvider",
                "Key2": "ConfigProvider",
                "Key3": "ConfigProvider",
                "Key4": "ConfigProvider",
                "Key5": "config.yaml",
                "Key6": "config.yaml",
                "Key7": "config.toml",
            },
            "TEST_CLASS": {
                "Key1": "ConfigProvider",
                "Key2": "ConfigProvider",
                "Key3": "ConfigProvider",
            },
            "TEST_TOML": {
                "Key1": "config.toml",
                "Key2": "config.toml",
                "Key3": "config.toml",
            },
            "TEST_YAML": {
                "Key1": "config.yaml",
                "Key2": "config.yaml",
                "Key3": "config.yaml",
            },
        })
    );
}

#[test]
fn config_dir_only() {
    let tmp = TempDir::new().unwrap();
    write_test_fixture(tmp.path());

    let manager = manager(vec![Extension::new("test", tmp.path())]);
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    assert_eq!(
        Value::Object(source.read_config().unwrap()),
        json!({
            "TEST": {
                "Key1": "config.yaml",
                "Key2": "config.yaml",
                "Key3": "config.yaml",
                "Key5": "config.yaml",
                "Key6": "config.yaml",
                "Key7": "config.toml",
            },
            "TEST_TOML": {
                "Key1": "config.toml",
                "Key2": "config.toml",
                "Key3": "config.toml",
            },
            "TEST_YAML": {
                "Key1": "config.yaml",
                "Key2": "config.yaml",
                "Key3": "config.yaml",
            },
        })
    );
}

#[test]
fn loading_order_disjoint_keys_all_survive() {
    let tmp = TempDir::new().unwrap();
    for n in 1..=3 {
        let install = tmp.path().join(format!("test{n}"));
        write_config(
            &install,
            "config.yaml",
            &format!(
                concat!(
                    "TEST:\n",
                    "  Key{n}: k{n}.test{n}\n",
                    "TEST{n}:\n",
                    "  Key1: config.yaml\n",
                    "  Key2: config.yaml\n",
                    "  Key3: config.yaml\n",
                ),
                n = n
            ),
        );
    }

    let manager = manager(vec![
        Extension::new("test1", tmp.path().join("test1")),
        Extension::new("test2", tmp.path().join("test2")),
        Extension::new("test3", tmp.path().join("test3")),
    ]);
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    let config = source.read_config().unwrap();
    // No key collides, so the merged TEST block holds every contribution
    assert_eq!(
        config.get("TEST"),
        Some(&json!({
            "Key1": "k1.test1",
            "Key2": "k2.test2",
            "Key3": "k3.test3",
        }))
    );
    for n in 1..=3 {
        assert_eq!(
            config.get(&format!("TEST{n}")),
            Some(&json!({
                "Key1": "config.yaml",
                "Key2": "config.yaml",
                "Key3": "config.yaml",
            }))
        );
    }
}

#[test]
fn earlier_registry_entry_overrides_later() {
    let tmp = TempDir::new().unwrap();
    for name in ["winner", "loser"] {
        write_config(
            &tmp.path().join(name),
            "config.yaml",
            &format!("TEST:\n  Shared: {name}\n  {name}: true\n"),
        );
    }

    // Registry order is priority order: "winner" first means applied last
    let manager = manager(vec![
        Extension::new("winner", tmp.path().join("winner")),
        Extension::new("loser", tmp.path().join("loser")),
    ]);
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    assert_eq!(
        Value::Object(source.read_config().unwrap()),
        json!({
            "TEST": {"Shared": "winner", "winner": true, "loser": true}
        })
    );
}

#[test]
fn provider_reporting_no_config_contributes_nothing() {
    let tmp = TempDir::new().unwrap();
    write_test_fixture(tmp.path());

    let mut ext = Extension::new("test", tmp.path());
    ext.provider = "silent-provider".to_string();
    let manager = manager(vec![ext]);
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    assert!(source.read_config().unwrap().is_empty());
}

#[test]
fn extension_without_any_config() {
    let tmp = TempDir::new().unwrap();

    let manager = manager(vec![Extension::new("test-empty", tmp.path())]);
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    assert!(source.has_config());
    assert!(source.read_config().unwrap().is_empty());
}

#[test]
fn unresolvable_provider_aborts_read() {
    let tmp = TempDir::new().unwrap();

    let mut ext = Extension::new("test", tmp.path());
    ext.provider = "missing-provider".to_string();
    let manager = manager(vec![ext]);
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    match source.read_config().unwrap_err() {
        Error::UnknownProvider {
            provider,
            extension,
        } => {
            assert_eq!(provider, "missing-provider");
            assert_eq!(extension, "test");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_config_file_aborts_read_naming_extension() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "config.yaml", "- a\n- sequence\n");

    let manager = manager(vec![Extension::new("test-invalid", tmp.path())]);
    let providers = providers();
    let readers = ReaderFactory::new();
    let source = ExtensionConfigSource::new(&manager, &providers, &readers);

    let err = source.read_config().unwrap_err();
    match &err {
        Error::ConfigDir { extension, .. } => assert_eq!(extension, "test-invalid"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("test-invalid"));
}
