use demo_seeder::Config;
use insert_workers::{worker_descriptors, InsertCategory, MainTablesMode};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_fixture_config_loads() {
    let config = Config::from_file(Path::new("tests/fixtures/config.json")).unwrap();

    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 5432);
    assert_eq!(config.database, "demo");
    assert_eq!(
        config.inserter.enabled_categories(),
        vec![InsertCategory::Timestamp, InsertCategory::MainTables]
    );
    assert_eq!(
        config.inserter.main_tables.mode,
        Some(MainTablesMode::GibberishData)
    );
}

#[test]
fn test_fixture_config_launches_six_workers() {
    let config = Config::from_file(Path::new("tests/fixtures/config.json")).unwrap();
    let descriptors = worker_descriptors(&config.inserter);

    assert_eq!(descriptors.len(), 6);
    let timestamp = descriptors
        .iter()
        .find(|d| d.table_name() == "timestamp")
        .unwrap();
    assert_eq!(timestamp.interval, Some(Duration::from_secs(2)));
}

#[test]
fn test_missing_inserter_section_disables_everything() {
    let file = write_config(
        r#"{"host": "localhost", "port": 5432, "database": "demo", "username": "postgres"}"#,
    );
    let config = Config::from_file(file.path()).unwrap();

    assert!(config.inserter.enabled_categories().is_empty());
    assert!(worker_descriptors(&config.inserter).is_empty());
    assert_eq!(config.password, "");
}

#[test]
fn test_missing_required_field_is_an_error() {
    let file = write_config(r#"{"host": "localhost", "port": 5432, "database": "demo"}"#);
    let err = Config::from_file(file.path()).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("Cannot parse config file"), "{message}");
    assert!(message.contains("username"), "{message}");
}

#[test]
fn test_malformed_json_is_an_error() {
    let file = write_config("{ not json");
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let err = Config::from_file(Path::new("does/not/exist.json")).unwrap_err();
    assert!(format!("{err:#}").contains("Cannot open config file"));
}

#[test]
fn test_retry_setting_is_carried_to_workers() {
    let file = write_config(
        r#"{
            "host": "localhost", "port": 5432, "database": "demo", "username": "postgres",
            "inserter": {
                "timestamp_inserts": { "enabled": true, "every_n_seconds": 2, "retry_after_seconds": 1 }
            }
        }"#,
    );
    let config = Config::from_file(file.path()).unwrap();
    let descriptors = worker_descriptors(&config.inserter);

    assert_eq!(descriptors.len(), 1);
    assert_eq!(
        descriptors[0].on_error,
        insert_workers::ErrorPolicy::RetryAfter(Duration::from_secs(1))
    );
}
