//! Tests for configuration loading and priority resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate FOLIO_* variables are marked with #[serial].

use folio_common::config::{
    load_toml_config, resolve_email_settings, resolve_setting, resolve_toml_config,
    EmailSettings, TomlConfig,
};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn email_settings() -> EmailSettings {
    EmailSettings {
        endpoint: "https://api.emailjs.com".into(),
        service_id: "service_toml".into(),
        template_id: "template_toml".into(),
        public_key: "public_toml".into(),
        private_key: None,
        to_email: "owner@example.com".into(),
        timeout_secs: 30,
    }
}

#[test]
fn test_load_explicit_file() {
    let file = write_config(
        r#"
        port = 9000
        resume_path = "assets/resume.pdf"

        [logging]
        level = "warn"
        "#,
    );

    let config = load_toml_config(file.path()).unwrap();
    assert_eq!(config.port, Some(9000));
    assert_eq!(config.logging.level.as_deref(), Some("warn"));
    assert!(config.email.is_none());
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = resolve_toml_config(Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_invalid_toml_is_error() {
    let file = write_config("port = \"not a number\"");
    assert!(load_toml_config(file.path()).is_err());
}

#[test]
#[serial]
fn test_resolve_setting_priority() {
    env::remove_var("FOLIO_TEST_PORT");

    // Default only
    assert_eq!(resolve_setting(None, "FOLIO_TEST_PORT", None, 5780u16), 5780);

    // TOML beats default
    assert_eq!(resolve_setting(None, "FOLIO_TEST_PORT", Some(7000u16), 5780), 7000);

    // ENV beats TOML
    env::set_var("FOLIO_TEST_PORT", "7100");
    assert_eq!(resolve_setting(None, "FOLIO_TEST_PORT", Some(7000u16), 5780), 7100);

    // CLI beats ENV
    assert_eq!(resolve_setting(Some(7200u16), "FOLIO_TEST_PORT", Some(7000), 5780), 7200);

    env::remove_var("FOLIO_TEST_PORT");
}

#[test]
#[serial]
fn test_resolve_setting_ignores_unparseable_env() {
    env::set_var("FOLIO_TEST_PORT", "eighty");
    assert_eq!(resolve_setting(None, "FOLIO_TEST_PORT", Some(7000u16), 5780), 7000);
    env::remove_var("FOLIO_TEST_PORT");
}

#[test]
#[serial]
fn test_email_env_overrides_toml() {
    env::set_var("FOLIO_EMAIL_PUBLIC_KEY", "public_env");
    env::set_var("FOLIO_EMAIL_PRIVATE_KEY", "private_env");

    let settings = resolve_email_settings(Some(email_settings())).unwrap();
    assert_eq!(settings.public_key, "public_env");
    assert_eq!(settings.private_key.as_deref(), Some("private_env"));
    assert_eq!(settings.service_id, "service_toml");

    env::remove_var("FOLIO_EMAIL_PUBLIC_KEY");
    env::remove_var("FOLIO_EMAIL_PRIVATE_KEY");
}

#[test]
#[serial]
fn test_blank_env_does_not_override() {
    env::set_var("FOLIO_EMAIL_SERVICE_ID", "   ");
    let settings = resolve_email_settings(Some(email_settings())).unwrap();
    assert_eq!(settings.service_id, "service_toml");
    env::remove_var("FOLIO_EMAIL_SERVICE_ID");
}

#[test]
#[serial]
fn test_incomplete_email_disables_relay() {
    let mut incomplete = email_settings();
    incomplete.template_id = String::new();
    assert!(resolve_email_settings(Some(incomplete)).is_none());
    assert!(resolve_email_settings(None).is_none());
}

#[test]
fn test_round_trip_through_toml() {
    let config = TomlConfig {
        port: Some(8123),
        allowed_origins: vec!["https://example.com".into()],
        email: Some(email_settings()),
        ..TomlConfig::default()
    };
    let text = toml::to_string(&config).unwrap();
    let file = write_config(&text);
    assert_eq!(load_toml_config(file.path()).unwrap(), config);
}
