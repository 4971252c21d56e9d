//! Configuration tests
//!
//! The config file template is generated from `Config::to_toml()`, so these
//! tests parse it back to catch TOML syntax slips and fields that were added
//! to `Config` but never written out.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    match toml::from_str(toml_str) {
        Ok(file) => file,
        Err(e) => panic!("Config should parse.\nTOML:\n{}\nError: {:?}", toml_str, e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

/// Every resource schema survives the trip through the config file
#[test]
fn test_config_roundtrip_resources() {
    let config = Config::default();
    let file = parse(&config.to_toml());
    assert_eq!(file.resources.as_ref(), Some(&config.resources));
}

#[test]
fn test_config_roundtrip_with_overrides() {
    let mut config = Config::default();
    config.token = Some("secret \"quoted\"".to_string());
    config.strings.insert(
        "brands.title".to_string(),
        "Manufacturers".to_string(),
    );
    config.logging.file_rotation = LogRotation::Hourly;
    config.results_on_page = 50;

    let reloaded = Config::from_file(parse(&config.to_toml()), no_env);
    assert_eq!(reloaded.token, config.token);
    assert_eq!(reloaded.strings, config.strings);
    assert_eq!(reloaded.results_on_page, 50);
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
    assert_eq!(reloaded.color_palette, config.color_palette);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
api_url = "http://file.example/"
locale = "uk"
"#,
    );
    let env: HashMap<&str, &str> = [
        ("CATALOG_ADMIN_API_URL", "http://env.example"),
        ("CATALOG_ADMIN_TOKEN", "t0k"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_file(file, |k| env.get(k).map(|v| v.to_string()));
    assert_eq!(config.api_url, "http://env.example");
    assert_eq!(config.token.as_deref(), Some("t0k"));
    assert_eq!(config.locale, "uk");
}

#[test]
fn test_defaults_for_missing_and_invalid_values() {
    let file = parse(
        r#"
api_url = "http://file.example/"
token = ""
results_on_page = 0
color_palette = []
"#,
    );
    let config = Config::from_file(file, no_env);
    assert_eq!(config.api_url, "http://file.example");
    assert_eq!(config.token, None);
    assert_eq!(config.results_on_page, 20);
    assert_eq!(config.color_palette, default_palette());
    assert_eq!(config.resources, default_resources());
}

#[test]
fn test_invalid_palette_entries_and_zero_timeout_fall_back() {
    let file = parse(
        r##"
request_timeout_secs = 0
color_palette = ["#ff0000", "red", "#12345", "#00FF00", ""]
"##,
    );
    let config = Config::from_file(file, no_env);
    assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.color_palette, vec!["#ff0000", "#00FF00"]);

    let file = parse(
        r##"
request_timeout_secs = 3
color_palette = ["blue", "#zzzzzz"]
"##,
    );
    let config = Config::from_file(file, no_env);
    assert_eq!(config.request_timeout_secs, 3);
    assert_eq!(config.color_palette, default_palette());
}

#[test]
fn test_custom_resources_replace_defaults() {
    let file = parse(
        r#"
[[resources]]
name = "tags"
title = "Tags"
list_path = "/api/tag/"
items_key = "tags"
remove_path = "/api/tag/remove"

[[resources.fields]]
key = "label"
label = "Label"
"#,
    );
    let config = Config::from_file(file, no_env);
    assert_eq!(config.resources.len(), 1);

    let tags = config.resource("tags").unwrap();
    assert_eq!(tags.id_key, "_id");
    assert_eq!(tags.id_param, "id");
    assert!(tags.paginated);
    assert!(!tags.has_add());
    let label = &tags.fields[0];
    assert_eq!(label.kind, KindName::Text);
    assert!(label.editable);
    assert!(label.in_form);
}

#[test]
fn test_unknown_kind_is_a_parse_error() {
    let result: Result<FileConfig, _> = toml::from_str(
        r#"
[[resources]]
name = "x"
title = "X"
list_path = "/x"
items_key = "x"
[[resources.fields]]
key = "a"
label = "A"
kind = "slider"
"#,
    );
    assert!(result.is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_log_rotation_parsing() {
    assert_eq!(LogRotation::from_str("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::from_str("never"), LogRotation::Never);
    assert_eq!(LogRotation::from_str("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::Never.as_str(), "never");
}
