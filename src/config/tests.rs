use super::*;

#[test]
fn test_parse_full_config() {
    let config = Config::parse(
        r#"
[check]
fail_fast = true

[output]
format = "json"
"#,
    )
    .unwrap();

    assert!(config.check.fail_fast);
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert!(!config.check.fail_fast);
    assert_eq!(config.output.format, OutputFormat::Human);
}

#[test]
fn test_unknown_keys_are_rejected() {
    let err = Config::parse("[check]\nfail_fats = true\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_bad_format_is_rejected() {
    assert!(Config::parse("[output]\nformat = \"xml\"\n").is_err());
}

#[test]
fn test_roundtrip() {
    let mut config = Config::default();
    config.check.fail_fast = true;

    let text = config.to_toml().unwrap();
    assert_eq!(Config::parse(&text).unwrap(), config);
}

#[test]
fn test_discover() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());

    std::fs::write(dir.path().join(CONFIG_FILE), "[check]\nfail_fast = true\n").unwrap();
    assert!(Config::discover(dir.path()).unwrap().check.fail_fast);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
