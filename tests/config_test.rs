use std::fs;

use secdesk::config::Config;
use secdesk::error::SecdeskError;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("secdesk.yaml");
    fs::write(&path, content).expect("failed to write config");
    path
}

#[test]
fn test_load_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "base_url: https://admin.example.org/site/main\n");

    let config = Config::load(&path).unwrap();
    assert_eq!(config.page_size, 20);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(
        config.search_url().unwrap().as_str(),
        "https://admin.example.org/site/main/security/search/"
    );
    assert!(config.session_cookie.is_none());
}

#[test]
fn test_load_full_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
base_url: https://admin.example.org/
search_path: api/events/
update_path: api/events/update/
page_size: 50
timeout_secs: 5
connect_timeout_secs: 2
session_cookie: "sessionid=abc123"
csrf_token: "tok"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.page_size, 50);
    assert_eq!(
        config.update_url().unwrap().as_str(),
        "https://admin.example.org/api/events/update/"
    );
    assert_eq!(config.csrf_token.as_deref(), Some("tok"));
}

#[test]
fn test_debug_redacts_credentials() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "session_cookie: sessionid=abc123\ncsrf_token: secret-token\n",
    );

    let debug = format!("{:?}", Config::load(&path).unwrap());
    assert!(!debug.contains("abc123"));
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn test_invalid_yaml_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "page_size: [not, a, number]\n");

    assert!(matches!(
        Config::load(&path),
        Err(SecdeskError::YamlParse { .. })
    ));
}

#[test]
fn test_zero_page_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "page_size: 0\n");

    assert!(matches!(Config::load(&path), Err(SecdeskError::Config(_))));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");

    let err = Config::load_or_default(Some(&missing)).unwrap_err();
    assert!(matches!(err, SecdeskError::Io { .. }));
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn test_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "timeout_secs: soon\n");

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("secdesk.yaml"));
}
