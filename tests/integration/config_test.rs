// Saved configuration flowing into a check

use std::fs;
use std::time::Duration;

use m3uc::core::config::{CheckOptions, Config};
use m3uc::core::probe::NonHttpPolicy;
use tempfile::tempdir;

#[test]
fn test_saved_settings_reach_check_options() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("m3uc").join("config.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut config = Config::default();
    config.set_value("timeout", "4").unwrap();
    config.set_value("workers", "25").unwrap();
    config.set_value("strict-schemes", "yes").unwrap();
    config.set_value("denylist", "Portal.Example.com, ads.example.net").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);

    let options = CheckOptions::from_config(&loaded);
    assert_eq!(options.timeout, Duration::from_secs(4));
    assert_eq!(options.workers, 25);
    assert_eq!(options.non_http, NonHttpPolicy::Strict);

    let validator = options.validator();
    assert!(validator.validate("http://portal.example.com/live.m3u8").is_some());
    assert!(validator.validate("http://cdn.example.com/live.m3u8").is_none());
}

#[test]
fn test_command_line_overrides_win() {
    let mut config = Config::default();
    config.timeout_secs = 30;
    config.workers = 2;

    let options = CheckOptions::from_config(&config)
        .with_timeout_secs(Some(3))
        .unwrap()
        .with_workers(None)
        .unwrap();

    assert_eq!(options.timeout, Duration::from_secs(3));
    assert_eq!(options.workers, 2);
    assert!(CheckOptions::from_config(&config).with_workers(Some(0)).is_err());
}

#[test]
fn test_unknown_key_is_rejected_and_config_unchanged() {
    let mut config = Config::default();
    assert!(config.set_value("colour", "blue").is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn test_hand_edited_zero_timeout_does_not_reach_checks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "timeout_secs": 0, "strict_schemes": true }"#).unwrap();

    let options = CheckOptions::from_config(&Config::load_from(&path).unwrap());
    assert_eq!(options.timeout, Duration::from_secs(10));
    assert_eq!(options.non_http, NonHttpPolicy::Optimistic);
}
