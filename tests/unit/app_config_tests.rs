/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use crictag::app_config::{Config, FailurePolicy, LogLevel};
use crictag::UNKNOWN_LABEL;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.provider.endpoint, "http://localhost:11434");
    assert_eq!(config.provider.model, "llama3.3:latest");
    assert_eq!(config.provider.timeout_secs, 60);
    assert_eq!(config.provider.requests_per_minute, Some(60));
    assert_eq!(config.provider.temperature, None);
    assert_eq!(config.labeling.labels.len(), 31);
    assert_eq!(config.labeling.on_failure, FailurePolicy::Skip);
    assert!(config.labeling.check_connection);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.provider.endpoint = "localhost:11434".to_string();
    assert!(config.validate().is_err());
    config.provider.endpoint = "ftp://localhost:11434".to_string();
    assert!(config.validate().is_err());
    config.provider.endpoint = "http://gpu-box:11434".to_string();
    assert!(config.validate().is_ok());

    config.provider.model = "  ".to_string();
    assert!(config.validate().is_err());
    config.provider.model = "llama3.1:8b".to_string();

    config.provider.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.provider.timeout_secs = 30;

    config.provider.temperature = Some(3.5);
    assert!(config.validate().is_err());
    config.provider.temperature = Some(0.0);
    assert!(config.validate().is_ok());

    config.labeling.labels = vec!["SIX".to_string(), "".to_string()];
    assert!(config.validate().is_err());
    config.labeling.labels = vec!["six".to_string(), "four".to_string()];
    assert!(config.validate().is_ok());

    config.labeling.prompt_template = "Classify into {labels}".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_labelSet_shouldNormalizeAndAddSentinel() {
    let mut config = Config::default();
    config.labeling.labels = vec!["six".to_string(), " run out ".to_string()];

    let labels = config.label_set().unwrap();
    assert_eq!(labels.labels(), &["SIX", "RUN OUT", UNKNOWN_LABEL]);
}

#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "provider": {"model": "mistral:7b", "requests_per_minute": 0},
        "labeling": {"on_failure": "mark_unknown"},
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.provider.model, "mistral:7b");
    assert_eq!(config.provider.endpoint, "http://localhost:11434");
    assert_eq!(config.provider.requests_per_minute, Some(0));
    assert_eq!(config.labeling.on_failure, FailurePolicy::MarkUnknown);
    assert_eq!(config.labeling.labels.len(), 31);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_config_deserialize_withNullRate_shouldDisablePacing() {
    let config: Config = serde_json::from_str(r#"{"provider": {"requests_per_minute": null}}"#).unwrap();
    assert_eq!(config.provider.requests_per_minute, None);
}

#[test]
fn test_config_saveAndLoad_shouldRoundTrip() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.provider.model = "qwen2.5:14b".to_string();
    config.labeling.on_failure = FailurePolicy::MarkUnknown;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_config_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json")?;

    let error = Config::from_file(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
