/*!
 * Tests for application configuration
 */

use archivist::app_config::{Config, LogLevel, TranslationProvider};
use archivist::errors::ConfigError;

#[test]
fn test_config_fromMinimalJson_shouldFillDefaults() {
    let config: Config = serde_json::from_str(r#"{"translation": {"provider": "mock"}}"#).unwrap();

    assert!(config.translation.enabled);
    assert_eq!(config.translation.provider, TranslationProvider::Mock);
    assert_eq!(config.translation.target_language, "en");
    assert_eq!(config.translation.available_providers.len(), 3);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.database_path.is_none());
    assert!(config.translation_available());
}

#[test]
fn test_config_yandexDefaults_shouldUseProviderProfile() {
    let config = Config::default();
    assert_eq!(config.translation.get_max_chunk_length(), 9999);
    assert_eq!(config.translation.get_concurrent_requests(), 4);
    assert_eq!(config.translation.get_timeout_secs(), 30);
}

#[test]
fn test_config_providerEntry_shouldOverrideProfile() {
    let json = r#"{
        "translation": {
            "provider": "yandex",
            "target_language": "de",
            "available_providers": [
                {"type": "yandex", "api_key": "secret", "max_chunk_length": 500, "concurrent_requests": 2}
            ]
        }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.translation.get_api_key(), "secret");
    assert_eq!(config.translation.get_max_chunk_length(), 500);
    assert_eq!(config.translation.get_concurrent_requests(), 2);
    assert!(config.translation.validate().is_ok());

    let options = config.translation.translation_options();
    assert_eq!(options.default_target_language, "de");
    assert_eq!(options.max_chunk_length, 500);
}

#[test]
fn test_validate_whenDisabled_shouldRejectFirst() {
    let mut config = Config::default();
    config.translation.enabled = false;
    assert_eq!(config.translation.validate(), Err(ConfigError::TranslationDisabled));
}

#[test]
fn test_validate_withUnknownTargetLanguage_shouldReject() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.translation.target_language = "klingon".to_string();
    assert_eq!(
        config.translation.validate(),
        Err(ConfigError::InvalidLanguage("klingon".to_string()))
    );
}

#[test]
fn test_validate_withZeroLimits_shouldReject() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;

    config.translation.active_provider_config_mut().max_chunk_length = 0;
    assert_eq!(config.translation.validate(), Err(ConfigError::InvalidChunkLength));

    config.translation.active_provider_config_mut().max_chunk_length = 100;
    config.translation.active_provider_config_mut().concurrent_requests = 0;
    assert_eq!(config.translation.validate(), Err(ConfigError::InvalidConcurrency));
}

#[test]
fn test_config_withChunkLengthAboveApiLimit_shouldCapToProvider() {
    let json = r#"{
        "translation": {
            "provider": "yandex",
            "available_providers": [{"type": "yandex", "api_key": "secret", "max_chunk_length": 20000}]
        }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert!(config.translation.validate().is_ok());
    assert_eq!(config.translation.get_max_chunk_length(), 9999);
    assert_eq!(config.translation.translation_options().max_chunk_length, 9999);
}

#[test]
fn test_config_withZeroLimits_shouldNotFallBackToDefaults() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.translation.active_provider_config_mut().max_chunk_length = 0;
    config.translation.active_provider_config_mut().concurrent_requests = 0;

    // The getters agree with validation instead of hiding the bad value
    assert_eq!(config.translation.get_max_chunk_length(), 0);
    assert_eq!(config.translation.get_concurrent_requests(), 0);
    assert!(!config.translation_available());
}

#[test]
fn test_config_serialization_shouldRoundTripProvider() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;

    let json = serde_json::to_string_pretty(&config).unwrap();
    assert!(json.contains(r#""provider": "anthropic""#));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.translation.provider, TranslationProvider::Anthropic);
}
