use super::*;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.top_k, 5);
    assert_eq!(config.similarity_threshold, 0.20);
    assert_eq!(config.confidence_threshold, 85.0);
    assert_eq!(config.critic_backend, CriticBackend::Local);
    assert_eq!(config.query_instruction, DEFAULT_QUERY_INSTRUCTION);
    assert_eq!(config.retry_max_attempts, 5);
}

#[test]
fn test_config_default_validates() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_backend_parse_known_values() {
    assert_eq!(
        "remote".parse::<CriticBackend>().unwrap(),
        CriticBackend::Remote
    );
    assert_eq!(
        "local".parse::<CriticBackend>().unwrap(),
        CriticBackend::Local
    );
    assert_eq!(
        "mock".parse::<CriticBackend>().unwrap(),
        CriticBackend::Mock
    );
    // Case and whitespace tolerant, like the rest of the env parsing.
    assert_eq!(
        " Mock ".parse::<CriticBackend>().unwrap(),
        CriticBackend::Mock
    );
}

#[test]
fn test_backend_parse_unknown_value_fails_fast() {
    let err = "gemini".parse::<CriticBackend>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownBackend { value } if value == "gemini"));
}

#[test]
fn test_validate_zero_top_k() {
    let config = Config {
        top_k: 0,
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::ZeroTopK)));
}

#[test]
fn test_validate_zero_retry_attempts() {
    let config = Config {
        retry_max_attempts: 0,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroRetryAttempts)
    ));
}

#[test]
fn test_validate_similarity_threshold_range() {
    let config = Config {
        similarity_threshold: 1.5,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ThresholdOutOfRange {
            name: "similarity_threshold",
            ..
        })
    ));
}

#[test]
fn test_validate_confidence_threshold_scale_mixup() {
    // A 0-1 confidence threshold on the 0-100 scale is valid arithmetic but
    // wrong configuration; only out-of-range values are catchable here.
    let config = Config {
        confidence_threshold: 150.0,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ThresholdOutOfRange {
            name: "confidence_threshold",
            ..
        })
    ));
}

#[test]
fn test_retry_policy_from_config() {
    let config = Config::default();
    let policy = config.retry_policy();

    assert_eq!(policy.max_attempts, config.retry_max_attempts);
    assert_eq!(policy.base_delay, config.retry_base_delay);
    assert_eq!(policy.jitter, config.retry_jitter);
}

#[test]
fn test_query_overrides_default_is_empty() {
    let overrides = QueryOverrides::default();
    assert!(overrides.similarity_threshold.is_none());
    assert!(overrides.confidence_threshold.is_none());
}

#[test]
fn test_query_overrides_constructors() {
    assert_eq!(QueryOverrides::similarity(0.5).similarity_threshold, Some(0.5));
    assert_eq!(QueryOverrides::confidence(70.0).confidence_threshold, Some(70.0));
}
