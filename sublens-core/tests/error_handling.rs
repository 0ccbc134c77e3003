use sublens_core::{CollectorError, ConfigError, ExportError, RedditApiError};

#[test]
fn test_error_display_carries_context() {
    let rate_limited = CollectorError::RedditApi(RedditApiError::RateLimitExceeded {
        retry_after: 60,
    });
    assert!(rate_limited.to_string().contains("60"));

    let forbidden = CollectorError::RedditApi(RedditApiError::Forbidden {
        resource: "/r/private/hot".to_string(),
    });
    assert!(forbidden.to_string().contains("/r/private/hot"));

    let missing = CollectorError::Config(ConfigError::MissingField {
        field: "reddit.client_id".to_string(),
    });
    assert!(missing.to_string().contains("reddit.client_id"));
}

#[test]
fn test_nested_errors_convert_upward() {
    let api_error: CollectorError = RedditApiError::InvalidToken.into();
    assert!(matches!(
        api_error,
        CollectorError::RedditApi(RedditApiError::InvalidToken)
    ));

    let config_error: CollectorError = ConfigError::FileNotFound {
        path: "missing.toml".to_string(),
    }
    .into();
    assert!(matches!(config_error, CollectorError::Config(_)));

    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let export_error: CollectorError = ExportError::from(io_error).into();
    assert!(matches!(export_error, CollectorError::Export(_)));
}

#[test]
fn test_toml_parse_error_converts() {
    let parse_failure = toml::from_str::<toml::Value>("this is = not [ valid").unwrap_err();
    let config_error: ConfigError = parse_failure.into();
    assert!(matches!(config_error, ConfigError::Parse(_)));
}
