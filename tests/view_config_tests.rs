use trade_scatter::TradeError;
use trade_scatter::api::{DEFAULT_TRANSITION_DURATION_MS, REFERENCE_TOP_K, ViewConfig};

#[test]
fn defaults_show_latest_year_unlimited_and_animated() {
    let config = ViewConfig::default();
    assert_eq!(config.default_year, None);
    assert_eq!(config.top_k, None);
    assert_eq!(config.transition_duration_ms, DEFAULT_TRANSITION_DURATION_MS);
    assert!(config.is_animated());
    assert_eq!(REFERENCE_TOP_K, 40);
}

#[test]
fn builder_methods_compose() {
    let config = ViewConfig::new()
        .with_default_year(2018)
        .with_top_k(Some(REFERENCE_TOP_K))
        .without_animation();

    assert_eq!(config.default_year, Some(2018));
    assert_eq!(config.top_k, Some(40));
    assert!(!config.is_animated());
    config.validate().expect("valid config");
}

#[test]
fn json_round_trip_preserves_fields() {
    let config = ViewConfig::new().with_default_year(2017).with_top_k(Some(30));
    let json = config.to_json_pretty().expect("serialize");
    let restored = ViewConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn missing_json_fields_take_defaults() {
    let config = ViewConfig::from_json_str(r#"{ "top_k": 30 }"#).expect("parse");
    assert_eq!(config.top_k, Some(30));
    assert_eq!(config.default_year, None);
    assert_eq!(config.transition_duration_ms, DEFAULT_TRANSITION_DURATION_MS);
}

#[test]
fn invalid_json_and_zero_top_k_are_config_errors() {
    let err = ViewConfig::from_json_str("{ not json").expect_err("malformed json");
    assert!(matches!(err, TradeError::InvalidConfig(_)));

    let err = ViewConfig::from_json_str(r#"{ "top_k": 0 }"#).expect_err("zero top_k");
    assert!(matches!(err, TradeError::InvalidConfig(_)));
}
