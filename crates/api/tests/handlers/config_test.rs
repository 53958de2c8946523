use std::collections::HashMap;

use lessonbook_api::config::ApiConfig;
use lessonbook_core::config::EngineConfig;
use pretty_assertions::assert_eq;
use tracing::Level;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults_with_only_database_url() {
    let config =
        ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/lessonbook")]))
            .unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.database_url, "postgres://localhost/lessonbook");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.engine, EngineConfig::default());
    assert_eq!(config.server_addr(), "0.0.0.0:3000");
}

#[test]
fn test_missing_database_url_is_an_error() {
    let result = ApiConfig::from_lookup(lookup(&[("API_PORT", "8080")]));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("DATABASE_URL"));
}

#[test]
fn test_overrides_are_read() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://db/lessons"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "debug"),
        ("API_CORS_ORIGINS", "http://localhost:5173, https://school.example ,"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
        ("LESSON_MORNING_START", "9"),
        ("LESSON_COMMON_PRICE", "1200"),
        ("LESSON_HIGH_PRICE", "1500"),
        ("LESSON_HORIZON_DAYS", "14"),
        ("LESSON_THRESHOLD", "4"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "http://localhost:5173".to_string(),
            "https://school.example".to_string(),
        ])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.engine.morning_start, 9);
    assert_eq!(config.engine.common_price, 1200);
    assert_eq!(config.engine.high_price, 1500);
    assert_eq!(config.engine.horizon_days, 14);
    assert_eq!(config.engine.lesson_threshold, 4);
    assert_eq!(config.engine.evening_end, 23);
}

#[test]
fn test_unparsable_number_names_the_variable() {
    let result = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://db/lessons"),
        ("LESSON_HIGH_PRICE", "expensive"),
    ]));

    let message = result.unwrap_err().to_string();
    assert!(message.contains("LESSON_HIGH_PRICE"), "{}", message);
}

#[test]
fn test_inconsistent_engine_constants_are_rejected() {
    let result = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://db/lessons"),
        ("LESSON_MORNING_START", "20"),
        ("LESSON_EVENING_END", "18"),
    ]));

    let message = result.unwrap_err().to_string();
    assert!(message.contains("Invalid lesson engine configuration"), "{}", message);
}

#[test]
fn test_oversized_horizon_is_rejected() {
    let result = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://db/lessons"),
        ("LESSON_HORIZON_DAYS", "4611686018427387903"),
    ]));

    let err = result.unwrap_err();
    assert!(
        err.to_string().contains("Invalid lesson engine configuration"),
        "{}",
        err
    );
    assert_eq!(
        err.root_cause().to_string(),
        "booking horizon of 4611686018427387903 days exceeds 366 days"
    );
}

#[test]
fn test_unknown_log_level_falls_back_to_info() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://db/lessons"),
        ("LOG_LEVEL", "verbose"),
    ]))
    .unwrap();

    assert_eq!(config.log_level, Level::INFO);
}
