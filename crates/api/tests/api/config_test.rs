use std::collections::HashMap;

use lavagem_api::config::ApiConfig;
use lavagem_core::scheduler::UpdatePolicy;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/lavagem")]))
        .unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.request_timeout, 30);
    assert!(config.cors_origins.is_none());
    assert_eq!(
        config.scheduler.business_hours.window().to_string(),
        "08:00 - 18:00"
    );
    assert_eq!(config.scheduler.update_policy, UpdatePolicy::RecheckOverlap);
}

#[test]
fn test_overrides() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://localhost/lavagem"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://a.test, http://b.test,"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
        ("BUSINESS_HOURS_START", "07:30"),
        ("BUSINESS_HOURS_END", "20:00:00"),
        ("UPDATE_RECHECK_OVERLAP", "false"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(
        config.scheduler.business_hours.window().to_string(),
        "07:30 - 20:00"
    );
    assert_eq!(config.scheduler.update_policy, UpdatePolicy::SkipOverlap);
}

#[rstest]
#[case(&[])]
#[case(&[("DATABASE_URL", "postgres://x"), ("API_PORT", "http")])]
#[case(&[("DATABASE_URL", "postgres://x"), ("BUSINESS_HOURS_START", "8am")])]
#[case(&[
    ("DATABASE_URL", "postgres://x"),
    ("BUSINESS_HOURS_START", "18:00"),
    ("BUSINESS_HOURS_END", "08:00"),
])]
#[case(&[("DATABASE_URL", "postgres://x"), ("UPDATE_RECHECK_OVERLAP", "maybe")])]
fn test_invalid_configuration(#[case] pairs: &[(&str, &str)]) {
    assert!(ApiConfig::from_lookup(lookup(pairs)).is_err());
}
