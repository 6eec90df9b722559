use crate::config::models::AppConfig;

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());

    // 验证默认值
    assert_eq!(config.database.url, "sqlite://sentinel.db?mode=rwc");
    assert_eq!(config.api.bind_address, "0.0.0.0:5000");
    assert_eq!(config.simulation.tick_interval_seconds, 5);
    assert_eq!(config.simulation.default_experiment_duration_seconds, 30);
    assert_eq!(
        config.simulation.services,
        vec!["frontend", "backend", "database"]
    );
    assert!(config.simulation.seed_on_startup);
    assert!(config.simulation.random_seed.is_none());
}

#[test]
fn test_config_from_toml() {
    let toml_content = r#"
[database]
url = "sqlite::memory:"
max_connections = 1

[api]
bind_address = "127.0.0.1:9090"

[simulation]
tick_interval_seconds = 2
services = ["frontend", "checkout"]
random_seed = 7

[observability]
log_level = "debug"
log_format = "json"
"#;

    let config = AppConfig::from_toml(toml_content).unwrap();

    assert_eq!(config.database.url, "sqlite::memory:");
    assert_eq!(config.database.max_connections, 1);
    assert_eq!(config.api.bind_address, "127.0.0.1:9090");
    assert!(config.api.cors_enabled);
    assert_eq!(config.simulation.tick_interval_seconds, 2);
    assert_eq!(config.simulation.services, vec!["frontend", "checkout"]);
    assert_eq!(config.simulation.random_seed, Some(7));
    assert_eq!(config.simulation.error_sample_probability, 0.05);
    assert_eq!(config.observability.log_format, "json");
}

#[test]
fn test_config_to_toml() {
    let config = AppConfig::default();
    let toml_str = config.to_toml().unwrap();

    assert!(toml_str.contains("[simulation]"));
    assert!(toml_str.contains("tick_interval_seconds = 5"));

    let parsed = AppConfig::from_toml(&toml_str).unwrap();
    assert_eq!(parsed.api.bind_address, config.api.bind_address);
    assert_eq!(parsed.simulation.services, config.simulation.services);
}

#[test]
fn test_memory_store_url() {
    let config = AppConfig::from_toml(
        r#"
[database]
url = "memory://"
"#,
    )
    .unwrap();
    assert!(config.database.uses_memory_store());
    assert!(!AppConfig::default().database.uses_memory_store());
}
