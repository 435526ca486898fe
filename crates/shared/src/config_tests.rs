use super::*;

#[test]
fn test_load_applies_defaults() {
    temp_env::with_vars(
        [
            ("PUC__DATABASE__URL", Some("postgres://localhost/puc_test")),
            ("RUN_MODE", Some("test-defaults")),
        ],
        || {
            let config = AppConfig::load().unwrap();

            assert_eq!(config.database.url, "postgres://localhost/puc_test");
            assert_eq!(config.database.max_connections, 10);
            assert_eq!(config.database.min_connections, 1);
            assert_eq!(config.database.connect_timeout_secs, 5);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.reporting.timezone, "Asia/Kolkata");
            assert!(config.pricing.prices.is_empty());
        },
    );
}

#[test]
fn test_load_reads_price_entries_from_environment() {
    temp_env::with_vars(
        [
            ("PUC__DATABASE__URL", Some("postgres://localhost/puc_test")),
            ("PUC__PRICING__PRICES__2W_6M", Some("150.00")),
            ("PUC__PRICING__PRICES__4W_12M", Some("600.50")),
            ("RUN_MODE", Some("test-prices")),
        ],
        || {
            let config = AppConfig::load().unwrap();

            assert_eq!(
                config.pricing.prices.get("2w_6m").map(String::as_str),
                Some("150.00")
            );
            assert_eq!(
                config.pricing.prices.get("4w_12m").map(String::as_str),
                Some("600.50")
            );
        },
    );
}

#[test]
fn test_load_overrides_server_and_timezone() {
    temp_env::with_vars(
        [
            ("PUC__DATABASE__URL", Some("postgres://localhost/puc_test")),
            ("PUC__SERVER__PORT", Some("5000")),
            ("PUC__REPORTING__TIMEZONE", Some("UTC")),
            ("RUN_MODE", Some("test-overrides")),
        ],
        || {
            let config = AppConfig::load().unwrap();

            assert_eq!(config.server.port, 5000);
            assert_eq!(config.reporting.timezone, "UTC");
        },
    );
}

#[test]
fn test_load_fails_without_database_url() {
    temp_env::with_vars(
        [
            ("PUC__DATABASE__URL", None::<&str>),
            ("RUN_MODE", Some("test-missing")),
        ],
        || {
            assert!(AppConfig::load().is_err());
        },
    );
}
