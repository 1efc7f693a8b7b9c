//! Unit tests for configuration structures and parsing.

#[cfg(test)]
mod config_tests {
    use crate::config::*;
    use crate::constants::{llm, network, oanda};
    use crate::error::ConfigError;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("OANDA_ACCOUNT_ID", "101-004-1234567-001"),
            ("OANDA_API_KEY", "oanda-secret"),
            ("GOOGLE_API_KEY", "google-secret"),
        ]
    }

    // ============= Settings Tests =============

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();

        assert_eq!(settings.risk_pct, 1.0);
        assert_eq!(settings.request_timeout_secs, network::DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(!settings.dry_run);
        assert_eq!(settings.broker_base_url, None);
        assert_eq!(settings.llm.model, llm::DEFAULT_MODEL);
        assert_eq!(settings.llm.base_url, llm::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_settings_deserialize() {
        let yaml = r#"
risk_pct: 0.5
request_timeout_secs: 10
dry_run: true
broker_base_url: "http://localhost:8080"
llm:
  model: "gpt-4o-mini"
  base_url: "https://api.openai.com/v1"
"#;
        let settings = Settings::from_yaml("config.yaml", yaml).unwrap();

        assert_eq!(settings.risk_pct, 0.5);
        assert_eq!(settings.request_timeout_secs, 10);
        assert!(settings.dry_run);
        assert_eq!(settings.broker_base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.llm.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_settings_partial_uses_defaults() {
        let yaml = r#"
dry_run: true
llm:
  model: "gemini-1.5-pro"
"#;
        let settings = Settings::from_yaml("config.yaml", yaml).unwrap();

        assert!(settings.dry_run);
        assert_eq!(settings.risk_pct, 1.0);
        assert_eq!(settings.llm.model, "gemini-1.5-pro");
        assert_eq!(settings.llm.base_url, llm::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_settings_strips_bom_and_accepts_empty() {
        let settings = Settings::from_yaml("config.yaml", "\u{feff}").unwrap();
        assert_eq!(settings, Settings::default());

        let settings = Settings::from_yaml("config.yaml", "\u{feff}risk_pct: 2.0\n").unwrap();
        assert_eq!(settings.risk_pct, 2.0);
    }

    #[test]
    fn test_settings_malformed_yaml() {
        let err = Settings::from_yaml("config.yaml", "risk_pct: [oops").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_settings_missing_file_is_default() {
        let settings = Settings::from_file("definitely/not/here/config.yaml").unwrap();
        assert_eq!(settings, Settings::default());
    }

    // ============= OandaEnvironment Tests =============

    #[test]
    fn test_environment_parse() {
        assert_eq!("practice".parse::<OandaEnvironment>().unwrap(), OandaEnvironment::Practice);
        assert_eq!("LIVE".parse::<OandaEnvironment>().unwrap(), OandaEnvironment::Live);
        assert!("sandbox".parse::<OandaEnvironment>().is_err());
    }

    #[test]
    fn test_environment_base_url() {
        assert_eq!(OandaEnvironment::Practice.base_url(), oanda::PRACTICE_URL);
        assert_eq!(OandaEnvironment::Live.base_url(), oanda::LIVE_URL);
    }

    // ============= AppConfig Tests =============

    #[test]
    fn test_app_config_from_env() {
        let config = AppConfig::from_sources(Settings::default(), env_from(&full_env())).unwrap();

        assert_eq!(config.oanda.account_id, "101-004-1234567-001");
        assert_eq!(config.oanda.api_key, "oanda-secret");
        assert_eq!(config.oanda.environment, OandaEnvironment::Practice);
        assert_eq!(config.oanda.base_url, oanda::PRACTICE_URL);
        assert_eq!(config.llm.api_key, "google-secret");
        assert_eq!(config.llm.model, llm::DEFAULT_MODEL);
        assert_eq!(config.risk_pct, Decimal::ONE);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_app_config_missing_account_id() {
        let env = env_from(&[("OANDA_API_KEY", "k"), ("GOOGLE_API_KEY", "g")]);
        let err = AppConfig::from_sources(Settings::default(), env).unwrap_err();

        assert!(matches!(err, ConfigError::MissingVar { name: "OANDA_ACCOUNT_ID" }));
    }

    #[test]
    fn test_app_config_missing_api_key() {
        let env = env_from(&[("OANDA_ACCOUNT_ID", "acc"), ("GOOGLE_API_KEY", "g")]);
        let err = AppConfig::from_sources(Settings::default(), env).unwrap_err();

        assert!(matches!(err, ConfigError::MissingVar { name: "OANDA_API_KEY" }));
    }

    #[test]
    fn test_app_config_empty_value_counts_as_missing() {
        let env = env_from(&[
            ("OANDA_ACCOUNT_ID", "   "),
            ("OANDA_API_KEY", "k"),
            ("GOOGLE_API_KEY", "g"),
        ]);
        let err = AppConfig::from_sources(Settings::default(), env).unwrap_err();

        assert!(matches!(err, ConfigError::MissingVar { name: "OANDA_ACCOUNT_ID" }));
    }

    #[test]
    fn test_app_config_missing_google_key() {
        let env = env_from(&[("OANDA_ACCOUNT_ID", "acc"), ("OANDA_API_KEY", "k")]);
        let err = AppConfig::from_sources(Settings::default(), env).unwrap_err();

        assert!(matches!(err, ConfigError::MissingVar { name: "GOOGLE_API_KEY" }));
    }

    #[test]
    fn test_app_config_live_environment() {
        let mut pairs = full_env();
        pairs.push(("OANDA_ENVIRONMENT", "live"));
        let config = AppConfig::from_sources(Settings::default(), env_from(&pairs)).unwrap();

        assert_eq!(config.oanda.environment, OandaEnvironment::Live);
        assert_eq!(config.oanda.base_url, oanda::LIVE_URL);
    }

    #[test]
    fn test_app_config_invalid_environment() {
        let mut pairs = full_env();
        pairs.push(("OANDA_ENVIRONMENT", "paper"));
        let err = AppConfig::from_sources(Settings::default(), env_from(&pairs)).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { name: "OANDA_ENVIRONMENT", .. }));
    }

    #[test]
    fn test_app_config_env_overrides_settings() {
        let mut pairs = full_env();
        pairs.push(("LLM_MODEL", "gemini-2.5-pro"));
        pairs.push(("RISK_PCT", "0.25"));
        pairs.push(("DRY_RUN", "yes"));

        let settings = Settings {
            risk_pct: 2.0,
            ..Settings::default()
        };
        let config = AppConfig::from_sources(settings, env_from(&pairs)).unwrap();

        assert_eq!(config.llm.model, "gemini-2.5-pro");
        assert_eq!(config.risk_pct, Decimal::new(25, 2));
        assert!(config.dry_run);
    }

    #[test]
    fn test_app_config_rejects_bad_risk() {
        let mut pairs = full_env();
        pairs.push(("RISK_PCT", "one percent"));
        let err = AppConfig::from_sources(Settings::default(), env_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "RISK_PCT", .. }));

        let settings = Settings {
            risk_pct: 0.0,
            ..Settings::default()
        };
        let err = AppConfig::from_sources(settings, env_from(&full_env())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "RISK_PCT", .. }));
    }

    #[test]
    fn test_app_config_rejects_bad_dry_run_flag() {
        let mut pairs = full_env();
        pairs.push(("DRY_RUN", "maybe"));
        let err = AppConfig::from_sources(Settings::default(), env_from(&pairs)).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { name: "DRY_RUN", .. }));
    }

    #[test]
    fn test_app_config_broker_url_override_trims_slash() {
        let settings = Settings {
            broker_base_url: Some("http://127.0.0.1:9000/".to_string()),
            ..Settings::default()
        };
        let config = AppConfig::from_sources(settings, env_from(&full_env())).unwrap();

        assert_eq!(config.oanda.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_app_config_debug_redacts_secrets() {
        let config = AppConfig::from_sources(Settings::default(), env_from(&full_env())).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("oanda-secret"));
        assert!(!debug.contains("google-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("101-004-1234567-001"));
    }
}
