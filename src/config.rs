use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::constants::{llm, network, oanda, trading};
use crate::error::ConfigError;

pub const CONFIG_PATH_VAR: &str = "FX_TRADER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Non-secret tunables read from `config.yaml`. Every field is optional.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmSettings,
    pub risk_pct: f64,
    pub request_timeout_secs: u64,
    pub dry_run: bool,
    pub broker_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            risk_pct: trading::DEFAULT_RISK_PCT,
            request_timeout_secs: network::DEFAULT_REQUEST_TIMEOUT_SECS,
            dry_run: false,
            broker_base_url: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmSettings {
    pub model: String,
    pub base_url: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: llm::DEFAULT_MODEL.to_string(),
            base_url: llm::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })
    }

    /// Reads the settings file if it exists; a missing file means defaults.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(path, &content)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OandaEnvironment {
    Practice,
    Live,
}

impl OandaEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            OandaEnvironment::Practice => oanda::PRACTICE_URL,
            OandaEnvironment::Live => oanda::LIVE_URL,
        }
    }
}

impl FromStr for OandaEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "practice" => Ok(OandaEnvironment::Practice),
            "live" => Ok(OandaEnvironment::Live),
            _ => Err(ConfigError::InvalidValue {
                name: "OANDA_ENVIRONMENT",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OandaEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OandaEnvironment::Practice => f.write_str("practice"),
            OandaEnvironment::Live => f.write_str("live"),
        }
    }
}

#[derive(Clone)]
pub struct OandaConfig {
    pub account_id: String,
    pub api_key: String,
    pub environment: OandaEnvironment,
    pub base_url: String,
}

#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Immutable run configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub oanda: OandaConfig,
    pub llm: LlmConfig,
    /// Percent of balance risked on the trade, in (0, 100].
    pub risk_pct: Decimal,
    pub request_timeout_secs: u64,
    pub dry_run: bool,
}

impl fmt::Debug for OandaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OandaConfig")
            .field("account_id", &self.account_id)
            .field("api_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl AppConfig {
    /// Loads `.env`, the optional settings file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let settings = Settings::from_file(&path)?;

        Self::from_sources(settings, |name| std::env::var(name).ok())
    }

    /// Builds the config from settings plus an environment lookup.
    /// Empty variables count as unset.
    pub fn from_sources<F>(settings: Settings, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| env(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar { name });

        let account_id = required("OANDA_ACCOUNT_ID")?;
        let oanda_api_key = required("OANDA_API_KEY")?;
        let environment = match lookup("OANDA_ENVIRONMENT") {
            Some(v) => v.parse::<OandaEnvironment>()?,
            None => OandaEnvironment::Practice,
        };
        let llm_api_key = required("GOOGLE_API_KEY")?;

        let model = lookup("LLM_MODEL").unwrap_or(settings.llm.model);
        let llm_base_url = lookup("LLM_BASE_URL").unwrap_or(settings.llm.base_url);

        let risk_pct = match lookup("RISK_PCT") {
            Some(v) => v.parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                name: "RISK_PCT",
                value: v.clone(),
            })?,
            None => settings.risk_pct,
        };
        let invalid_risk = || ConfigError::InvalidValue {
            name: "RISK_PCT",
            value: risk_pct.to_string(),
        };
        if !risk_pct.is_finite() || risk_pct <= 0.0 || risk_pct > 100.0 {
            return Err(invalid_risk());
        }
        let risk_pct = Decimal::try_from(risk_pct).map_err(|_| invalid_risk())?;

        if settings.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "request_timeout_secs",
                value: "0".to_string(),
            });
        }

        let dry_run = match lookup("DRY_RUN") {
            Some(v) => parse_flag("DRY_RUN", &v)?,
            None => settings.dry_run,
        };

        let broker_base_url = settings
            .broker_base_url
            .unwrap_or_else(|| environment.base_url().to_string());

        Ok(Self {
            oanda: OandaConfig {
                account_id,
                api_key: oanda_api_key,
                environment,
                base_url: broker_base_url.trim_end_matches('/').to_string(),
            },
            llm: LlmConfig {
                api_key: llm_api_key,
                base_url: llm_base_url,
                model,
            },
            risk_pct,
            request_timeout_secs: settings.request_timeout_secs,
            dry_run,
        })
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}
