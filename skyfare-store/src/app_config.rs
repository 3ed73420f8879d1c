use serde::Deserialize;
use skyfare_catalog::CurrencyTable;
use skyfare_shared::Masked;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub duffel: DuffelConfig,
    #[serde(default)]
    pub currency: CurrencyTable,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DuffelConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub access_token: Masked<String>,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_offer_limit")]
    pub offer_limit: u32,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String { "https://api.duffel.com".to_string() }
fn default_api_version() -> String { "v2".to_string() }
fn default_offer_limit() -> u32 { 20 }
fn default_timeout() -> u64 { 30 }

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_base_price")]
    pub default_base_price: u64,
    #[serde(default = "default_fallback_max_duration")]
    pub fallback_max_duration: u32,
    #[serde(default = "default_debounce_ms")]
    pub typeahead_debounce_ms: u64,
    #[serde(default = "default_min_chars")]
    pub typeahead_min_chars: usize,
    /// Idle time after which a search session is dropped
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
    #[serde(default = "default_session_sweep")]
    pub session_sweep_seconds: u64,
}

fn default_base_price() -> u64 { 5000 }
fn default_fallback_max_duration() -> u32 { 1200 }
fn default_debounce_ms() -> u64 { 300 }
fn default_min_chars() -> usize { 2 }
fn default_session_ttl() -> u64 { 1800 }
fn default_session_sweep() -> u64 { 60 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_base_price: default_base_price(),
            fallback_max_duration: default_fallback_max_duration(),
            typeahead_debounce_ms: default_debounce_ms(),
            typeahead_min_chars: default_min_chars(),
            session_ttl_seconds: default_session_ttl(),
            session_sweep_seconds: default_session_sweep(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // developer overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. SKYFARE__DUFFEL__ACCESS_TOKEN=duffel_test_...
            .add_source(config::Environment::with_prefix("SKYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [duffel]
            access_token = "duffel_test_123"
            "#,
        )
        .expect("Failed to load config");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.duffel.base_url, "https://api.duffel.com");
        assert_eq!(config.duffel.offer_limit, 20);
        assert_eq!(config.duffel.access_token.expose(), "duffel_test_123");
        assert_eq!(config.currency.default, "INR");
        assert_eq!(config.currency.rate("usd"), Some(86.0));
        assert_eq!(config.search.default_base_price, 5000);
        assert_eq!(config.search.session_ttl_seconds, 1800);
        assert!(!format!("{:?}", config).contains("duffel_test_123"));
    }

    #[test]
    fn test_rate_table_override() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 3000

            [duffel]
            access_token = "t"

            [currency]
            default = "GBP"

            [currency.rates]
            USD = 0.79
            "#,
        )
        .unwrap();

        assert_eq!(config.currency.default, "GBP");
        assert_eq!(config.currency.rates.len(), 1);
        assert_eq!(config.currency.convert(100.0, "USD"), 79.0);
    }
}
