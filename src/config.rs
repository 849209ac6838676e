use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_TICKER: &str = "TATASTEEL.NS";
pub const DEFAULT_PERIOD: &str = "5y";
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ticker: String,
    pub period: String,
    pub base_url: String,
    pub request_timeout_seconds: u64,
    /// Show charts on the terminal; when false, or when stderr is not a
    /// terminal, they are only logged.
    pub interactive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            period: DEFAULT_PERIOD.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_seconds: 10,
            interactive: true,
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Loads `path` when it exists, otherwise returns the built-in defaults.
pub fn load_or_default(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    if Path::new(path).exists() {
        load_config(path)
    } else {
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{ "interactive": false }"#).unwrap();
        assert!(!cfg.interactive);
        assert_eq!(cfg.ticker, DEFAULT_TICKER);
        assert_eq!(cfg.period, DEFAULT_PERIOD);
        assert_eq!(cfg.request_timeout_seconds, 10);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_or_default("does-not-exist/config.json").unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(cfg.interactive);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join("ma-lens-bad-config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_config(path.to_str().unwrap()).is_err());
        let _ = fs::remove_file(path);
    }
}
