//! Build-time configuration. Values are baked in by `trunk build` from the
//! environment and handed to components through props.

use log::LevelFilter;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix of every REST endpoint, without a trailing slash.
    pub api_base: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(option_env!("ALUMNI_API_BASE"), option_env!("ALUMNI_LOG_LEVEL"))
    }

    fn from_values(api_base: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base = api_base
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();
        let log_level = log_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);
        Self { api_base, log_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset_or_invalid() {
        let config = AppConfig::from_values(None, Some("chatty"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn explicit_values_win() {
        let config = AppConfig::from_values(Some("https://alumni.example.edu/api/"), Some("debug"));
        assert_eq!(config.api_base, "https://alumni.example.edu/api");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
