use super::*;
use log::LevelFilter;
use std::str::FromStr;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &RouterConfig) -> ConfigResult<()> {
        Self::validate_server_settings(config)?;
        Self::validate_provider(config)?;
        Self::parse_log_level(&config.log_level)?;
        Ok(())
    }

    fn validate_server_settings(config: &RouterConfig) -> ConfigResult<()> {
        if config.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: config.port.to_string(),
                reason: "Port must be > 0".to_string(),
            });
        }

        if config.max_payload_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_payload_size".to_string(),
                value: config.max_payload_size.to_string(),
                reason: "Must be > 0".to_string(),
            });
        }

        if config.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                value: config.request_timeout_secs.to_string(),
                reason: "Must be > 0".to_string(),
            });
        }

        Ok(())
    }

    fn validate_provider(config: &RouterConfig) -> ConfigResult<()> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "api_key".to_string(),
            });
        }

        if !config.api_base.starts_with("http://") && !config.api_base.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api_base".to_string(),
                value: config.api_base.clone(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        for (field, value) in [
            ("chat_model", &config.chat_model),
            ("image_model", &config.image_model),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingRequired {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn parse_log_level(level: &str) -> ConfigResult<LevelFilter> {
        LevelFilter::from_str(level).map_err(|_| ConfigError::InvalidValue {
            field: "log_level".to_string(),
            value: level.to_string(),
            reason: "Must be one of off, error, warn, info, debug, trace".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults_with_key() {
        let config = RouterConfig::new("sk-test");
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_missing_api_key() {
        let config = RouterConfig::default();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequired { ref field } if field == "api_key"
        ));
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = RouterConfig::new("sk-test");
        config.port = 0;
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "port"
        ));
    }

    #[test]
    fn test_validate_zero_timeout_and_payload() {
        let mut config = RouterConfig::new("sk-test");
        config.request_timeout_secs = 0;
        assert!(ConfigValidator::validate(&config).is_err());

        let mut config = RouterConfig::new("sk-test");
        config.max_payload_size = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_validate_api_base_scheme() {
        let mut config = RouterConfig::new("sk-test");
        config.api_base = "api.openai.com/v1".to_string();
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "api_base"
        ));
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = RouterConfig::new("sk-test");
        config.image_model = " ".to_string();
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(ConfigError::MissingRequired { ref field }) if field == "image_model"
        ));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(
            ConfigValidator::parse_log_level("debug").unwrap(),
            LevelFilter::Debug
        );
        assert_eq!(
            ConfigValidator::parse_log_level("WARN").unwrap(),
            LevelFilter::Warn
        );
        assert!(ConfigValidator::parse_log_level("loud").is_err());
    }
}
