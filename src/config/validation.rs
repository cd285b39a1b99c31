use crate::config::types::Config;
use crate::url::in_domain;
use crate::ConfigError;
use url::Url;

/// Validates semantic constraints the type system cannot express
///
/// Checks that the start URL parses as HTTP(S) and lies inside the configured
/// domain boundary (a start URL out of scope would make every run a no-op),
/// that extensions carry their leading dot, and that numeric knobs are sane.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let start = Url::parse(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.start_url, e)))?;

    if start.scheme() != "http" && start.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "start URL must be http(s), got scheme: {}",
            start.scheme()
        )));
    }

    if config.allowed_domain.trim().is_empty() {
        return Err(ConfigError::Validation(
            "allowed-domain must not be empty".to_string(),
        ));
    }

    if !in_domain(
        &config.start_url,
        &config.allowed_domain,
        config.follow_subdomains,
    ) {
        return Err(ConfigError::Validation(format!(
            "start URL {} is outside the allowed domain {}",
            config.start_url, config.allowed_domain
        )));
    }

    for ext in &config.allowed_extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "extension {:?} must start with a dot",
                ext
            )));
        }
    }

    if config.rate_limit_sec < 0.0 {
        return Err(ConfigError::Validation(
            "rate-limit-sec must not be negative".to_string(),
        ));
    }

    if config.timeout_sec == 0 {
        return Err(ConfigError::Validation(
            "timeout-sec must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn base_config() -> Config {
        Config {
            start_url: "https://example.com/".to_string(),
            allowed_domain: "example.com".to_string(),
            output_dir: PathBuf::from("./out"),
            state_dir: PathBuf::from("./state"),
            max_pages: 10_000,
            max_depth: 10,
            respect_robots_txt: true,
            allowed_extensions: vec![".pdf".to_string()],
            follow_subdomains: false,
            rate_limit_sec: 0.5,
            timeout_sec: 20,
            user_agent: "test/1.0".to_string(),
            retries: 2,
            ignore_query_params: true,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn test_unparseable_start_url() {
        let mut config = base_config();
        config.start_url = "not a url".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_non_http_start_url() {
        let mut config = base_config();
        config.start_url = "ftp://example.com/".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_start_url_outside_domain() {
        let mut config = base_config();
        config.start_url = "https://other.org/".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_subdomain_start_url_requires_follow_subdomains() {
        let mut config = base_config();
        config.start_url = "https://docs.example.com/".to_string();
        assert!(validate(&config).is_err());
        config.follow_subdomains = true;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_extension_without_dot() {
        let mut config = base_config();
        config.allowed_extensions = vec!["pdf".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_negative_rate_limit() {
        let mut config = base_config();
        config.rate_limit_sec = -1.0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = base_config();
        config.timeout_sec = 0;
        assert!(validate(&config).is_err());
    }
}
