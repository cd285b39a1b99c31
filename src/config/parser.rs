use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and validates a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the YAML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let file = write_config(
            "start-url: https://example.com/\nallowed-domain: example.com\n",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.start_url, "https://example.com/");
        assert_eq!(config.max_pages, 10_000);
        assert_eq!(config.max_depth, 10);
        assert!(config.respect_robots_txt);
        assert!(config.ignore_query_params);
        assert!(!config.follow_subdomains);
        assert_eq!(config.retries, 2);
        assert_eq!(config.timeout_sec, 20);
        assert_eq!(config.rate_limit_sec, 0.5);
        assert_eq!(config.output_dir, std::path::PathBuf::from("./out"));
        assert_eq!(config.state_dir, std::path::PathBuf::from("./state"));
        assert!(config.allowed_extensions.contains(&".pdf".to_string()));
        assert_eq!(config.allowed_extensions.len(), 7);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let file = write_config(
            "start-url: https://docs.example.com/\n\
             allowed-domain: example.com\n\
             follow-subdomains: true\n\
             max-pages: 50\n\
             allowed-extensions: [\".pdf\"]\n\
             rate-limit-sec: 0.0\n",
        );
        let config = load_config(file.path()).unwrap();
        assert!(config.follow_subdomains);
        assert_eq!(config.max_pages, 50);
        assert_eq!(config.allowed_extensions, vec![".pdf"]);
        assert_eq!(config.rate_limit_sec, 0.0);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let file = write_config(
            "start-url: https://example.com/\nallowed-domain: example.com\nmax-depht: 3\n",
        );
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let file = write_config("allowed-domain: example.com\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config(Path::new("/nonexistent/harvest.yaml"));
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
    }
}
