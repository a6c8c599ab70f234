//! Configuration loader for `--settings` files.

use std::path::Path;

use crate::config::schema::ProbeConfig;
use crate::error::{ConfigError, ProbeError};

/// Load configuration from a file path.
pub fn load_config(path: &Path) -> Result<ProbeConfig, ProbeError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()).into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("Failed to read config file: {}", e))
    })?;

    parse_config(&content)
}

/// Parse configuration from a JSON string.
pub fn parse_config(json: &str) -> Result<ProbeConfig, ProbeError> {
    let config: ProbeConfig = serde_json::from_str(json).map_err(|e| {
        ConfigError::ParseError(format!("Failed to parse config JSON: {}", e))
    })?;

    config.validate()?;

    tracing::debug!(?config, "loaded probe configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, ProbeConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "fd": 3,
            "epollTimeoutMs": 10,
            "pollTimeoutMs": 20,
            "pselectTimeoutNs": 500,
            "maxEvents": 8
        }"#;

        let config = parse_config(json).unwrap();
        assert_eq!(config.fd, 3);
        assert_eq!(config.epoll_timeout_ms, 10);
        assert_eq!(config.poll_timeout_ms, 20);
        assert_eq!(config.pselect_timeout_ns, 500);
        assert_eq!(config.max_events, 8);
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let result = parse_config(r#"{"maxEvents": 0}"#);
        assert!(matches!(
            result,
            Err(ProbeError::Config(ConfigError::ValidationError(_)))
        ));
    }

    #[test]
    fn test_parse_rejects_oversized_event_buffer() {
        let result = parse_config(r#"{"maxEvents": 2000000000}"#);
        assert!(matches!(
            result,
            Err(ProbeError::Config(ConfigError::ValidationError(_)))
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_config("not json"),
            Err(ProbeError::Config(ConfigError::ParseError(_)))
        ));
        assert!(parse_config(r#"{"fd": }"#).is_err());
        assert!(parse_config(r#"{"fd": "zero"}"#).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pollTimeoutMs": 5}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.poll_timeout_ms, 5);
        assert_eq!(config.epoll_timeout_ms, 1);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("probe.json");

        assert!(matches!(
            load_config(&missing),
            Err(ProbeError::Config(ConfigError::FileNotFound(_)))
        ));
    }
}
