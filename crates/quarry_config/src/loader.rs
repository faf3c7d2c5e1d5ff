//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::QuarryConfig;
use std::path::Path;

/// Loads and validates a `quarry.toml` configuration from a project directory.
///
/// Reads `<project_dir>/quarry.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<QuarryConfig, ConfigError> {
    let config_path = project_dir.join("quarry.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `quarry.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<QuarryConfig, ConfigError> {
    let config: QuarryConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and values are usable.
fn validate_config(config: &QuarryConfig) -> Result<(), ConfigError> {
    if config.assets.public_dir.is_empty() {
        return Err(ConfigError::MissingField("assets.public_dir".to_string()));
    }
    if let Some(mode) = config.assets.file_mode {
        if mode > 0o7777 {
            return Err(ConfigError::ValidationError(format!(
                "file_mode {mode:#o} out of range"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[assets]
public_dir = "public/cache"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.assets.public_dir, "public/cache");
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[assets]
public_dir = "public/cache"
url_base_path = "/cache/"
minify = false
inline = false
name = "bundle"
file_mode = 0o750

[cache]
backend = "memory"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.assets.url_base_path, "/cache/");
        assert!(!config.assets.minify);
        assert!(!config.assets.inline);
        assert_eq!(config.assets.name, "bundle");
        assert_eq!(config.assets.file_mode, Some(0o750));
    }

    #[test]
    fn empty_public_dir_rejected() {
        let toml = r#"
[assets]
public_dir = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn missing_assets_section_is_parse_error() {
        let err = load_config_from_str("").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn oversized_file_mode_rejected() {
        let toml = r#"
[assets]
public_dir = "public/cache"
file_mode = 0o17777
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("quarry.toml"),
            "[assets]\npublic_dir = \"public\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.assets.public_dir, "public");
    }

    #[test]
    fn load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
