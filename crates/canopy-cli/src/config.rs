//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use canopy::config::AppConfig;

use crate::error::{CliError, Document, TomlError};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(TomlError),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (canopy/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be read or parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("canopy/config.toml");
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "canopy", "canopy") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(&system_config);
        }

        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Parses configuration from TOML text. `path` is only used for reporting.
pub fn parse_config(src: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    toml::from_str(src)
        .map_err(|err| ConfigError::Parse(TomlError::new(Document::Config, path, src, &err)))
}

fn load_config_file(path: &Path) -> Result<AppConfig, CliError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path).map_err(|err| CliError::read(path, err))?;
    Ok(parse_config(&content, path)?)
}

#[cfg(test)]
mod tests {
    use canopy::config::LayoutDirection;

    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let src = r#"
            [layout]
            direction = "top_to_bottom"
            node_width = 200

            [viewport]
            max_zoom = 8.0
        "#;
        let config = parse_config(src, Path::new("config.toml")).unwrap();

        assert_eq!(config.layout().direction(), LayoutDirection::TopToBottom);
        assert_eq!(config.layout().node_width(), 200.0);
        assert_eq!(config.layout().node_height(), 60.0);
        assert_eq!(config.viewport().max_zoom(), 8.0);
        assert_eq!(config.viewport().zoom_step(), 1.1);
        assert_eq!(config.style().font_size(), 12.0);
    }

    #[test]
    fn test_style_kind_colors_from_toml() {
        let src = r##"
            [style]
            background_color = "#fafafa"

            [style.kind_colors]
            harm = "tomato"
        "##;
        let config = parse_config(src, Path::new("config.toml")).unwrap();
        assert_eq!(config.style().kind_colors().get(canopy::NodeKind::Harm), "tomato");
        assert_eq!(config.style().kind_colors().get(canopy::NodeKind::Control), "#d1c4e9");
    }

    #[test]
    fn test_invalid_config_reports_span() {
        let src = "[layout]\ndirection = \"diagonal\"\n";
        let err = parse_config(src, Path::new("bad.toml")).unwrap_err();
        let ConfigError::Parse(toml_err) = err else {
            panic!("expected a parse error");
        };
        assert_eq!(toml_err.document(), Document::Config);
        let span = toml_err.span().expect("toml reports a span");
        assert!(src[span].contains("diagonal"));
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = load_config(Some("definitely/not/here/config.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::MissingFile(_))));
    }
}
