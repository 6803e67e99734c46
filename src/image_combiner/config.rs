//! Application configuration.

use crate::domain::export_format::ExportFormat;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "IMAGE_COMBINER_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the local UI is served on.
    pub bind_addr: SocketAddr,

    /// Width in pixels of the stroke between the two halves.
    pub separator_width: u32,

    /// Format preselected for downloads.
    pub default_format: ExportFormat,

    /// Directory holding the static page.
    pub static_dir: PathBuf,

    /// Upper bound on a single upload request body.
    pub max_upload_bytes: usize,

    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives (e.g., "info", "image_combiner=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3300)),
            separator_width: 8,
            default_format: ExportFormat::WebP,
            static_dir: PathBuf::from("frontend"),
            max_upload_bytes: 32 * 1024 * 1024,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::DEFAULT_FILTER.to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from `$IMAGE_COMBINER_CONFIG` or the standard location,
    /// falling back to defaults.
    pub fn load() -> Self {
        let config_path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_file_path());
        Self::load_from(&config_path)
    }

    /// Runs before logging is initialized, so problems go to stderr.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    eprintln!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("image-combiner").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "image-combiner-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/image-combiner.json"));
        assert_eq!(config.separator_width, 8);
        assert_eq!(config.default_format, ExportFormat::WebP);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3300");
        assert_eq!(config.logging.level, crate::logging::DEFAULT_FILTER);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_config(
            "partial",
            r#"{ "separator_width": 4, "default_format": "jpg", "logging": { "json": true } }"#,
        );
        let config = AppConfig::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(config.separator_width, 4);
        assert_eq!(config.default_format, ExportFormat::Jpeg);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, crate::logging::DEFAULT_FILTER);
        assert_eq!(config.static_dir, PathBuf::from("frontend"));
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let path = temp_config("invalid", "{ not json");
        let config = AppConfig::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(config.separator_width, 8);
    }
}
