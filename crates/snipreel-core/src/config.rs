use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SnipError, SnipResult};
use crate::types::VideoSettings;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Length of entrance and glow videos, in frames.
    pub default_duration_frames: u64,
    /// Upper bound on typing videos, in frames.
    pub max_typing_frames: u64,
    /// Frames of blinking cursor held after typing completes.
    pub typing_tail_frames: u64,
    pub max_concurrent_renders: usize,
    pub composition_id: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_duration_frames: 150,
            max_typing_frames: 300,
            typing_tail_frames: 30,
            max_concurrent_renders: 2,
            composition_id: "CodeVideo".to_string(),
        }
    }
}

/// How to launch the external headless renderer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RendererConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Entry point handed to the one-time bundle step.
    pub bundle_entry: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: "node".to_string(),
            args: vec!["renderer/cli.mjs".to_string()],
            bundle_entry: "renderer/src/index.ts".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub output_dir: PathBuf,
    pub download_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public/rendered"),
            download_prefix: "/api/render/download".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SnipConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub video: VideoSettings,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SnipConfig {
    pub fn load_from_file(path: &Path) -> SnipResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> SnipResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> SnipResult<Self> {
        toml::from_str(contents).map_err(|e| SnipError::Config(e.to_string()))
    }

    pub fn save_to_file(&self, path: &Path) -> SnipResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| SnipError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply `SNIPREEL_HOST` / `SNIPREEL_PORT` overrides.
    pub fn apply_env(&mut self) -> SnipResult<()> {
        if let Ok(host) = std::env::var("SNIPREEL_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SNIPREEL_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| SnipError::Config(format!("SNIPREEL_PORT is not a port: {port}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = SnipConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.video, VideoSettings::vertical());
        assert_eq!(config.render.default_duration_frames, 150);
        assert_eq!(config.render.max_typing_frames, 300);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_partial_sections_override() {
        let config = SnipConfig::from_toml(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.storage.download_prefix, "/api/render/download");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SnipConfig::from_toml("[server\nport = 1").unwrap_err();
        assert!(matches!(err, SnipError::Config(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("snipreel_config_{}.toml", std::process::id()));
        let mut config = SnipConfig::default();
        config.render.max_concurrent_renders = 7;
        config.save_to_file(&path).unwrap();
        let loaded = SnipConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.render.max_concurrent_renders, 7);
        let _ = std::fs::remove_file(&path);
    }
}
