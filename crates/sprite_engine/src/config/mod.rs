//! Configuration system
//!
//! Scene defaults that a game usually wants to tweak without recompiling:
//! the stage size, the log level and the shadow parameters new sprites start
//! with. Files are TOML or RON, picked by extension.

pub use serde::{Deserialize, Serialize};

use crate::scene::ShadowColor;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let parse: fn(&str) -> Result<Self, ConfigError> = if path.ends_with(".toml") {
            Self::from_toml_str
        } else if path.ends_with(".ron") {
            Self::from_ron_str
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        parse(&contents)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Parse configuration from TOML text
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse configuration from RON text
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values parsed but out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Stage Configuration
///
/// Size of the root node every scene is drawn into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Stage width in pixels
    pub width: f32,
    /// Stage height in pixels
    pub height: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 360.0,
        }
    }
}

/// # Shadow Defaults
///
/// Shadow parameters copied into every node a configured tree creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowDefaults {
    /// Shadow color
    pub color: ShadowColor,
    /// Shadow offset on the x axis
    pub offset_x: f32,
    /// Shadow offset on the y axis
    pub offset_y: f32,
    /// Shadow offset on the z axis
    pub offset_z: f32,
    /// Shadow blur radius
    pub blur: f32,
}

impl Default for ShadowDefaults {
    fn default() -> Self {
        Self {
            color: ShadowColor::default(),
            offset_x: 3.0,
            offset_y: 3.0,
            offset_z: 3.0,
            blur: 3.0,
        }
    }
}

/// # Scene Configuration
///
/// Top-level configuration for building a scene tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Stage (root node) dimensions
    pub stage: StageConfig,
    /// Shadow defaults for new nodes
    pub shadow: ShadowDefaults,
}

impl SceneConfig {
    /// Create a configuration with the given stage size
    pub fn with_stage(width: f32, height: f32) -> Self {
        Self {
            stage: StageConfig { width, height },
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stage.width < 0.0 || self.stage.height < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stage size must not be negative: {}x{}",
                self.stage.width, self.stage.height
            )));
        }
        if !(0.0..=1.0).contains(&self.shadow.color.a) {
            return Err(ConfigError::Invalid(format!(
                "shadow alpha must be within 0..=1, got {}",
                self.shadow.color.a
            )));
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            stage: StageConfig::default(),
            shadow: ShadowDefaults::default(),
        }
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stage_is_640_by_360() {
        let config = SceneConfig::default();
        assert_eq!(config.stage.width, 640.0);
        assert_eq!(config.stage.height, 360.0);
        assert_eq!(config.shadow.blur, 3.0);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
            log_level = "debug"

            [stage]
            width = 800.0
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.stage.width, 800.0);
        assert_eq!(config.stage.height, 360.0);
        assert_eq!(config.shadow, ShadowDefaults::default());
    }

    #[test]
    fn test_ron_parse() {
        let config =
            SceneConfig::from_ron_str("(stage: (width: 320.0, height: 180.0))").expect("valid ron");
        assert_eq!(config.stage, StageConfig { width: 320.0, height: 180.0 });
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = SceneConfig::from_toml_str("stage = 12").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = SceneConfig::load_from_file("scene.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let path = std::env::temp_dir().join(format!(
            "sprite_engine_scene_config_{}.toml",
            std::process::id()
        ));
        let path = path.to_str().expect("utf-8 temp path");

        let config = SceneConfig::with_stage(1024.0, 768.0);
        config.save_to_file(path).expect("save");
        let loaded = SceneConfig::load_from_file(path).expect("load");
        let _ = std::fs::remove_file(path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_bad_alpha() {
        let mut config = SceneConfig::default();
        config.shadow.color.a = 2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_stage() {
        let config = SceneConfig::with_stage(-1.0, 360.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = SceneConfig::with_stage(640.0, -0.5);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
