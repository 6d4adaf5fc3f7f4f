//! Effect types and their visual configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::shape::ShapeKind;

/// Gameplay triggers that play a particle burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Feed,
    Pet,
    Play,
    LevelUp,
    Merge,
}

impl EffectType {
    pub const ALL: [EffectType; 5] = [
        EffectType::Feed,
        EffectType::Pet,
        EffectType::Play,
        EffectType::LevelUp,
        EffectType::Merge,
    ];

    /// Visual configuration for this effect.
    pub fn config(self) -> EffectConfig {
        match self {
            EffectType::Feed => EffectConfig {
                count: 8,
                duration: 60.0,
                colors: &[0xFF6B9D, 0xFF8FAB, 0xE63973],
                size: 8.0,
                spread: 2.0,
                gravity: -1.5,
                shape: ShapeKind::Heart,
            },
            EffectType::Pet => EffectConfig {
                count: 10,
                duration: 50.0,
                colors: &[0xFFD700, 0xFFF176],
                size: 6.0,
                spread: 2.5,
                gravity: -1.0,
                shape: ShapeKind::Star,
            },
            EffectType::Play => EffectConfig {
                count: 12,
                duration: 45.0,
                colors: &[0x4FC3F7, 0x81C784, 0xFFB74D, 0xBA68C8],
                size: 5.0,
                spread: 3.5,
                gravity: -0.5,
                shape: ShapeKind::Circle,
            },
            EffectType::LevelUp => EffectConfig {
                count: 20,
                duration: 120.0,
                colors: &[0xFFD700, 0xFFFFFF, 0xFFA000],
                size: 9.0,
                spread: 4.0,
                gravity: -2.0,
                shape: ShapeKind::Star,
            },
            EffectType::Merge => EffectConfig {
                count: 16,
                duration: 90.0,
                colors: &[0xB388FF, 0x7C4DFF, 0xE1BEE7],
                size: 7.0,
                spread: 3.0,
                gravity: -1.2,
                shape: ShapeKind::Star,
            },
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectType::Feed => write!(f, "feed"),
            EffectType::Pet => write!(f, "pet"),
            EffectType::Play => write!(f, "play"),
            EffectType::LevelUp => write!(f, "levelup"),
            EffectType::Merge => write!(f, "merge"),
        }
    }
}

/// Error for effect names that don't match any effect type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown effect type: '{0}'")]
pub struct UnknownEffect(pub String);

impl FromStr for EffectType {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feed" => Ok(EffectType::Feed),
            "pet" => Ok(EffectType::Pet),
            "play" => Ok(EffectType::Play),
            "levelup" | "level_up" => Ok(EffectType::LevelUp),
            "merge" => Ok(EffectType::Merge),
            _ => Err(UnknownEffect(s.to_string())),
        }
    }
}

/// Constant visual identity of one effect type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectConfig {
    /// Particles per burst
    pub count: usize,
    /// Nominal lifetime in frames
    pub duration: f32,
    /// Palette as `0xRRGGBB`, picked uniformly per particle
    pub colors: &'static [u32],
    /// Base particle size in pixels
    pub size: f32,
    /// Initial speed in pixels per frame
    pub spread: f32,
    /// Added to the initial vertical velocity (negative rises)
    pub gravity: f32,
    pub shape: ShapeKind,
}

/// Engine-wide motion tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Upward acceleration applied every frame, in pixels per frame²
    pub drift: f32,
    /// Largest spin rate in radians per frame, in either direction
    pub max_rotation_speed: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            drift: 0.02,
            max_rotation_speed: 0.1,
        }
    }
}

impl EffectsConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, EffectsConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, EffectsConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Errors that can occur while loading [`EffectsConfig`].
#[derive(Debug, Error)]
pub enum EffectsConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mapping() {
        assert_eq!(EffectType::Feed.config().shape, ShapeKind::Heart);
        assert_eq!(EffectType::Pet.config().shape, ShapeKind::Star);
        assert_eq!(EffectType::Play.config().shape, ShapeKind::Circle);
        assert_eq!(EffectType::LevelUp.config().shape, ShapeKind::Star);
        assert_eq!(EffectType::Merge.config().shape, ShapeKind::Star);
    }

    #[test]
    fn test_level_up_config() {
        let config = EffectType::LevelUp.config();
        assert_eq!(config.count, 20);
        assert_eq!(config.duration, 120.0);
    }

    #[test]
    fn test_every_effect_has_palette() {
        for effect in EffectType::ALL {
            let config = effect.config();
            assert!(!config.colors.is_empty(), "{effect} has no colours");
            assert!(config.count > 0);
        }
    }

    #[test]
    fn test_effect_parse() {
        assert_eq!("levelup".parse::<EffectType>().unwrap(), EffectType::LevelUp);
        assert_eq!("LEVEL_UP".parse::<EffectType>().unwrap(), EffectType::LevelUp);
        assert_eq!("Feed".parse::<EffectType>().unwrap(), EffectType::Feed);
        assert!("explode".parse::<EffectType>().is_err());
    }

    #[test]
    fn test_effects_config_partial_toml() {
        let config = EffectsConfig::from_str("drift = 0.5").unwrap();
        assert_eq!(config.drift, 0.5);
        assert_eq!(config.max_rotation_speed, 0.1);
    }

    #[test]
    fn test_effects_config_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_rotation_speed = 0.25").unwrap();

        let config = EffectsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_rotation_speed, 0.25);
        assert_eq!(config.drift, 0.02);

        let err = EffectsConfig::from_file(Path::new("/nonexistent/effects.toml")).unwrap_err();
        assert!(matches!(err, EffectsConfigError::Io(_)));
    }
}
