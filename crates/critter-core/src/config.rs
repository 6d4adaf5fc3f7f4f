//! Configuration loading for the behavior simulation.
//!
//! All tuning values can be loaded from a TOML file; any section or key that
//! is left out keeps its default.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Complete behavior configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CritterConfig {
    /// Timer delays
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Mood-driven action weight transforms
    #[serde(default)]
    pub mood_weights: MoodWeightConfig,
}

impl CritterConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Delay ranges for the two per-creature timers, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub thought_delay_min_secs: f64,
    pub thought_delay_max_secs: f64,
    pub idle_delay_min_secs: f64,
    pub idle_delay_max_secs: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            thought_delay_min_secs: 15.0,
            thought_delay_max_secs: 45.0,
            idle_delay_min_secs: 45.0,
            idle_delay_max_secs: 120.0,
        }
    }
}

impl SchedulerConfig {
    /// Fresh random delay before the next thought.
    pub fn thought_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        uniform_delay(rng, self.thought_delay_min_secs, self.thought_delay_max_secs)
    }

    /// Fresh random delay before the next idle action.
    pub fn idle_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        uniform_delay(rng, self.idle_delay_min_secs, self.idle_delay_max_secs)
    }

    /// Divides every delay by `speed`. Non-positive speeds are ignored.
    pub fn scaled(&self, speed: f64) -> Self {
        if speed <= 0.0 {
            return self.clone();
        }
        Self {
            thought_delay_min_secs: self.thought_delay_min_secs / speed,
            thought_delay_max_secs: self.thought_delay_max_secs / speed,
            idle_delay_min_secs: self.idle_delay_min_secs / speed,
            idle_delay_max_secs: self.idle_delay_max_secs / speed,
        }
    }
}

/// Longest delay a timer will ever wait, in seconds (one day).
pub const MAX_TIMER_DELAY_SECS: f64 = 86_400.0;

/// Keeps a delay bound finite and within `[0, MAX_TIMER_DELAY_SECS]`; NaN becomes 0.
fn clamp_delay_secs(secs: f64) -> f64 {
    secs.max(0.0).min(MAX_TIMER_DELAY_SECS)
}

fn uniform_delay<R: Rng>(rng: &mut R, min: f64, max: f64) -> Duration {
    let (min, max) = (clamp_delay_secs(min), clamp_delay_secs(max));
    let lo = min.min(max);
    let hi = min.max(max);
    if hi <= lo {
        return Duration::from_secs_f64(lo);
    }
    Duration::from_secs_f64(rng.gen_range(lo..=hi))
}

/// How a creature's mood reshapes its idle action weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodWeightConfig {
    /// Sleep weight forced on sick creatures
    pub sick_sleep_weight: f32,
    /// Eat weight forced on sick creatures
    pub sick_eat_weight: f32,
    /// Sleep multiplier for sad and miserable creatures
    pub low_mood_sleep_boost: f32,
    /// High-energy multiplier for sad and miserable creatures
    pub low_mood_energy_damping: f32,
    /// High-energy multiplier for ecstatic creatures
    pub ecstatic_energy_boost: f32,
    /// Sleep multiplier for ecstatic creatures
    pub ecstatic_sleep_damping: f32,
}

impl Default for MoodWeightConfig {
    fn default() -> Self {
        Self {
            sick_sleep_weight: 60.0,
            sick_eat_weight: 20.0,
            low_mood_sleep_boost: 2.0,
            low_mood_energy_damping: 0.4,
            ecstatic_energy_boost: 1.5,
            ecstatic_sleep_damping: 0.5,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Critter Behavior Configuration

[scheduler]
thought_delay_min_secs = 15.0
thought_delay_max_secs = 45.0
idle_delay_min_secs = 45.0
idle_delay_max_secs = 120.0

[mood_weights]
sick_sleep_weight = 60.0
sick_eat_weight = 20.0
low_mood_sleep_boost = 2.0
low_mood_energy_damping = 0.4
ecstatic_energy_boost = 1.5
ecstatic_sleep_damping = 0.5
"#
    .to_string()
}
