//! Autonomous creature behavior: moods, idle action weighting, phrase content
//! and the per-creature timer scheduler.
//!
//! # Architecture
//!
//! ```text
//! CreatureSnapshot ──▶ mood ──▶ weights / content ──▶ BehaviorEvent ──▶ listener
//!                          (fired by scheduler timers)
//! ```
//!
//! # Modules
//!
//! - [`mood`]: Vitals to mood mapping
//! - [`weights`]: Personality base weights, mood transforms, weighted scan
//! - [`content`]: Thought and click-reaction phrase pools
//! - [`scheduler`]: Self-rescheduling thought and idle-action timers
//! - [`config`]: TOML tuning

pub mod config;
pub mod content;
pub mod mood;
pub mod scheduler;
pub mod weights;

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, CritterConfig, MoodWeightConfig, SchedulerConfig,
    MAX_TIMER_DELAY_SECS,
};

// Re-export content types
pub use content::{
    default_content, default_content_toml, ContentError, PersonalityPhrases, PhraseTable,
    PLACEHOLDER_REACTION,
};

// Re-export behavior types
pub use mood::{derive_mood, mood_of};
pub use scheduler::{BehaviorScheduler, Listener, SchedulerError};
pub use weights::{
    apply_mood, base_weights, pick_weighted, select_idle_action, ActionWeights,
    EMPTY_TABLE_FALLBACK, EXHAUSTED_SCAN_FALLBACK,
};
