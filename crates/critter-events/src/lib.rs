//! Shared data types for the critter simulation.
//!
//! This crate contains plain data structures and the pure weather clock.
//! It is a dependency for all other crates in the workspace.

pub mod creature;
pub mod event;
pub mod weather;

// Re-export creature types
pub use creature::{CreatureSnapshot, Mood, Personality, UnknownName};

// Re-export event types
pub use event::{action_icon, BehaviorEvent, IdleAction, DEFAULT_ACTION_ICON};

// Re-export weather clock
pub use weather::{
    current_time_of_day, current_weather, season, sky_colors, time_of_day, weather,
    weather_buffs, weather_icon, weather_name, weather_roll, CalendarDate, Element,
    ElementBuffs, Season, TimeOfDay, Weather, WEATHER_HASH_MULTIPLIER,
};
