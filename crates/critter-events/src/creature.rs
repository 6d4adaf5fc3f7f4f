//! Creature Snapshot Types
//!
//! Read-only views of live creatures, as handed to the simulation core by the
//! game state that owns them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Personality of a creature.
///
/// Unknown names never fail to load: [`Personality::from_name`] and the serde
/// impl resolve them to [`Personality::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Personality {
    Energetic,
    Chill,
    Foodie,
    Curious,
    Tsundere,
    Gentle,
}

impl Personality {
    /// Personality used whenever a name is not recognized.
    pub const DEFAULT: Personality = Personality::Chill;

    /// All personalities, in declaration order.
    pub const ALL: [Personality; 6] = [
        Personality::Energetic,
        Personality::Chill,
        Personality::Foodie,
        Personality::Curious,
        Personality::Tsundere,
        Personality::Gentle,
    ];

    /// Stable lookup key, also used as the content table key.
    pub fn as_str(self) -> &'static str {
        match self {
            Personality::Energetic => "energetic",
            Personality::Chill => "chill",
            Personality::Foodie => "foodie",
            Personality::Curious => "curious",
            Personality::Tsundere => "tsundere",
            Personality::Gentle => "gentle",
        }
    }

    /// Resolves a personality name, falling back to [`Personality::DEFAULT`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::DEFAULT)
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown name: '{}'", self.0)
    }
}

impl std::error::Error for UnknownName {}

impl FromStr for Personality {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "energetic" => Ok(Personality::Energetic),
            "chill" => Ok(Personality::Chill),
            "foodie" => Ok(Personality::Foodie),
            "curious" => Ok(Personality::Curious),
            "tsundere" => Ok(Personality::Tsundere),
            "gentle" => Ok(Personality::Gentle),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

impl From<String> for Personality {
    fn from(name: String) -> Self {
        Personality::from_name(&name)
    }
}

/// Coarse emotional state derived from a creature's vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Sick,
    Ecstatic,
    Happy,
    Neutral,
    Sad,
    Miserable,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Sick => "sick",
            Mood::Ecstatic => "ecstatic",
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Miserable => "miserable",
        }
    }

    /// True for the moods that slow a creature down (sad and miserable).
    pub fn is_low(self) -> bool {
        matches!(self, Mood::Sad | Mood::Miserable)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of a creature's state.
///
/// Vitals are conventionally 0-100 and are clamped by the owner; nothing in
/// this workspace writes to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: String,
    pub personality: Personality,
    pub hunger: f32,
    pub condition: f32,
    pub affection: f32,
    #[serde(default)]
    pub is_sick: bool,
}

impl CreatureSnapshot {
    /// Creates a healthy snapshot with all vitals at the given level.
    pub fn new(id: impl Into<String>, personality: Personality, level: f32) -> Self {
        Self {
            id: id.into(),
            personality,
            hunger: level,
            condition: level,
            affection: level,
            is_sick: false,
        }
    }

    /// Sets the three vitals.
    pub fn with_vitals(mut self, hunger: f32, condition: f32, affection: f32) -> Self {
        self.hunger = hunger;
        self.condition = condition;
        self.affection = affection;
        self
    }

    /// Marks the creature as sick.
    pub fn sick(mut self) -> Self {
        self.is_sick = true;
        self
    }
}
