//! Phrase content for creature thoughts and click reactions.
//!
//! The table is data, keyed by personality name and (optionally) mood name.
//! Missing keys are never an error: lookups return `None` and callers fall
//! back or stay quiet.

use std::collections::HashMap;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use critter_events::{Mood, Personality};

/// Shown when a personality has no click reactions.
pub const PLACEHOLDER_REACTION: &str = "...";

/// Phrase pools for every personality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhraseTable {
    /// Pools keyed by personality name (e.g., "foodie")
    #[serde(default)]
    pub personalities: HashMap<String, PersonalityPhrases>,
}

/// Phrase pools for one personality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalityPhrases {
    /// Idle thoughts used when no mood pool applies
    #[serde(default)]
    pub thoughts: Vec<String>,
    /// Lines spoken when the player taps the creature
    #[serde(default)]
    pub click_reactions: Vec<String>,
    /// Thought pools keyed by mood name (e.g., "sad")
    #[serde(default)]
    pub mood_thoughts: HashMap<String, Vec<String>>,
}

impl PhraseTable {
    /// Loads a table from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses a table from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ContentError> {
        Ok(toml::from_str(content)?)
    }

    /// Gets the phrases for a personality.
    pub fn personality(&self, personality: Personality) -> Option<&PersonalityPhrases> {
        self.personalities.get(personality.as_str())
    }

    /// Thought pool for a creature: the mood pool when one is defined and
    /// non-empty, otherwise the personality pool.
    pub fn thought_pool(&self, personality: Personality, mood: Mood) -> Option<&[String]> {
        let phrases = self.personality(personality)?;

        if let Some(pool) = phrases
            .mood_thoughts
            .get(mood.as_str())
            .filter(|pool| !pool.is_empty())
        {
            return Some(pool.as_slice());
        }

        Some(phrases.thoughts.as_slice()).filter(|pool| !pool.is_empty())
    }

    /// Picks a thought uniformly from the applicable pool.
    pub fn pick_thought<R: Rng>(&self, rng: &mut R, personality: Personality, mood: Mood) -> Option<&str> {
        self.thought_pool(personality, mood)?
            .choose(rng)
            .map(String::as_str)
    }

    /// Picks a click reaction, or [`PLACEHOLDER_REACTION`] if there is none.
    pub fn pick_click_reaction<R: Rng>(&self, rng: &mut R, personality: Personality) -> &str {
        self.personality(personality)
            .and_then(|phrases| phrases.click_reactions.choose(rng))
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_REACTION)
    }
}

/// Errors that can occur while loading phrase content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

fn phrases(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

/// Built-in phrase table covering every personality.
pub fn default_content() -> PhraseTable {
    let mut personalities = HashMap::new();

    let mut energetic = PersonalityPhrases {
        thoughts: phrases(&[
            "Let's gooo!",
            "I could run ten laps right now!",
            "Is it playtime yet?",
            "Zoom zoom!",
        ]),
        click_reactions: phrases(&["Again! Again!", "Race you!", "Hehe, that tickles!"]),
        mood_thoughts: HashMap::new(),
    };
    energetic.mood_thoughts.insert(
        "ecstatic".to_string(),
        phrases(&["Best. Day. EVER!", "I feel like I could fly!"]),
    );
    energetic.mood_thoughts.insert(
        "sad".to_string(),
        phrases(&["Not in the mood to run...", "Everything feels slow today."]),
    );
    personalities.insert("energetic".to_string(), energetic);

    let mut chill = PersonalityPhrases {
        thoughts: phrases(&[
            "Nice breeze today.",
            "Five more minutes...",
            "No rush.",
            "Clouds look like snacks.",
        ]),
        click_reactions: phrases(&["Mm?", "Oh, hey.", "*yawn*"]),
        mood_thoughts: HashMap::new(),
    };
    chill.mood_thoughts.insert(
        "sick".to_string(),
        phrases(&["Gonna lie down a while...", "Ugh, my tummy."]),
    );
    personalities.insert("chill".to_string(), chill);

    let mut foodie = PersonalityPhrases {
        thoughts: phrases(&[
            "I smell something tasty...",
            "What's for dinner?",
            "Snack o'clock!",
            "Berries would be nice.",
        ]),
        click_reactions: phrases(&["Got food?", "Is that a treat?", "Nom?"]),
        mood_thoughts: HashMap::new(),
    };
    foodie.mood_thoughts.insert(
        "miserable".to_string(),
        phrases(&["So... hungry...", "Nobody feeds me..."]),
    );
    personalities.insert("foodie".to_string(), foodie);

    personalities.insert(
        "curious".to_string(),
        PersonalityPhrases {
            thoughts: phrases(&[
                "What's over there?",
                "I wonder how that works.",
                "A new smell!",
                "Why is the sky that colour?",
            ]),
            click_reactions: phrases(&["Ooh, what's that?", "Are you exploring too?", "Hm? Hm?"]),
            mood_thoughts: HashMap::new(),
        },
    );

    let mut tsundere = PersonalityPhrases {
        thoughts: phrases(&[
            "It's not like I missed you.",
            "Hmph.",
            "I was going to do that anyway.",
            "Don't get the wrong idea!",
        ]),
        click_reactions: phrases(&["D-don't touch me!", "...fine, one more.", "Baka!"]),
        mood_thoughts: HashMap::new(),
    };
    tsundere.mood_thoughts.insert(
        "ecstatic".to_string(),
        phrases(&["I-I'm only smiling because of the weather!"]),
    );
    personalities.insert("tsundere".to_string(), tsundere);

    personalities.insert(
        "gentle".to_string(),
        PersonalityPhrases {
            thoughts: phrases(&[
                "The flowers are pretty.",
                "I hope everyone is okay.",
                "Let's take it easy.",
                "Thank you for today.",
            ]),
            click_reactions: phrases(&["Hello there~", "That's nice.", "*happy hum*"]),
            mood_thoughts: HashMap::new(),
        },
    );

    PhraseTable { personalities }
}

/// Generates a sample content file.
pub fn default_content_toml() -> String {
    r#"# Creature Phrase Content

[personalities.energetic]
thoughts = ["Let's gooo!", "Is it playtime yet?"]
click_reactions = ["Again! Again!", "Race you!"]

[personalities.energetic.mood_thoughts]
ecstatic = ["Best. Day. EVER!"]
sad = ["Not in the mood to run..."]

[personalities.chill]
thoughts = ["Nice breeze today.", "No rush."]
click_reactions = ["Mm?", "*yawn*"]

[personalities.foodie]
thoughts = ["What's for dinner?", "Snack o'clock!"]
click_reactions = ["Got food?"]

[personalities.curious]
thoughts = ["What's over there?"]
click_reactions = ["Ooh, what's that?"]

[personalities.tsundere]
thoughts = ["Hmph."]
click_reactions = ["D-don't touch me!"]

[personalities.gentle]
thoughts = ["The flowers are pretty."]
click_reactions = ["Hello there~"]
"#
    .to_string()
}
