//! Mood Model
//!
//! Maps a creature's vitals to a coarse mood. Pure and stateless.

use critter_events::{CreatureSnapshot, Mood};

/// Lower bound (inclusive) of the average vital for each healthy mood.
const ECSTATIC_THRESHOLD: f32 = 80.0;
const HAPPY_THRESHOLD: f32 = 60.0;
const NEUTRAL_THRESHOLD: f32 = 40.0;
const SAD_THRESHOLD: f32 = 20.0;

/// Derives a mood from the three vitals and the sickness flag.
///
/// Sickness overrides everything. Otherwise the average of the vitals is
/// bucketed, and a value exactly on a threshold belongs to the higher mood.
pub fn derive_mood(hunger: f32, condition: f32, affection: f32, is_sick: bool) -> Mood {
    if is_sick {
        return Mood::Sick;
    }

    let avg = (hunger + condition + affection) / 3.0;
    if avg >= ECSTATIC_THRESHOLD {
        Mood::Ecstatic
    } else if avg >= HAPPY_THRESHOLD {
        Mood::Happy
    } else if avg >= NEUTRAL_THRESHOLD {
        Mood::Neutral
    } else if avg >= SAD_THRESHOLD {
        Mood::Sad
    } else {
        Mood::Miserable
    }
}

/// Mood of a snapshot.
pub fn mood_of(creature: &CreatureSnapshot) -> Mood {
    derive_mood(
        creature.hunger,
        creature.condition,
        creature.affection,
        creature.is_sick,
    )
}
