//! Idle Action Weighting
//!
//! Base weights per personality, mood-based reshaping, and the weighted
//! random scan that picks an idle action.

use rand::Rng;

use critter_events::{IdleAction, Mood, Personality};

use crate::config::MoodWeightConfig;

/// Chosen when no action has a positive weight.
pub const EMPTY_TABLE_FALLBACK: IdleAction = IdleAction::Sleep;

/// Chosen if the scan runs off the end of the table.
pub const EXHAUSTED_SCAN_FALLBACK: IdleAction = IdleAction::Move;

/// Relative likelihood of each idle action, indexed like [`IdleAction::ALL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionWeights(pub [f32; IdleAction::COUNT]);

impl ActionWeights {
    pub fn get(&self, action: IdleAction) -> f32 {
        self.0[action.index()]
    }

    pub fn set(&mut self, action: IdleAction, weight: f32) {
        self.0[action.index()] = weight;
    }

    pub fn total(&self) -> f32 {
        self.0.iter().sum()
    }

    /// Iterates `(action, weight)` pairs in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (IdleAction, f32)> + '_ {
        IdleAction::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Normalized probability of each action. All zeros if the table is empty.
    pub fn probabilities(&self) -> [f32; IdleAction::COUNT] {
        let total = self.total();
        if total <= 0.0 {
            return [0.0; IdleAction::COUNT];
        }
        self.0.map(|w| w / total)
    }
}

/// Base idle weights for a personality.
pub fn base_weights(personality: Personality) -> ActionWeights {
    //                          sleep eat  move dance jump chase acro explore social
    ActionWeights(match personality {
        Personality::Energetic => [5.0, 10.0, 15.0, 15.0, 20.0, 20.0, 10.0, 10.0, 10.0],
        Personality::Chill => [30.0, 15.0, 10.0, 5.0, 5.0, 5.0, 2.0, 10.0, 18.0],
        Personality::Foodie => [15.0, 35.0, 10.0, 5.0, 5.0, 5.0, 5.0, 10.0, 10.0],
        Personality::Curious => [10.0, 10.0, 15.0, 5.0, 10.0, 10.0, 5.0, 30.0, 5.0],
        Personality::Tsundere => [15.0, 10.0, 15.0, 5.0, 10.0, 15.0, 10.0, 10.0, 10.0],
        Personality::Gentle => [20.0, 15.0, 10.0, 10.0, 5.0, 5.0, 5.0, 10.0, 20.0],
    })
}

/// Returns a copy of `base` reshaped for the given mood.
pub fn apply_mood(base: &ActionWeights, mood: Mood, config: &MoodWeightConfig) -> ActionWeights {
    let mut weights = *base;

    match mood {
        Mood::Sick => {
            // Sick creatures only rest and eat
            weights = ActionWeights([0.0; IdleAction::COUNT]);
            weights.set(IdleAction::Sleep, config.sick_sleep_weight);
            weights.set(IdleAction::Eat, config.sick_eat_weight);
        }
        low if low.is_low() => {
            scale_matching(&mut weights, |a| a == IdleAction::Sleep, config.low_mood_sleep_boost);
            scale_matching(&mut weights, IdleAction::is_high_energy, config.low_mood_energy_damping);
        }
        Mood::Ecstatic => {
            scale_matching(&mut weights, IdleAction::is_high_energy, config.ecstatic_energy_boost);
            scale_matching(&mut weights, |a| a == IdleAction::Sleep, config.ecstatic_sleep_damping);
        }
        _ => {}
    }

    weights
}

fn scale_matching(weights: &mut ActionWeights, filter: impl Fn(IdleAction) -> bool, factor: f32) {
    for action in IdleAction::ALL {
        if filter(action) {
            weights.set(action, weights.get(action) * factor);
        }
    }
}

/// Linear cumulative scan: subtracts each weight from `roll` and returns the
/// first action that brings it to zero or below.
///
/// `roll` is expected in `[0, total)`. Zero-weight actions are never chosen.
pub fn pick_weighted(weights: &ActionWeights, roll: f32) -> IdleAction {
    if weights.total() <= 0.0 {
        return EMPTY_TABLE_FALLBACK;
    }

    let mut remaining = roll;
    for (action, weight) in weights.iter() {
        if weight <= 0.0 {
            continue;
        }
        remaining -= weight;
        if remaining <= 0.0 {
            return action;
        }
    }

    EXHAUSTED_SCAN_FALLBACK
}

/// Picks an idle action for a creature with the given personality and mood.
pub fn select_idle_action<R: Rng>(
    rng: &mut R,
    personality: Personality,
    mood: Mood,
    config: &MoodWeightConfig,
) -> IdleAction {
    let weights = apply_mood(&base_weights(personality), mood, config);
    let total = weights.total();
    if total <= 0.0 {
        return EMPTY_TABLE_FALLBACK;
    }

    // Random value in [0, total)
    let roll: f32 = rng.gen::<f32>() * total;
    pick_weighted(&weights, roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn table(entries: &[(IdleAction, f32)]) -> ActionWeights {
        let mut weights = ActionWeights([0.0; IdleAction::COUNT]);
        for &(action, weight) in entries {
            weights.set(action, weight);
        }
        weights
    }

    #[test]
    fn test_scan_example() {
        // a=10, b=20, c=30; roll 25 -> 15 left after a, -5 after b
        let weights = table(&[
            (IdleAction::Sleep, 10.0),
            (IdleAction::Eat, 20.0),
            (IdleAction::Move, 30.0),
        ]);

        assert_eq!(pick_weighted(&weights, 25.0), IdleAction::Eat);
        assert_eq!(pick_weighted(&weights, 10.0), IdleAction::Sleep);
        assert_eq!(pick_weighted(&weights, 0.0), IdleAction::Sleep);
        assert_eq!(pick_weighted(&weights, 59.9), IdleAction::Move);
    }

    #[test]
    fn test_zero_total_falls_back_to_sleep() {
        let empty = ActionWeights([0.0; IdleAction::COUNT]);
        assert_eq!(pick_weighted(&empty, 0.0), IdleAction::Sleep);

        let config = MoodWeightConfig {
            sick_sleep_weight: 0.0,
            sick_eat_weight: 0.0,
            ..MoodWeightConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(3);
        let action = select_idle_action(&mut rng, Personality::Energetic, Mood::Sick, &config);
        assert_eq!(action, IdleAction::Sleep);
    }

    #[test]
    fn test_exhausted_scan_falls_back_to_move() {
        let weights = table(&[(IdleAction::Sleep, 1.0), (IdleAction::Eat, 1.0)]);
        assert_eq!(pick_weighted(&weights, 5.0), IdleAction::Move);
    }

    #[test]
    fn test_apply_mood_does_not_mutate_base() {
        let base = base_weights(Personality::Energetic);
        let copy = base;
        let _ = apply_mood(&base, Mood::Ecstatic, &MoodWeightConfig::default());
        assert_eq!(base, copy);
    }

    #[test]
    fn test_sick_only_sleeps_and_eats() {
        let config = MoodWeightConfig::default();
        let weights = apply_mood(&base_weights(Personality::Energetic), Mood::Sick, &config);

        for (action, weight) in weights.iter() {
            match action {
                IdleAction::Sleep => assert_eq!(weight, 60.0),
                IdleAction::Eat => assert_eq!(weight, 20.0),
                _ => assert_eq!(weight, 0.0),
            }
        }

        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..2000 {
            let action = select_idle_action(&mut rng, Personality::Energetic, Mood::Sick, &config);
            assert!(matches!(action, IdleAction::Sleep | IdleAction::Eat));
        }
    }

    #[test]
    fn test_low_mood_transform() {
        let config = MoodWeightConfig::default();
        let base = base_weights(Personality::Gentle);

        for mood in [Mood::Sad, Mood::Miserable] {
            let weights = apply_mood(&base, mood, &config);
            assert_eq!(weights.get(IdleAction::Sleep), base.get(IdleAction::Sleep) * 2.0);
            assert_eq!(weights.get(IdleAction::Dance), base.get(IdleAction::Dance) * 0.4);
            assert_eq!(weights.get(IdleAction::Chase), base.get(IdleAction::Chase) * 0.4);
            assert_eq!(weights.get(IdleAction::Eat), base.get(IdleAction::Eat));
            assert_eq!(weights.get(IdleAction::Explore), base.get(IdleAction::Explore));
        }
    }

    #[test]
    fn test_ecstatic_transform() {
        let config = MoodWeightConfig::default();
        let base = base_weights(Personality::Chill);
        let weights = apply_mood(&base, Mood::Ecstatic, &config);

        assert_eq!(weights.get(IdleAction::Jump), base.get(IdleAction::Jump) * 1.5);
        assert_eq!(weights.get(IdleAction::Acrobatics), base.get(IdleAction::Acrobatics) * 1.5);
        assert_eq!(weights.get(IdleAction::Sleep), base.get(IdleAction::Sleep) * 0.5);
        assert_eq!(weights.get(IdleAction::Socialize), base.get(IdleAction::Socialize));
    }

    #[test]
    fn test_neutral_moods_unchanged() {
        let config = MoodWeightConfig::default();
        let base = base_weights(Personality::Curious);
        assert_eq!(apply_mood(&base, Mood::Happy, &config), base);
        assert_eq!(apply_mood(&base, Mood::Neutral, &config), base);
    }

    #[test]
    fn test_distribution_converges() {
        let config = MoodWeightConfig::default();
        let mut rng = SmallRng::seed_from_u64(12345);
        let expected = apply_mood(&base_weights(Personality::Foodie), Mood::Sad, &config)
            .probabilities();

        let trials = 50_000;
        let mut counts = [0usize; IdleAction::COUNT];
        for _ in 0..trials {
            let action = select_idle_action(&mut rng, Personality::Foodie, Mood::Sad, &config);
            counts[action.index()] += 1;
        }

        for (i, count) in counts.iter().enumerate() {
            let observed = *count as f32 / trials as f32;
            assert!(
                (observed - expected[i]).abs() < 0.02,
                "{:?}: observed {observed}, expected {}",
                IdleAction::ALL[i],
                expected[i]
            );
        }
    }
}
