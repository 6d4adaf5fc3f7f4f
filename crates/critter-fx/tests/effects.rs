//! Integration tests driving the effects engine like a render loop would.

use critter_fx::{EffectType, EffectsConfig, EffectsEngine, HeadlessStage, ShapeKind, Vec2};

fn engine(seed: u64) -> EffectsEngine<HeadlessStage> {
    let mut engine = EffectsEngine::with_seed(EffectsConfig::default(), seed);
    engine.init_ready(HeadlessStage::new());
    engine
}

/// Frames until the engine is empty, or `None` if it never empties.
fn run_until_empty(engine: &mut EffectsEngine<HeadlessStage>, dt: f32, max_frames: u32) -> Option<u32> {
    for frame in 0..max_frames {
        if engine.active_count() == 0 {
            return Some(frame);
        }
        engine.update(dt);
    }
    None
}

#[test]
fn test_every_effect_retires_within_its_lifetime() {
    for effect in EffectType::ALL {
        let mut engine = engine(99);
        engine.spawn(Vec2::new(200.0, 300.0), effect);

        let config = effect.config();
        assert_eq!(engine.active_count(), config.count, "{effect}");

        let frames = run_until_empty(&mut engine, 1.0, 1_000).unwrap();
        assert!(frames as f32 <= (config.duration * 1.3).ceil(), "{effect} lived {frames} frames");

        let stage = engine.stage().unwrap();
        assert_eq!(stage.attached, config.count as u64);
        assert_eq!(stage.detached, config.count as u64);
    }
}

#[test]
fn test_overlapping_bursts() {
    let mut engine = engine(5);
    engine.spawn(Vec2::ZERO, EffectType::Merge);
    for _ in 0..30 {
        engine.update(1.0);
    }
    engine.spawn(Vec2::ZERO, EffectType::Feed);
    engine.spawn(Vec2::ZERO, EffectType::Play);
    assert_eq!(engine.active_count(), 16 + 8 + 12);

    assert!(run_until_empty(&mut engine, 1.0, 1_000).is_some());
    let stage = engine.stage().unwrap();
    assert_eq!(stage.attached, 36);
    assert_eq!(stage.detached, 36);
    assert_eq!(stage.live_count(), 0);
}

#[test]
fn test_variable_frame_delta() {
    let mut engine = engine(8);
    engine.spawn(Vec2::ZERO, EffectType::LevelUp);

    // A slow frame can retire everything at once
    engine.update(1_000.0);
    assert_eq!(engine.active_count(), 0);
    assert_eq!(engine.stage().unwrap().detached, 20);
}

#[test]
fn test_feed_draws_hearts() {
    let mut engine = engine(2);
    engine.spawn(Vec2::ZERO, EffectType::Feed);
    assert!(engine.particles().all(|p| p.shape == ShapeKind::Heart));
}

#[test]
fn test_update_with_nothing_active() {
    let mut engine = engine(0);
    for _ in 0..100 {
        engine.update(1.0);
    }
    assert_eq!(engine.active_count(), 0);
    assert_eq!(engine.stage().unwrap().attached, 0);
}
