//! End-to-end tests for the behavior scheduler with the built-in content.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use critter_core::{default_content, mood_of, BehaviorScheduler, CritterConfig, PhraseTable};
use critter_events::{action_icon, BehaviorEvent, CreatureSnapshot, Mood, Personality};

fn collect(scheduler: &BehaviorScheduler) -> Arc<Mutex<Vec<BehaviorEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    scheduler.set_listener(move |event| sink.lock().unwrap().push(event));
    events
}

fn herd() -> Vec<CreatureSnapshot> {
    Personality::ALL
        .iter()
        .enumerate()
        .map(|(i, personality)| {
            let level = 10.0 + i as f32 * 15.0;
            CreatureSnapshot::new(format!("critter_{i}"), *personality, level)
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_every_creature_speaks_and_acts() {
    let mut scheduler = BehaviorScheduler::with_defaults();
    let events = collect(&scheduler);
    let creatures = herd();

    scheduler.start(&creatures).unwrap();
    assert_eq!(scheduler.active_entities(), creatures.len());
    tokio::time::sleep(Duration::from_secs(900)).await;
    scheduler.stop();

    let events = events.lock().unwrap();
    let thinkers: HashSet<_> = events
        .iter()
        .filter(|e| e.is_thought())
        .map(|e| e.entity_id().to_string())
        .collect();
    let actors: HashSet<_> = events
        .iter()
        .filter(|e| !e.is_thought())
        .map(|e| e.entity_id().to_string())
        .collect();

    assert_eq!(thinkers.len(), creatures.len());
    assert_eq!(actors.len(), creatures.len());
}

#[tokio::test(start_paused = true)]
async fn test_thoughts_come_from_the_right_pool() {
    let content = default_content();
    let mut scheduler = BehaviorScheduler::new(content.clone(), CritterConfig::default());
    let events = collect(&scheduler);
    let creatures = herd();

    scheduler.start(&creatures).unwrap();
    tokio::time::sleep(Duration::from_secs(600)).await;
    scheduler.destroy();

    for event in events.lock().unwrap().iter() {
        match event {
            BehaviorEvent::Thought { entity_id, text } => {
                let creature = creatures.iter().find(|c| &c.id == entity_id).unwrap();
                let pool = content
                    .thought_pool(creature.personality, mood_of(creature))
                    .unwrap();
                assert!(pool.contains(text), "{text:?} not in pool for {entity_id}");
            }
            BehaviorEvent::IdleAction { action_id, icon, .. } => {
                assert_eq!(icon, action_icon(action_id));
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_is_not_refreshed() {
    let mut scheduler = BehaviorScheduler::new(
        PhraseTable::from_str(
            r#"
            [personalities.energetic]
            thoughts = ["fine"]
            [personalities.energetic.mood_thoughts]
            miserable = ["miserable"]
            "#,
        )
        .unwrap(),
        CritterConfig::default(),
    );
    let events = collect(&scheduler);

    let mut creature = CreatureSnapshot::new("c1", Personality::Energetic, 5.0);
    assert_eq!(mood_of(&creature), Mood::Miserable);
    scheduler.start(std::slice::from_ref(&creature)).unwrap();

    // The caller's copy changes, the scheduler's does not
    creature.hunger = 100.0;
    creature.condition = 100.0;
    creature.affection = 100.0;
    tokio::time::sleep(Duration::from_secs(300)).await;

    let events = events.lock().unwrap();
    let thoughts: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            BehaviorEvent::Thought { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(!thoughts.is_empty());
    assert!(thoughts.iter().all(|t| *t == "miserable"));
}

#[tokio::test(start_paused = true)]
async fn test_fast_config_scales_delays() {
    let mut config = CritterConfig::default();
    config.scheduler = config.scheduler.scaled(15.0);
    let mut scheduler = BehaviorScheduler::new(default_content(), config);
    let events = collect(&scheduler);

    scheduler
        .start(&[CreatureSnapshot::new("c1", Personality::Gentle, 50.0)])
        .unwrap();
    // Thoughts every 1-3s, idle actions every 3-8s
    tokio::time::sleep(Duration::from_secs(30)).await;
    scheduler.stop();

    let events = events.lock().unwrap();
    assert!(events.iter().filter(|e| e.is_thought()).count() >= 10);
    assert!(events.iter().filter(|e| !e.is_thought()).count() >= 3);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_timers() {
    let events;
    {
        let mut scheduler = BehaviorScheduler::with_defaults();
        events = collect(&scheduler);
        scheduler
            .start(&[CreatureSnapshot::new("c1", Personality::Chill, 50.0)])
            .unwrap();
    }

    tokio::time::sleep(Duration::from_secs(1_000)).await;
    assert!(events.lock().unwrap().is_empty());
}
