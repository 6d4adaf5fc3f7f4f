//! Headless Critter Simulation
//!
//! Runs a handful of creatures through the behavior scheduler and prints
//! every behavior event as a JSON line on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use critter_core::{default_config_toml, BehaviorScheduler, CritterConfig, PhraseTable};
use critter_events::{
    current_time_of_day, season, weather, weather_buffs, weather_icon, weather_name,
    CalendarDate, CreatureSnapshot, Personality,
};
use critter_fx::{EffectType, EffectsConfig, EffectsEngine, HeadlessStage, Vec2};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "critter_sim")]
#[command(about = "Headless run of the creature behavior simulation")]
struct Args {
    /// Number of creatures to simulate
    #[arg(long, default_value_t = 6)]
    creatures: usize,

    /// Wall-clock seconds to run the scheduler for
    #[arg(long, default_value_t = 60)]
    seconds: u64,

    /// Divide every timer delay by this factor
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Random seed for creature generation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Tuning file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Phrase content file (TOML)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Play one effect burst on a headless stage before the run
    #[arg(long)]
    effect: Option<EffectType>,

    /// Effects motion tuning file (TOML)
    #[arg(long)]
    effects_config: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Builds creatures with spread-out personalities and random vitals.
fn generate_creatures(count: usize, seed: u64) -> Vec<CreatureSnapshot> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let personality = Personality::ALL[i % Personality::ALL.len()];
            let mut creature = CreatureSnapshot::new(format!("critter_{:03}", i), personality, 0.0)
                .with_vitals(
                    rng.gen_range(0.0..=100.0),
                    rng.gen_range(0.0..=100.0),
                    rng.gen_range(0.0..=100.0),
                );
            creature.is_sick = rng.gen_bool(0.1);
            creature
        })
        .collect()
}

fn report_weather() {
    let today = CalendarDate::today();
    let today_weather = weather(today);
    info!(
        "{} {} {} ({}, {})",
        today,
        weather_icon(today_weather),
        weather_name(today_weather),
        current_time_of_day(),
        season(today.month)
    );
    for (element, multiplier) in weather_buffs(today_weather).iter() {
        if multiplier != 1.0 {
            info!("  {:?} x{:.1}", element, multiplier);
        }
    }
}

fn play_effect(effect: EffectType, config: EffectsConfig, seed: u64) {
    let mut engine = EffectsEngine::with_seed(config, seed);
    engine.init_ready(HeadlessStage::new());
    engine.spawn(Vec2::ZERO, effect);

    let spawned = engine.active_count();
    let mut frames = 0u32;
    while engine.active_count() > 0 {
        engine.update(1.0);
        frames += 1;
    }

    if let Some(stage) = engine.stage() {
        info!(
            "{} effect: {} particles, gone after {} frames ({} attached, {} detached)",
            effect, spawned, frames, stage.attached, stage.detached
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => CritterConfig::from_file(path)?,
        None => CritterConfig::default(),
    };
    config.scheduler = config.scheduler.scaled(args.speed);

    let content = match &args.content {
        Some(path) => PhraseTable::from_file(path)?,
        None => critter_core::default_content(),
    };

    report_weather();

    if let Some(effect) = args.effect {
        let effects_config = match &args.effects_config {
            Some(path) => EffectsConfig::from_file(path)?,
            None => EffectsConfig::default(),
        };
        play_effect(effect, effects_config, args.seed);
    }

    let creatures = generate_creatures(args.creatures, args.seed);
    for creature in &creatures {
        info!(
            "{} ({}) mood {}",
            creature.id,
            creature.personality,
            critter_core::mood_of(creature)
        );
    }

    let mut scheduler = BehaviorScheduler::new(content, config);
    scheduler.set_listener(|event| match serde_json::to_string(&event) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!("Failed to encode event: {}", e),
    });
    scheduler.start(&creatures)?;

    tokio::time::sleep(Duration::from_secs(args.seconds)).await;

    scheduler.destroy();
    info!("Simulation finished after {}s", args.seconds);
    Ok(())
}
