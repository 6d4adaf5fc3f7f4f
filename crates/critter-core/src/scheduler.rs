//! Behavior Scheduler
//!
//! Keeps every live creature "thinking" and "acting" on its own. Each creature
//! gets two independent repeating tasks (thoughts and idle actions), each
//! sleeping a fresh random delay between firings so creatures never fall into
//! lockstep.
//!
//! # Cancellation
//!
//! Every task carries the sink generation it was started under. [`BehaviorScheduler::stop`]
//! bumps the generation under the sink lock before aborting the task handles,
//! and tasks check the generation under that same lock before calling the
//! listener. Once `stop` returns, no event can reach the listener, even on a
//! multi-threaded runtime.
//!
//! # Snapshot staleness
//!
//! Timers work from the snapshot passed to [`BehaviorScheduler::start`] for as
//! long as they live; vitals are never re-read. A creature that was sad at
//! `start` keeps sad thoughts and sad action weights until `start` is called
//! again with fresh snapshots.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use critter_events::{BehaviorEvent, CreatureSnapshot, Personality};

use crate::config::CritterConfig;
use crate::content::PhraseTable;
use crate::mood::mood_of;
use crate::weights::select_idle_action;

/// Callback receiving behavior events.
///
/// Runs while the scheduler's sink lock is held: it must return quickly and
/// must not call back into the scheduler.
pub type Listener = Arc<dyn Fn(BehaviorEvent) + Send + Sync>;

/// Errors that can occur when starting the scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// `start` was called outside a tokio runtime
    #[error("behavior scheduler requires a running tokio runtime")]
    NoRuntime,
}

/// Which of a creature's two timers a task drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Thought,
    IdleAction,
}

#[derive(Default)]
struct SinkState {
    listener: Option<Listener>,
    /// Bumped on every stop; tasks from older generations stay silent
    generation: u64,
    running: bool,
}

/// Listener slot shared between the scheduler and its tasks.
#[derive(Default)]
struct EventSink {
    state: Mutex<SinkState>,
}

impl EventSink {
    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        let state = self.lock();
        state.running && state.generation == generation
    }

    /// Hands the event to the listener if `generation` is still live.
    fn deliver(&self, generation: u64, event: BehaviorEvent) -> bool {
        let state = self.lock();
        if !state.running || state.generation != generation {
            return false;
        }
        match &state.listener {
            Some(listener) => {
                listener(event);
                true
            }
            None => false,
        }
    }
}

/// Everything a timer task needs, cheap to clone.
#[derive(Clone)]
struct TimerContext {
    sink: Arc<EventSink>,
    content: Arc<PhraseTable>,
    config: Arc<CritterConfig>,
}

/// The two live task handles of one creature.
struct EntityTimers {
    thought: JoinHandle<()>,
    idle: JoinHandle<()>,
}

impl EntityTimers {
    fn abort(self) {
        self.thought.abort();
        self.idle.abort();
    }
}

/// Drives autonomous thoughts and idle actions for a set of creatures.
pub struct BehaviorScheduler {
    content: Arc<PhraseTable>,
    config: Arc<CritterConfig>,
    sink: Arc<EventSink>,
    /// Maps creature id -> its timer handles
    timers: HashMap<String, EntityTimers>,
}

impl BehaviorScheduler {
    /// Creates a stopped scheduler with no listener.
    pub fn new(content: PhraseTable, config: CritterConfig) -> Self {
        Self {
            content: Arc::new(content),
            config: Arc::new(config),
            sink: Arc::new(EventSink::default()),
            timers: HashMap::new(),
        }
    }

    /// Creates a scheduler with the built-in content and default tuning.
    pub fn with_defaults() -> Self {
        Self::new(crate::content::default_content(), CritterConfig::default())
    }

    /// Registers the event sink, replacing any previous one.
    pub fn set_listener<F>(&self, listener: F)
    where
        F: Fn(BehaviorEvent) + Send + Sync + 'static,
    {
        self.sink.lock().listener = Some(Arc::new(listener));
    }

    /// Cancels any running timers, then starts two timers per creature.
    ///
    /// The snapshots are captured as-is; see the module docs on staleness.
    /// A repeated id replaces the earlier creature's timers.
    pub fn start(&mut self, creatures: &[CreatureSnapshot]) -> Result<(), SchedulerError> {
        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        self.stop();

        let generation = {
            let mut state = self.sink.lock();
            state.running = true;
            state.generation
        };

        let ctx = TimerContext {
            sink: Arc::clone(&self.sink),
            content: Arc::clone(&self.content),
            config: Arc::clone(&self.config),
        };

        for creature in creatures {
            let timers = EntityTimers {
                thought: runtime.spawn(run_timer(
                    TimerKind::Thought,
                    creature.clone(),
                    ctx.clone(),
                    generation,
                )),
                idle: runtime.spawn(run_timer(
                    TimerKind::IdleAction,
                    creature.clone(),
                    ctx.clone(),
                    generation,
                )),
            };

            if let Some(previous) = self.timers.insert(creature.id.clone(), timers) {
                debug!("Replacing timers for duplicate creature {}", creature.id);
                previous.abort();
            }
        }

        info!(
            creatures = self.timers.len(),
            generation, "Behavior scheduler started"
        );
        Ok(())
    }

    /// Cancels every pending timer. Safe to call repeatedly.
    pub fn stop(&mut self) {
        {
            let mut state = self.sink.lock();
            state.generation += 1;
            state.running = false;
        }

        let count = self.timers.len();
        for (_, timers) in self.timers.drain() {
            timers.abort();
        }

        if count > 0 {
            info!(creatures = count, "Behavior scheduler stopped");
        }
    }

    /// Stops all timers and drops the listener.
    pub fn destroy(&mut self) {
        self.stop();
        self.sink.lock().listener = None;
    }

    /// Immediate reaction line for a tapped creature, or `"..."` if none exists.
    pub fn get_click_reaction(&self, personality: Personality) -> String {
        self.content
            .pick_click_reaction(&mut rand::thread_rng(), personality)
            .to_string()
    }

    /// Number of creatures with live timers.
    pub fn active_entities(&self) -> usize {
        self.timers.len()
    }

    pub fn is_running(&self) -> bool {
        self.sink.lock().running
    }

    pub fn config(&self) -> &CritterConfig {
        &self.config
    }
}

impl Drop for BehaviorScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sleep, fire, repeat until the generation goes stale or the task is aborted.
async fn run_timer(kind: TimerKind, creature: CreatureSnapshot, ctx: TimerContext, generation: u64) {
    let mut rng = SmallRng::from_entropy();

    loop {
        let delay = match kind {
            TimerKind::Thought => ctx.config.scheduler.thought_delay(&mut rng),
            TimerKind::IdleAction => ctx.config.scheduler.idle_delay(&mut rng),
        };
        tokio::time::sleep(delay).await;

        if !ctx.sink.is_current(generation) {
            break;
        }

        let mood = mood_of(&creature);
        let event = match kind {
            TimerKind::Thought => ctx
                .content
                .pick_thought(&mut rng, creature.personality, mood)
                .map(|text| BehaviorEvent::thought(creature.id.as_str(), text)),
            TimerKind::IdleAction => {
                let action = select_idle_action(
                    &mut rng,
                    creature.personality,
                    mood,
                    &ctx.config.mood_weights,
                );
                Some(BehaviorEvent::idle_action(creature.id.as_str(), action))
            }
        };

        match event {
            Some(event) => {
                debug!(creature = %creature.id, ?kind, %mood, "Behavior timer fired");
                ctx.sink.deliver(generation, event);
            }
            None => {
                debug!(creature = %creature.id, %mood, "No thought pool, staying quiet");
            }
        }
    }
}
