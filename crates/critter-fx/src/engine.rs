//! Effects Engine
//!
//! Owns every live particle and the shape handles it created. `spawn` is
//! called from gameplay handlers, `update` once per render frame.

use std::f32::consts::TAU;
use std::fmt::Display;
use std::future::Future;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, info, warn};

use crate::effect::{EffectType, EffectsConfig};
use crate::particle::Particle;
use crate::shape::build_shape;
use crate::stage::Stage;

/// Horizontal spawn jitter, in pixels either way.
const JITTER_X: f32 = 10.0;
/// Vertical spawn jitter, in pixels either way.
const JITTER_Y: f32 = 5.0;
/// Used only if an effect's palette is empty.
const FALLBACK_COLOR: u32 = 0xFFFFFF;

/// Errors that can occur when starting stage preparation.
#[derive(Debug, Error)]
pub enum InitError {
    /// `init` was called outside a tokio runtime
    #[error("effects engine initialization requires a running tokio runtime")]
    NoRuntime,
}

/// Readiness of the renderer stage.
enum StageSlot<S> {
    Empty,
    Loading(oneshot::Receiver<S>),
    Ready(S),
}

/// A particle together with the renderer handle of its shape.
struct LiveParticle<H> {
    particle: Particle,
    /// Taken exactly once, on expiry or destroy
    handle: Option<H>,
}

/// Spawns, animates and retires decorative particles.
pub struct EffectsEngine<S: Stage> {
    stage: StageSlot<S>,
    particles: Vec<LiveParticle<S::Handle>>,
    rng: SmallRng,
    config: EffectsConfig,
}

impl<S: Stage> EffectsEngine<S> {
    /// Creates an engine with no stage yet; `spawn` does nothing until one is ready.
    pub fn new(config: EffectsConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Creates an engine with a seeded generator, for reproducible bursts.
    pub fn with_seed(config: EffectsConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: EffectsConfig, rng: SmallRng) -> Self {
        Self {
            stage: StageSlot::Empty,
            particles: Vec::new(),
            rng,
            config,
        }
    }

    /// Starts preparing the stage in the background.
    ///
    /// The engine stays inert until `loader` resolves; callers don't need to
    /// wait for it. If the loader fails, the failure is logged and the engine
    /// stays inert.
    pub fn init<F, E>(&mut self, loader: F) -> Result<(), InitError>
    where
        S: Send + 'static,
        F: Future<Output = Result<S, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| InitError::NoRuntime)?;
        let (tx, rx) = oneshot::channel();

        runtime.spawn(async move {
            match loader.await {
                Ok(stage) => {
                    if tx.send(stage).is_err() {
                        debug!("Effects engine dropped before its stage was ready");
                    }
                }
                Err(e) => warn!("Effects stage failed to initialize: {}", e),
            }
        });

        self.stage = StageSlot::Loading(rx);
        Ok(())
    }

    /// Installs an already prepared stage.
    pub fn init_ready(&mut self, stage: S) {
        self.stage = StageSlot::Ready(stage);
        info!("Effects engine ready");
    }

    /// True once a stage is available.
    pub fn is_ready(&mut self) -> bool {
        ready_stage(&mut self.stage).is_some()
    }

    /// Access to the stage once it is ready.
    pub fn stage(&mut self) -> Option<&mut S> {
        ready_stage(&mut self.stage)
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Emits one burst of `effect` particles around `position`.
    ///
    /// A silent no-op while the stage is not ready.
    pub fn spawn(&mut self, position: Vec2, effect: EffectType) {
        let Some(stage) = ready_stage(&mut self.stage) else {
            debug!("Ignoring {} effect, stage not ready", effect);
            return;
        };

        let config = effect.config();
        let rng = &mut self.rng;
        let max_spin = self.config.max_rotation_speed.abs();

        for _ in 0..config.count {
            let color = config.colors.choose(rng).copied().unwrap_or(FALLBACK_COLOR);
            let size = config.size * rng.gen_range(0.6..=1.4);
            let geometry = build_shape(config.shape, size, color);

            let jitter = Vec2::new(
                rng.gen_range(-JITTER_X..=JITTER_X),
                rng.gen_range(-JITTER_Y..=JITTER_Y),
            );
            let angle = rng.gen_range(0.0..TAU);
            let speed = config.spread * rng.gen_range(0.5..=1.0);
            let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed + config.gravity);

            let particle = Particle {
                shape: config.shape,
                color,
                position: position + jitter,
                velocity,
                rotation: 0.0,
                rotation_speed: if max_spin > 0.0 {
                    rng.gen_range(-max_spin..=max_spin)
                } else {
                    0.0
                },
                age: 0.0,
                max_age: config.duration * rng.gen_range(0.7..=1.3),
            };

            let handle = stage.attach(&geometry);
            stage.present(&handle, &particle.pose());
            self.particles.push(LiveParticle {
                particle,
                handle: Some(handle),
            });
        }

        debug!(
            "Spawned {} {} particles ({} live)",
            config.count,
            effect,
            self.particles.len()
        );
    }

    /// Advances every particle by `dt` frames and retires the expired ones.
    pub fn update(&mut self, dt: f32) {
        let drift = self.config.drift;
        let Some(stage) = ready_stage(&mut self.stage) else {
            return;
        };

        self.particles.retain_mut(|live| {
            live.particle.integrate(dt, drift);

            if live.particle.is_expired() {
                if let Some(handle) = live.handle.take() {
                    stage.detach(handle);
                }
                return false;
            }

            if let Some(handle) = &live.handle {
                stage.present(handle, &live.particle.pose());
            }
            true
        });
    }

    /// Detaches every live particle immediately, whatever its age.
    pub fn destroy(&mut self) {
        let count = self.particles.len();
        if let Some(stage) = ready_stage(&mut self.stage) {
            for mut live in self.particles.drain(..) {
                if let Some(handle) = live.handle.take() {
                    stage.detach(handle);
                }
            }
        }
        self.particles.clear();

        if count > 0 {
            debug!("Destroyed {} live particles", count);
        }
    }

    /// Number of live particles.
    pub fn active_count(&self) -> usize {
        self.particles.len()
    }

    /// Iterates the live particles.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().map(|live| &live.particle)
    }
}

impl<S: Stage> Drop for EffectsEngine<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Promotes a finished loader to `Ready` and returns the stage if there is one.
fn ready_stage<S>(slot: &mut StageSlot<S>) -> Option<&mut S> {
    if let StageSlot::Loading(rx) = slot {
        match rx.try_recv() {
            Ok(stage) => {
                *slot = StageSlot::Ready(stage);
                info!("Effects engine ready");
            }
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => {
                *slot = StageSlot::Empty;
                return None;
            }
        }
    }

    match slot {
        StageSlot::Ready(stage) => Some(stage),
        _ => None,
    }
}
