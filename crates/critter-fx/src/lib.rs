//! Transient particle effects for gameplay feedback.
//!
//! Gameplay handlers call [`EffectsEngine::spawn`] when an action resolves;
//! the render loop calls [`EffectsEngine::update`] every frame. Drawing is
//! delegated to a [`Stage`] provided by the renderer.
//!
//! # Modules
//!
//! - [`effect`]: Effect types and their visual configuration
//! - [`shape`]: Procedural circle, star and heart geometry
//! - [`particle`]: Particle motion, fade and shrink curves
//! - [`stage`]: Renderer seam and a headless implementation
//! - [`engine`]: The particle pool itself

pub mod effect;
pub mod engine;
pub mod particle;
pub mod shape;
pub mod stage;

pub use glam::Vec2;

// Re-export effect types
pub use effect::{EffectConfig, EffectType, EffectsConfig, EffectsConfigError, UnknownEffect};

// Re-export engine types
pub use engine::{EffectsEngine, InitError};

// Re-export particle and shape types
pub use particle::{opacity_at, scale_at, Particle, Pose};
pub use shape::{build_shape, star_points, Primitive, ShapeGeometry, ShapeKind};

// Re-export stage types
pub use stage::{HeadlessStage, ShapeId, Stage};
