//! Particle state and its stylized motion model.

use glam::Vec2;

use crate::shape::ShapeKind;

/// Share of a particle's life spent fading in.
pub const FADE_IN_END: f32 = 0.1;

/// Progress after which a particle starts shrinking.
pub const SHRINK_START: f32 = 0.7;

/// Where and how a particle's shape should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    /// Radians
    pub rotation: f32,
    pub scale: f32,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
}

/// A single live particle. Time values are in frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub shape: ShapeKind,
    pub color: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub age: f32,
    pub max_age: f32,
}

impl Particle {
    /// Advances the particle by `dt` frames.
    ///
    /// Moves by the current velocity, then bends the velocity upward by
    /// `drift`, so falling particles slow down and rising ones speed up.
    pub fn integrate(&mut self, dt: f32, drift: f32) {
        self.position += self.velocity * dt;
        self.velocity.y -= drift * dt;
        self.rotation += self.rotation_speed * dt;
        self.age += dt;
    }

    /// Fraction of life used, clamped to `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.max_age <= 0.0 {
            return 1.0;
        }
        (self.age / self.max_age).clamp(0.0, 1.0)
    }

    /// Fades in over the first 10% of life, then fades out to exactly zero.
    pub fn opacity(&self) -> f32 {
        opacity_at(self.progress())
    }

    /// Full size until 70% of life, then shrinks linearly to zero.
    pub fn scale(&self) -> f32 {
        scale_at(self.progress())
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.max_age
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale(),
            opacity: self.opacity(),
        }
    }
}

/// Opacity for a life progress in `0.0..=1.0`.
pub fn opacity_at(progress: f32) -> f32 {
    let alpha = if progress < FADE_IN_END {
        progress / FADE_IN_END
    } else {
        (1.0 - progress) / (1.0 - FADE_IN_END)
    };
    alpha.clamp(0.0, 1.0)
}

/// Scale for a life progress in `0.0..=1.0`.
pub fn scale_at(progress: f32) -> f32 {
    if progress <= SHRINK_START {
        1.0
    } else {
        ((1.0 - progress) / (1.0 - SHRINK_START)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(age: f32, max_age: f32) -> Particle {
        Particle {
            shape: ShapeKind::Circle,
            color: 0xFFFFFF,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            age,
            max_age,
        }
    }

    #[test]
    fn test_opacity_curve() {
        assert!((particle_at(5.0, 100.0).opacity() - 0.5).abs() < 1e-5);
        assert_eq!(particle_at(10.0, 100.0).opacity(), 1.0);
        assert!((particle_at(55.0, 100.0).opacity() - 0.5).abs() < 1e-5);
        assert_eq!(particle_at(100.0, 100.0).opacity(), 0.0);
        assert_eq!(particle_at(0.0, 100.0).opacity(), 0.0);
    }

    #[test]
    fn test_opacity_decreases_after_peak() {
        let mut previous = 1.0;
        for age in 10..=100 {
            let opacity = particle_at(age as f32, 100.0).opacity();
            assert!(opacity <= previous);
            previous = opacity;
        }
    }

    #[test]
    fn test_scale_curve() {
        for age in 0..=70 {
            assert_eq!(particle_at(age as f32, 100.0).scale(), 1.0, "age {age}");
        }
        assert!((particle_at(85.0, 100.0).scale() - 0.5).abs() < 1e-5);
        assert_eq!(particle_at(100.0, 100.0).scale(), 0.0);
    }

    #[test]
    fn test_integrate_applies_drift() {
        let mut particle = particle_at(0.0, 10.0);
        particle.velocity = Vec2::new(1.0, 2.0);
        particle.rotation_speed = 0.5;

        particle.integrate(2.0, 0.25);

        assert_eq!(particle.position, Vec2::new(2.0, 4.0));
        assert_eq!(particle.velocity, Vec2::new(1.0, 1.5));
        assert_eq!(particle.rotation, 1.0);
        assert_eq!(particle.age, 2.0);
    }

    #[test]
    fn test_expiry() {
        assert!(!particle_at(9.9, 10.0).is_expired());
        assert!(particle_at(10.0, 10.0).is_expired());
        assert_eq!(particle_at(20.0, 10.0).progress(), 1.0);
        assert_eq!(particle_at(1.0, 0.0).progress(), 1.0);
    }
}
