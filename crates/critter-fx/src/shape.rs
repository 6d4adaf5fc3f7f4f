//! Procedural particle shapes.
//!
//! Geometry is described in local space around the origin, in screen
//! coordinates (y grows downward). The renderer turns it into real primitives.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Number of vertices in a star outline.
pub const STAR_VERTICES: usize = 10;

/// Inner radius of a star as a fraction of the outer radius.
pub const STAR_INNER_RATIO: f32 = 0.4;

/// Radius of each heart lobe as a fraction of the heart size.
pub const HEART_LOBE_RATIO: f32 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Star,
    Heart,
}

/// One filled primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Disc { center: Vec2, radius: f32 },
    Polygon { points: Vec<Vec2> },
}

/// A logical shape: one or more primitives sharing a fill colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    pub kind: ShapeKind,
    /// Fill colour as `0xRRGGBB`
    pub color: u32,
    pub primitives: Vec<Primitive>,
}

/// Builds the geometry for a shape of the given size.
pub fn build_shape(kind: ShapeKind, size: f32, color: u32) -> ShapeGeometry {
    let primitives = match kind {
        ShapeKind::Circle => vec![Primitive::Disc {
            center: Vec2::ZERO,
            radius: size,
        }],
        ShapeKind::Star => vec![Primitive::Polygon {
            points: star_points(size),
        }],
        ShapeKind::Heart => heart_primitives(size),
    };

    ShapeGeometry {
        kind,
        color,
        primitives,
    }
}

/// Star outline alternating between `radius` and `radius * 0.4`, starting
/// straight up and stepping by π/5.
pub fn star_points(radius: f32) -> Vec<Vec2> {
    let step = PI / 5.0;
    (0..STAR_VERTICES)
        .map(|i| {
            let r = if i % 2 == 0 {
                radius
            } else {
                radius * STAR_INNER_RATIO
            };
            let angle = -FRAC_PI_2 + i as f32 * step;
            Vec2::new(angle.cos() * r, angle.sin() * r)
        })
        .collect()
}

/// Two lobes side by side, lifted slightly, above a downward point.
fn heart_primitives(size: f32) -> Vec<Primitive> {
    let lobe = size * HEART_LOBE_RATIO;
    let lobe_x = size * 0.25;
    let lobe_y = -size * 0.15;

    vec![
        Primitive::Disc {
            center: Vec2::new(-lobe_x, lobe_y),
            radius: lobe,
        },
        Primitive::Disc {
            center: Vec2::new(lobe_x, lobe_y),
            radius: lobe,
        },
        Primitive::Polygon {
            points: vec![
                Vec2::new(-size * 0.68, size * 0.05),
                Vec2::new(size * 0.68, size * 0.05),
                Vec2::new(0.0, size * 0.8),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_star_has_ten_alternating_vertices() {
        let radius = 10.0;
        let points = star_points(radius);

        assert_eq!(points.len(), 10);
        for (i, point) in points.iter().enumerate() {
            let expected = if i % 2 == 0 { radius } else { radius * 0.4 };
            assert!((point.length() - expected).abs() < EPS, "vertex {i}: {point:?}");
        }
    }

    #[test]
    fn test_star_starts_at_top() {
        let points = star_points(5.0);
        let first = points[0];

        assert!(first.x.abs() < EPS);
        assert!((first.y + 5.0).abs() < EPS);
        assert!((first.y.atan2(first.x) + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_star_angular_step() {
        let points = star_points(1.0);
        for pair in points.windows(2) {
            let a = pair[0].y.atan2(pair[0].x);
            let b = pair[1].y.atan2(pair[1].x);
            let mut delta = b - a;
            if delta < 0.0 {
                delta += 2.0 * PI;
            }
            assert!((delta - PI / 5.0).abs() < EPS);
        }
    }

    #[test]
    fn test_circle_is_single_disc() {
        let shape = build_shape(ShapeKind::Circle, 4.0, 0xFF0000);
        assert_eq!(
            shape.primitives,
            vec![Primitive::Disc {
                center: Vec2::ZERO,
                radius: 4.0
            }]
        );
        assert_eq!(shape.color, 0xFF0000);
    }

    #[test]
    fn test_heart_layout() {
        let shape = build_shape(ShapeKind::Heart, 10.0, 0xFF6B9D);
        assert_eq!(shape.primitives.len(), 3);

        let (left, right) = match (&shape.primitives[0], &shape.primitives[1]) {
            (
                Primitive::Disc { center: l, radius: rl },
                Primitive::Disc { center: r, radius: rr },
            ) => {
                assert!((rl - 4.5).abs() < EPS);
                assert!((rr - 4.5).abs() < EPS);
                (*l, *r)
            }
            other => panic!("expected two discs, got {other:?}"),
        };

        // Symmetric and lifted
        assert!((left.x + right.x).abs() < EPS);
        assert!(left.y < 0.0 && (left.y - right.y).abs() < EPS);

        match &shape.primitives[2] {
            Primitive::Polygon { points } => {
                assert_eq!(points.len(), 3);
                assert!(points[2].y > left.y, "point should sit below the lobes");
            }
            other => panic!("expected triangle, got {other:?}"),
        }
    }
}
