//! Procedural target shapes
//!
//! Each shape is a probability distribution over 3D space. Sampling draws every
//! particle independently and returns a flat `[x, y, z, x, y, z, ...]` buffer of
//! length `3 * count`, ready to become a particle set's target array.

use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Target shapes the particle field can morph into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Sphere,
    Heart,
    Cube,
    Spiral,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Sphere,
        ShapeKind::Heart,
        ShapeKind::Cube,
        ShapeKind::Spiral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Heart => "heart",
            ShapeKind::Cube => "cube",
            ShapeKind::Spiral => "spiral",
        }
    }

    /// Name of the colour preset used when none is configured for this shape
    pub fn default_preset(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "nebula",
            ShapeKind::Heart => "rose",
            ShapeKind::Cube => "neon",
            ShapeKind::Spiral => "galaxy",
        }
    }

    /// Draw a single target point from this shape's distribution
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match self {
            ShapeKind::Sphere => sphere_point(rng),
            ShapeKind::Heart => heart_point(rng),
            ShapeKind::Cube => cube_point(rng),
            ShapeKind::Spiral => spiral_point(rng),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown shape '{0}' (expected sphere, heart, cube or spiral)")]
pub struct ParseShapeError(pub String);

impl FromStr for ShapeKind {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseShapeError(s.to_string()))
    }
}

/// Sample `count` target positions for `shape`.
///
/// Returns a buffer of exactly `3 * count` finite values (empty for `count == 0`).
pub fn sample_shape<R: Rng + ?Sized>(shape: ShapeKind, count: u32, rng: &mut R) -> Vec<f32> {
    let mut positions = Vec::with_capacity(count as usize * 3);
    for _ in 0..count {
        positions.extend_from_slice(&shape.sample_point(rng).to_array());
    }
    positions
}

/// Uniform in volume: cube-root radius avoids clustering near the surface
fn sphere_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.random::<f32>() * TAU;
    let phi = (2.0 * rng.random::<f32>() - 1.0).acos();
    let r = rng.random::<f32>().cbrt() * SPHERE_RADIUS;

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Classic parametric heart curve, filled towards its centre
fn heart_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = rng.random::<f32>() * TAU;
    let fill = rng.random::<f32>().cbrt();

    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let z = (rng.random::<f32>() * 2.0 - 1.0) * fill * HEART_DEPTH;

    Vec3::new(x * fill * HEART_SCALE, y * fill * HEART_SCALE, z)
}

/// Shell on the six faces plus a uniform interior fill
fn cube_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let mut coord = || (rng.random::<f32>() * 2.0 - 1.0) * CUBE_HALF_EXTENT;
    let mut point = Vec3::new(coord(), coord(), coord());

    if rng.random::<f32>() < CUBE_SHELL_FRACTION {
        let face = rng.random_range(0..6usize);
        let sign = if face % 2 == 0 { 1.0 } else { -1.0 };
        point[face / 2] = sign * CUBE_HALF_EXTENT;
    }

    point
}

/// Helical column whose radius grows with the angle
fn spiral_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let max_angle = SPIRAL_TURNS * TAU;
    let angle = rng.random::<f32>() * max_angle;
    let radius = SPIRAL_BASE_RADIUS + SPIRAL_RADIUS_GROWTH * angle;
    let height = SPIRAL_RISE * angle - spiral_half_height();

    let mut jitter = || (rng.random::<f32>() - 0.5) * SPIRAL_JITTER;

    Vec3::new(
        angle.cos() * radius + jitter(),
        height + jitter(),
        angle.sin() * radius + jitter(),
    )
}

/// Upper bound of `|y|` for spiral targets, before jitter
fn spiral_half_height() -> f32 {
    SPIRAL_RISE * SPIRAL_TURNS * PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn points(buffer: &[f32]) -> impl Iterator<Item = Vec3> + '_ {
        buffer.chunks_exact(3).map(Vec3::from_slice)
    }

    #[test]
    fn test_sample_lengths_and_finiteness() {
        let mut rng = StdRng::seed_from_u64(1);
        for shape in ShapeKind::ALL {
            for count in [0u32, 1, 17, 1000] {
                let buffer = sample_shape(shape, count, &mut rng);
                assert_eq!(buffer.len(), 3 * count as usize, "{shape} x {count}");
                assert!(buffer.iter().all(|v| v.is_finite()), "{shape} produced NaN/inf");
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(sample_shape(ShapeKind::Heart, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_sphere_is_volumetric() {
        let mut rng = StdRng::seed_from_u64(3);
        let buffer = sample_shape(ShapeKind::Sphere, 100_000, &mut rng);

        let radii: Vec<f32> = points(&buffer).map(|p| p.length()).collect();
        assert!(radii.iter().all(|&r| r <= SPHERE_RADIUS + 1e-4));

        // Uniform volume puts ~0.3% of points in the outer 0.1% of the radius,
        // a surface sampler would put all of them there.
        let near_surface = radii.iter().filter(|&&r| r > SPHERE_RADIUS * 0.999).count();
        assert!((near_surface as f32 / radii.len() as f32) < 0.01);

        let mean = radii.iter().sum::<f32>() / radii.len() as f32;
        assert!((mean - SPHERE_RADIUS * 0.75).abs() < 0.02, "mean radius {mean}");
    }

    #[test]
    fn test_sphere_radial_density_increases() {
        let mut rng = StdRng::seed_from_u64(4);
        let buffer = sample_shape(ShapeKind::Sphere, 100_000, &mut rng);

        // Equal-width shells hold more points further out (~r²).
        let mut shells = [0usize; 5];
        for p in points(&buffer) {
            let shell = ((p.length() / SPHERE_RADIUS) * 5.0).min(4.0) as usize;
            shells[shell] += 1;
        }
        assert!(shells.windows(2).all(|w| w[0] < w[1]), "{shells:?}");
    }

    #[test]
    fn test_cube_shell_fraction() {
        let mut rng = StdRng::seed_from_u64(5);
        let buffer = sample_shape(ShapeKind::Cube, 100_000, &mut rng);

        let mut on_face = 0usize;
        let mut interior = 0usize;
        for p in points(&buffer) {
            let extent = p.abs().max_element();
            assert!(extent <= CUBE_HALF_EXTENT + 1e-6);
            if (extent - CUBE_HALF_EXTENT).abs() < 1e-6 {
                on_face += 1;
            } else {
                interior += 1;
            }
        }

        let face_fraction = on_face as f32 / 100_000.0;
        let interior_fraction = interior as f32 / 100_000.0;
        assert!((face_fraction - 0.7).abs() < 0.01, "faces {face_fraction}");
        assert!((interior_fraction - 0.3).abs() < 0.01, "interior {interior_fraction}");
    }

    #[test]
    fn test_heart_is_flattened() {
        let mut rng = StdRng::seed_from_u64(6);
        let buffer = sample_shape(ShapeKind::Heart, 20_000, &mut rng);

        let max = points(&buffer).fold(Vec3::ZERO, |acc, p| acc.max(p.abs()));
        assert!(max.x <= 16.0 * HEART_SCALE + 1e-4);
        assert!(max.z <= HEART_DEPTH + 1e-4);
        assert!(max.z < max.x);
    }

    #[test]
    fn test_spiral_is_centered_column() {
        let mut rng = StdRng::seed_from_u64(7);
        let buffer = sample_shape(ShapeKind::Spiral, 50_000, &mut rng);

        let half = spiral_half_height() + SPIRAL_JITTER;
        let mean_y = points(&buffer).map(|p| p.y).sum::<f32>() / 50_000.0;
        assert!(mean_y.abs() < 0.05, "mean height {mean_y}");
        assert!(points(&buffer).all(|p| p.y.abs() <= half));

        let max_radius = SPIRAL_BASE_RADIUS + SPIRAL_RADIUS_GROWTH * SPIRAL_TURNS * TAU;
        assert!(points(&buffer).all(|p| Vec3::new(p.x, 0.0, p.z).length() <= max_radius + SPIRAL_JITTER));
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("Heart".parse::<ShapeKind>(), Ok(ShapeKind::Heart));
        assert_eq!(" cube ".parse::<ShapeKind>(), Ok(ShapeKind::Cube));
        assert!("torus".parse::<ShapeKind>().is_err());
    }
}
