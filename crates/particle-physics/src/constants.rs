//! Tuning constants for the particle field
//!
//! All values are expressed per render tick: the integrator uses a unit
//! timestep, so spring constants and damping factors are tuned against a
//! ~60 Hz reference frame rate.

use std::time::Duration;

// Shape extents

/// Radius of the sphere target volume
pub const SPHERE_RADIUS: f32 = 2.5;

/// Half the side length of the cube target (side = 4)
pub const CUBE_HALF_EXTENT: f32 = 2.0;

/// Fraction of cube particles placed on the faces (the rest fill the volume)
pub const CUBE_SHELL_FRACTION: f32 = 0.7;

/// World units per unit of the parametric heart curve
pub const HEART_SCALE: f32 = 0.15;

/// Depth of the heart lobe relative to its radial fill factor
pub const HEART_DEPTH: f32 = 0.8;

/// Number of spiral turns (angle range is `SPIRAL_TURNS * 2π`)
pub const SPIRAL_TURNS: f32 = 4.0;

/// Radius at angle zero
pub const SPIRAL_BASE_RADIUS: f32 = 0.3;

/// Radius growth per radian
pub const SPIRAL_RADIUS_GROWTH: f32 = 0.15;

/// Height gained per radian
pub const SPIRAL_RISE: f32 = 0.2;

/// Full width of the uniform jitter applied to each spiral coordinate
pub const SPIRAL_JITTER: f32 = 0.3;

// Colour synthesis

/// Hue jitter in degrees, applied as uniform [-j, j]
pub const HUE_JITTER: f32 = 10.0;

pub const SATURATION_MIN: f32 = 0.8;
pub const SATURATION_MAX: f32 = 1.0;
pub const LIGHTNESS_MIN: f32 = 0.5;
pub const LIGHTNESS_MAX: f32 = 0.8;

// Forces

/// Floor for radial distances in gather/explode computations.
/// Prevents singularities at r→0
pub const MIN_RADIAL_DISTANCE: f32 = 0.1;

/// Gather pull, as a multiple of force strength
pub const GATHER_FORCE_SCALE: f32 = 0.8;

/// Explosion impulse, as a multiple of force strength
pub const EXPLOSION_FORCE_SCALE: f32 = 3.0;

/// Upper bound of the random extra explosion magnitude (uniform [0, x))
pub const EXPLOSION_FORCE_VARIANCE: f32 = 0.5;

/// Full width of the random tilt added to the explosion direction in the xy plane
pub const EXPLOSION_TILT: f32 = 0.5;

/// Pull strength relative to push in the proximity model
pub const PROXIMITY_PULL_RATIO: f32 = 0.5;

/// Spring constant outside the explosion window
pub const SPRING_STIFFNESS: f32 = 0.02;

/// Spring constant at the very start of an explosion window
pub const SPRING_STIFFNESS_MIN: f32 = 0.003;

// Damping (velocity multiplier per tick, higher = less friction)

pub const DAMPING: f32 = 0.92;

/// Damping while an explosion window is active
pub const EXPLOSION_DAMPING: f32 = 0.96;

// Timing

/// Reference tick interval (60 Hz) the per-tick constants are tuned for
pub const REFERENCE_TICK: Duration = Duration::from_nanos(16_666_667);

// Configuration ranges

pub const PARTICLE_COUNT_MIN: u32 = 5_000;
pub const PARTICLE_COUNT_MAX: u32 = 50_000;
pub const FORCE_STRENGTH_MIN: f32 = 0.05;
pub const FORCE_STRENGTH_MAX: f32 = 0.5;
pub const FORCE_RADIUS_MIN: f32 = 1.0;
pub const FORCE_RADIUS_MAX: f32 = 6.0;
