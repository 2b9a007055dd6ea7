//! Per-particle force laws
//!
//! Every function returns a velocity impulse for a single particle. Forces are
//! applied directly to velocity (unit mass, unit timestep); there is no
//! inter-particle interaction, so a tick is O(N).

use glam::Vec3;
use rand::Rng;

use crate::constants::*;

/// Pull towards the origin.
/// Zero inside `MIN_RADIAL_DISTANCE` so particles at the centre don't jitter
pub fn gather_impulse(position: Vec3, strength: f32) -> Vec3 {
    let distance = position.length();
    if distance < MIN_RADIAL_DISTANCE {
        return Vec3::ZERO;
    }

    -(position / distance) * GATHER_FORCE_SCALE * strength
}

/// Outward burst along the radial direction, tilted randomly in the xy plane
pub fn explosion_impulse<R: Rng + ?Sized>(position: Vec3, strength: f32, rng: &mut R) -> Vec3 {
    let distance = position.length().max(MIN_RADIAL_DISTANCE);
    let mut direction = position / distance;
    direction.x += (rng.random::<f32>() - 0.5) * EXPLOSION_TILT;
    direction.y += (rng.random::<f32>() - 0.5) * EXPLOSION_TILT;

    let magnitude =
        EXPLOSION_FORCE_SCALE * strength * (1.0 + rng.random::<f32>() * EXPLOSION_FORCE_VARIANCE);

    direction * magnitude
}

/// Hooke spring towards the target
pub fn spring_impulse(position: Vec3, target: Vec3, stiffness: f32) -> Vec3 {
    (target - position) * stiffness
}

/// Spring constant during an explosion window.
///
/// Ramps linearly from `SPRING_STIFFNESS_MIN` to `SPRING_STIFFNESS` as
/// `progress` goes 0 → 1, so the shape reassembles slowly at first.
pub fn reform_stiffness(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    SPRING_STIFFNESS_MIN + (SPRING_STIFFNESS - SPRING_STIFFNESS_MIN) * t
}

/// Radial push (open hand) or half-strength pull (closed hand) around a pointer.
/// Falls off linearly to zero at `radius`
pub fn proximity_impulse(
    position: Vec3,
    pointer: Vec3,
    open: bool,
    strength: f32,
    radius: f32,
) -> Vec3 {
    let offset = position - pointer;
    let distance = offset.length();
    if distance >= radius {
        return Vec3::ZERO;
    }

    let direction = offset / distance.max(MIN_RADIAL_DISTANCE);
    let falloff = (1.0 - distance / radius) * strength;

    if open {
        direction * falloff
    } else {
        -direction * falloff * PROXIMITY_PULL_RATIO
    }
}

/// One explicit Euler step: apply the impulse, damp, then advance.
/// Returns the new `(position, velocity)`
#[inline]
pub fn euler_step(position: Vec3, velocity: Vec3, impulse: Vec3, damping: f32) -> (Vec3, Vec3) {
    let velocity = (velocity + impulse) * damping;
    (position + velocity, velocity)
}
