//! Per-tick particle integration
//!
//! One call advances every particle by one render frame: pick the force for the
//! current gesture phase, apply it, damp, then step positions (explicit Euler,
//! unit timestep). Particles never interact, so the loop is a single O(N) pass.

use std::time::Duration;

use glam::Vec3;
use particle_gesture::{GesturePhase, GestureState};
use particle_physics::{
    euler_step, explosion_impulse, gather_impulse, proximity_impulse, reform_stiffness,
    spring_impulse, ParticleSet, DAMPING, EXPLOSION_DAMPING, SPRING_STIFFNESS,
};
use rand::Rng;

use crate::params::{ForceMode, SimulationConfig};

/// Advance all particles by one tick
pub fn integrate<R: Rng + ?Sized>(
    particles: &mut ParticleSet,
    gesture: &GestureState,
    now: Duration,
    config: &SimulationConfig,
    rng: &mut R,
) {
    match config.force_mode {
        ForceMode::Gesture => integrate_gesture(particles, gesture, now, config, rng),
        ForceMode::Proximity => integrate_proximity(particles, gesture, config),
    }
}

/// Edge-triggered model: gather, burst, or spring back, one of them per tick.
///
/// The phase picks the force. Damping follows the explosion window alone, so a
/// fist closed mid-window gathers with the lighter explosion damping.
fn integrate_gesture<R: Rng + ?Sized>(
    particles: &mut ParticleSet,
    gesture: &GestureState,
    now: Duration,
    config: &SimulationConfig,
    rng: &mut R,
) {
    let strength = config.force_strength;
    let phase = gesture.phase(now);
    let damping = if gesture.explosion_elapsed(now).is_some() {
        EXPLOSION_DAMPING
    } else {
        DAMPING
    };

    match phase {
        GesturePhase::Gathering => particles.update_each(|position, velocity, _| {
            euler_step(position, velocity, gather_impulse(position, strength), damping)
        }),
        GesturePhase::Exploding { .. } if phase.is_bursting() => {
            particles.update_each(|position, velocity, _| {
                let impulse = explosion_impulse(position, strength, rng);
                euler_step(position, velocity, impulse, damping)
            })
        }
        GesturePhase::Exploding { progress } => {
            let stiffness = reform_stiffness(progress);
            particles.update_each(|position, velocity, target| {
                euler_step(position, velocity, spring_impulse(position, target, stiffness), damping)
            })
        }
        GesturePhase::Idle | GesturePhase::Reforming => {
            particles.update_each(|position, velocity, target| {
                let impulse = spring_impulse(position, target, SPRING_STIFFNESS);
                euler_step(position, velocity, impulse, damping)
            })
        }
    }
}

/// Proximity model: push/pull near the hand, spring and damping always on
fn integrate_proximity(particles: &mut ParticleSet, gesture: &GestureState, config: &SimulationConfig) {
    let pointer = gesture.hand_detected.then_some(gesture.hand_position);

    particles.update_each(|position, velocity, target| {
        let push = pointer.map_or(Vec3::ZERO, |pointer| {
            proximity_impulse(
                position,
                pointer,
                gesture.is_open,
                config.force_strength,
                config.force_radius,
            )
        });
        let impulse = push + spring_impulse(position, target, SPRING_STIFFNESS);
        euler_step(position, velocity, impulse, DAMPING)
    });
}
