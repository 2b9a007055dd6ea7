//! Particle field simulation manager
//!
//! Owns the particle buffers, the derived gesture state and the random source.
//! Configuration setters regenerate buffers eagerly, so a tick never observes a
//! half-replaced array.

use std::time::Duration;

use particle_gesture::{FrameMailbox, GesturePhase, GestureState};
use particle_physics::{sample_shape, synthesize_colors, ParticleSet, ShapeKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::integrator::integrate;
use crate::params::{
    check_force_radius, check_force_strength, check_particle_count, lookup_preset, ConfigError,
    ForceMode, SimulationConfig,
};
use crate::render::{BufferChange, BufferUpdate};

/// A configuration change requested by the control layer
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigCommand {
    SetShape(ShapeKind),
    SetColorPreset { shape: ShapeKind, preset: String },
    SetParticleCount(u32),
    SetForceStrength(f32),
    SetForceRadius(f32),
    SetForceMode(ForceMode),
}

/// CPU particle field driven by hand gestures
pub struct ParticleSimulation {
    config: SimulationConfig,
    particles: ParticleSet,
    gesture: GestureState,
    mailbox: FrameMailbox,
    rng: StdRng,
    pending: BufferUpdate,
    tick_count: u64,
    last_tick: Duration,
}

impl ParticleSimulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let particles = generate_particles(&config, &mut rng);

        log::info!(
            "✓ Initialized {} particles as {} ({} forces)",
            particles.len(),
            config.shape,
            config.force_mode
        );

        Ok(Self {
            config,
            particles,
            gesture: GestureState::default(),
            mailbox: FrameMailbox::new(),
            rng,
            pending: BufferUpdate::REPLACED,
            tick_count: 0,
            last_tick: Duration::ZERO,
        })
    }

    /// Handle the tracker publishes detection frames into
    pub fn mailbox(&self) -> FrameMailbox {
        self.mailbox.clone()
    }

    /// Step the simulation forward by one tick.
    ///
    /// `now` is the simulation clock; it drives the explosion window.
    pub fn step(&mut self, now: Duration) {
        let frame = self.mailbox.latest();
        self.gesture = self.gesture.advance(&frame, now);

        integrate(
            &mut self.particles,
            &self.gesture,
            now,
            &self.config,
            &mut self.rng,
        );

        self.pending.positions = self.pending.positions.merge(BufferChange::Updated);
        self.tick_count += 1;
        self.last_tick = now;
    }

    /// Changes since the last call, then reset
    pub fn take_buffer_update(&mut self) -> BufferUpdate {
        std::mem::take(&mut self.pending)
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Phase as of the most recent tick
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase(self.last_tick)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Morph into a new shape. Positions and velocities carry over, so
    /// in-flight momentum flows into the reformation.
    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.config.shape = shape;
        let count = self.particles.len() as u32;
        let targets = sample_shape(shape, count, &mut self.rng);
        let colors = synthesize_colors(count, self.config.preset_for(shape), &mut self.rng);
        self.particles.replace_targets(targets);
        self.particles.replace_colors(colors);
        self.pending.colors = BufferChange::Replaced;

        log::info!("Morphing {} particles into {}", count, shape);
    }

    /// Choose the colour preset for `shape`; recolours now if it is the active shape
    pub fn set_color_preset(&mut self, shape: ShapeKind, preset: &str) -> Result<(), ConfigError> {
        let preset = lookup_preset(preset)?;
        self.config
            .color_presets
            .insert(shape, preset.name.to_string());

        if shape == self.config.shape {
            let count = self.particles.len() as u32;
            self.particles
                .replace_colors(synthesize_colors(count, preset, &mut self.rng));
            self.pending.colors = BufferChange::Replaced;
            log::info!("Recoloured {} with {}", shape, preset.name);
        }
        Ok(())
    }

    /// Reallocate all buffers for a new particle count
    pub fn set_particle_count(&mut self, count: u32) -> Result<(), ConfigError> {
        check_particle_count(count)?;
        if count as usize == self.particles.len() {
            return Ok(());
        }

        self.config.particle_count = count;
        self.particles = generate_particles(&self.config, &mut self.rng);
        self.pending = BufferUpdate::REPLACED;

        log::info!("Reallocated particle buffers for {} particles", count);
        Ok(())
    }

    pub fn set_force_strength(&mut self, strength: f32) -> Result<(), ConfigError> {
        check_force_strength(strength)?;
        self.config.force_strength = strength;
        Ok(())
    }

    pub fn set_force_radius(&mut self, radius: f32) -> Result<(), ConfigError> {
        check_force_radius(radius)?;
        self.config.force_radius = radius;
        Ok(())
    }

    pub fn set_force_mode(&mut self, mode: ForceMode) {
        self.config.force_mode = mode;
    }

    pub fn apply(&mut self, command: ConfigCommand) -> Result<(), ConfigError> {
        match command {
            ConfigCommand::SetShape(shape) => self.set_shape(shape),
            ConfigCommand::SetColorPreset { shape, preset } => {
                self.set_color_preset(shape, &preset)?
            }
            ConfigCommand::SetParticleCount(count) => self.set_particle_count(count)?,
            ConfigCommand::SetForceStrength(strength) => self.set_force_strength(strength)?,
            ConfigCommand::SetForceRadius(radius) => self.set_force_radius(radius)?,
            ConfigCommand::SetForceMode(mode) => self.set_force_mode(mode),
        }
        Ok(())
    }
}

/// Fresh buffers at rest on newly sampled targets
fn generate_particles(config: &SimulationConfig, rng: &mut StdRng) -> ParticleSet {
    let targets = sample_shape(config.shape, config.particle_count, rng);
    let colors = synthesize_colors(
        config.particle_count,
        config.preset_for(config.shape),
        rng,
    );
    ParticleSet::new(targets, colors)
}
