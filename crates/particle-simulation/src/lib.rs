//! # Particle Simulation Engine
//!
//! CPU simulation of a gesture-driven particle field: configuration, the
//! per-tick integrator for both force models, the simulation manager that
//! owns the buffers, and a fixed-rate runner thread.

pub mod clock;
pub mod integrator;
pub mod params;
pub mod render;
pub mod runner;
pub mod simulation;

pub use clock::*;
pub use integrator::*;
pub use params::*;
pub use render::*;
pub use runner::*;
pub use simulation::*;
