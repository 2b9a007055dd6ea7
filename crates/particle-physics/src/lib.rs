//! # Particle Physics
//!
//! Pure, allocation-light building blocks for the morphing particle field:
//! target shape sampling, colour synthesis, per-particle force laws and the
//! structure-of-arrays particle storage they operate on.

pub mod color;
pub mod constants;
pub mod forces;
pub mod particle;
pub mod shapes;

pub use color::*;
pub use constants::*;
pub use forces::*;
pub use particle::*;
pub use shapes::*;
