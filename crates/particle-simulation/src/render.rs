//! Boundary to the rendering collaborator
//!
//! The renderer owns nothing of the simulation. After each tick it is handed the
//! position and colour buffers plus a note on what changed, so it can choose
//! between a partial write and a full re-upload.

use particle_physics::ParticleSet;

/// What happened to one buffer since the renderer last saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum BufferChange {
    #[default]
    Unchanged,
    /// Same allocation, contents written in place (every tick for positions)
    Updated,
    /// Swapped for a new array (shape, colour or particle count change)
    Replaced,
}

impl BufferChange {
    /// Combine two pending changes, keeping the stronger one
    pub fn merge(self, other: BufferChange) -> BufferChange {
        self.max(other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferUpdate {
    pub positions: BufferChange,
    pub colors: BufferChange,
}

impl BufferUpdate {
    /// Both buffers need a fresh upload
    pub const REPLACED: BufferUpdate = BufferUpdate {
        positions: BufferChange::Replaced,
        colors: BufferChange::Replaced,
    };

    pub fn merge(self, other: BufferUpdate) -> BufferUpdate {
        BufferUpdate {
            positions: self.positions.merge(other.positions),
            colors: self.colors.merge(other.colors),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.positions == BufferChange::Unchanged && self.colors == BufferChange::Unchanged
    }
}

/// Receives the particle buffers once per completed tick
pub trait RenderSink: Send {
    fn present(&mut self, particles: &ParticleSet, update: BufferUpdate);
}

impl<F> RenderSink for F
where
    F: FnMut(&ParticleSet, BufferUpdate) + Send,
{
    fn present(&mut self, particles: &ParticleSet, update: BufferUpdate) {
        self(particles, update)
    }
}
