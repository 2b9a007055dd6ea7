//! Particle storage for the morphing field
//!
//! Particles are kept as four parallel flat `f32` arrays (position, velocity,
//! target, colour), each of length `3 * count`. This is the layout the renderer
//! uploads, so positions and colours can be handed over without repacking.

use glam::Vec3;

/// Structure-of-arrays particle buffers
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSet {
    positions: Vec<f32>,
    velocities: Vec<f32>,
    targets: Vec<f32>,
    colors: Vec<f32>,
}

impl ParticleSet {
    /// Create a set at rest on its targets.
    ///
    /// # Panics
    /// If `targets` and `colors` differ in length or are not a multiple of 3.
    pub fn new(targets: Vec<f32>, colors: Vec<f32>) -> Self {
        assert_eq!(targets.len() % 3, 0, "target buffer must hold xyz triples");
        assert_eq!(
            targets.len(),
            colors.len(),
            "target and colour buffers must have equal length"
        );

        Self {
            positions: targets.clone(),
            velocities: vec![0.0; targets.len()],
            targets,
            colors,
        }
    }

    /// Create a set from explicit buffers (used to restore or script a state)
    ///
    /// # Panics
    /// If the four buffers differ in length or are not a multiple of 3.
    pub fn from_parts(
        positions: Vec<f32>,
        velocities: Vec<f32>,
        targets: Vec<f32>,
        colors: Vec<f32>,
    ) -> Self {
        let set = Self {
            positions,
            velocities,
            targets,
            colors,
        };
        set.assert_layout();
        set
    }

    fn assert_layout(&self) {
        let len = self.positions.len();
        assert_eq!(len % 3, 0, "particle buffers must hold xyz triples");
        assert_eq!(self.velocities.len(), len, "velocity buffer length mismatch");
        assert_eq!(self.targets.len(), len, "target buffer length mismatch");
        assert_eq!(self.colors.len(), len, "colour buffer length mismatch");
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Swap in a new target array, keeping positions and velocities.
    ///
    /// # Panics
    /// If the replacement has a different length.
    pub fn replace_targets(&mut self, targets: Vec<f32>) {
        assert_eq!(
            targets.len(),
            self.targets.len(),
            "replacement targets must match particle count"
        );
        self.targets = targets;
    }

    /// Swap in a new colour array.
    ///
    /// # Panics
    /// If the replacement has a different length.
    pub fn replace_colors(&mut self, colors: Vec<f32>) {
        assert_eq!(
            colors.len(),
            self.colors.len(),
            "replacement colours must match particle count"
        );
        self.colors = colors;
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn targets(&self) -> &[f32] {
        &self.targets
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Position buffer as raw bytes for GPU upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colour buffer as raw bytes for GPU upload
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    pub fn velocity(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.velocities[index * 3..index * 3 + 3])
    }

    pub fn target(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.targets[index * 3..index * 3 + 3])
    }

    /// Visit every particle mutably as `(position, velocity, target)`.
    ///
    /// The closure returns the updated `(position, velocity)`.
    pub fn update_each<F>(&mut self, mut f: F)
    where
        F: FnMut(Vec3, Vec3, Vec3) -> (Vec3, Vec3),
    {
        let particles = self
            .positions
            .chunks_exact_mut(3)
            .zip(self.velocities.chunks_exact_mut(3))
            .zip(self.targets.chunks_exact(3));

        for ((position, velocity), target) in particles {
            let (new_position, new_velocity) = f(
                Vec3::from_slice(position),
                Vec3::from_slice(velocity),
                Vec3::from_slice(target),
            );
            new_position.write_to_slice(position);
            new_velocity.write_to_slice(velocity);
        }
    }

    /// Mean distance between each particle and its target
    pub fn mean_target_distance(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let total: f32 = (0..self.len())
            .map(|i| self.position(i).distance(self.target(i)))
            .sum();
        total / self.len() as f32
    }

    /// Largest distance between any particle and its target
    pub fn max_target_distance(&self) -> f32 {
        (0..self.len())
            .map(|i| self.position(i).distance(self.target(i)))
            .fold(0.0, f32::max)
    }

    pub fn mean_speed(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let total: f32 = self.velocities.chunks_exact(3).map(speed).sum();
        total / self.len() as f32
    }

    pub fn max_speed(&self) -> f32 {
        self.velocities.chunks_exact(3).map(speed).fold(0.0, f32::max)
    }
}

fn speed(velocity: &[f32]) -> f32 {
    Vec3::from_slice(velocity).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ParticleSet {
        ParticleSet::new(
            vec![1.0, 2.0, 3.0, -1.0, 0.0, 0.5],
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
        )
    }

    #[test]
    fn test_new_set_rests_on_targets() {
        let set = sample_set();
        assert_eq!(set.len(), 2);
        assert_eq!(set.positions(), set.targets());
        assert!(set.velocities().iter().all(|&v| v == 0.0));
        assert_eq!(set.mean_target_distance(), 0.0);
        assert_eq!(set.max_speed(), 0.0);
    }

    #[test]
    fn test_replace_targets_keeps_motion() {
        let mut set = sample_set();
        set.update_each(|p, _, _| (p + Vec3::X, Vec3::Y));
        set.replace_targets(vec![0.0; 6]);

        assert_eq!(set.position(0), Vec3::new(2.0, 2.0, 3.0));
        assert_eq!(set.velocity(1), Vec3::Y);
        assert_eq!(set.target(1), Vec3::ZERO);
    }

    #[test]
    #[should_panic(expected = "replacement targets must match particle count")]
    fn test_replace_targets_rejects_wrong_length() {
        let mut set = sample_set();
        set.replace_targets(vec![0.0; 9]);
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_mismatched_buffers() {
        ParticleSet::new(vec![0.0; 6], vec![0.0; 3]);
    }

    #[test]
    fn test_byte_views() {
        let set = sample_set();
        assert_eq!(set.position_bytes().len(), 6 * std::mem::size_of::<f32>());
        assert_eq!(set.color_bytes().len(), set.position_bytes().len());
    }

    #[test]
    fn test_statistics() {
        let mut set = sample_set();
        set.update_each(|p, _, _| (p + Vec3::new(3.0, 4.0, 0.0), Vec3::new(0.0, 0.0, 2.0)));
        assert!((set.mean_target_distance() - 5.0).abs() < 1e-6);
        assert!((set.max_target_distance() - 5.0).abs() < 1e-6);
        assert!((set.mean_speed() - 2.0).abs() < 1e-6);
    }
}
