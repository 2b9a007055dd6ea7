//! Render sink that stands in for a GPU upload and reports field statistics

use particle_physics::ParticleSet;
use particle_simulation::{BufferChange, BufferUpdate, RenderSink};

/// Ticks between statistics log lines (one simulated second at 60 Hz)
const REPORT_INTERVAL: u64 = 60;

/// Log one line of field statistics
pub fn log_field_stats(label: &str, particles: &ParticleSet) {
    log::info!(
        "{}: target distance {:.3} (max {:.3}), speed {:.4} (max {:.4})",
        label,
        particles.mean_target_distance(),
        particles.max_target_distance(),
        particles.mean_speed(),
        particles.max_speed()
    );
}

#[derive(Debug, Default)]
pub struct StatsSink {
    pub frames: u64,
    pub full_uploads: u64,
    pub bytes_uploaded: u64,
    /// Log field statistics every `REPORT_INTERVAL` frames
    report: bool,
}

impl StatsSink {
    /// Counts uploads without logging
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reporting() -> Self {
        Self {
            report: true,
            ..Self::default()
        }
    }

    pub fn record(&mut self, particles: &ParticleSet, update: BufferUpdate) {
        self.frames += 1;

        if update.positions != BufferChange::Unchanged {
            self.bytes_uploaded += particles.position_bytes().len() as u64;
        }
        if update.colors != BufferChange::Unchanged {
            self.bytes_uploaded += particles.color_bytes().len() as u64;
        }
        if update.positions == BufferChange::Replaced || update.colors == BufferChange::Replaced {
            self.full_uploads += 1;
        }
    }

    pub fn should_report(&self) -> bool {
        self.frames % REPORT_INTERVAL == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} frames, {} full uploads, {:.1} MiB uploaded",
            self.frames,
            self.full_uploads,
            self.bytes_uploaded as f64 / (1024.0 * 1024.0)
        )
    }
}

impl RenderSink for StatsSink {
    fn present(&mut self, particles: &ParticleSet, update: BufferUpdate) {
        self.record(particles, update);
        if self.report && self.should_report() {
            log_field_stats(&format!("frame {:>5}", self.frames), particles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_uploads() {
        let particles = ParticleSet::new(vec![0.0; 30], vec![1.0; 30]);
        let mut sink = StatsSink::new();

        sink.record(&particles, BufferUpdate::REPLACED);
        sink.record(
            &particles,
            BufferUpdate {
                positions: BufferChange::Updated,
                colors: BufferChange::Unchanged,
            },
        );
        sink.record(&particles, BufferUpdate::default());

        assert_eq!(sink.frames, 3);
        assert_eq!(sink.full_uploads, 1);
        assert_eq!(sink.bytes_uploaded, 3 * 120);
        assert!(!sink.should_report());
    }

    #[test]
    fn test_reports_once_per_interval() {
        let particles = ParticleSet::new(vec![0.0; 3], vec![1.0; 3]);
        let mut sink = StatsSink::reporting();
        for _ in 0..REPORT_INTERVAL {
            sink.present(&particles, BufferUpdate::default());
        }
        assert!(sink.should_report());
        assert_eq!(sink.bytes_uploaded, 0);
    }
}
