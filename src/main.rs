//! Gesture-Driven Particle Morph
//!
//! Runs the particle field against a scripted hand. Headless by default:
//! ticks as fast as possible in simulated time and logs field statistics.
//! With `--realtime` the simulation runs on its own thread at 60 Hz while
//! this thread plays the tracker, publishing frames at camera rate.

mod script;
mod stats;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use particle_physics::{ShapeKind, REFERENCE_TICK};
use particle_simulation::{
    ConfigCommand, ForceMode, ParticleSimulation, RenderSink, SimulationConfig, SimulationRunner,
};
use script::GestureScript;
use stats::{log_field_stats, StatsSink};

/// Tracker publish interval in realtime mode (~30 fps camera)
const TRACKER_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Parser, Debug)]
#[command(version, about = "Gesture-driven particle morphing simulation")]
struct Args {
    /// YAML file with simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Shape to start in (sphere, heart, cube, spiral)
    #[arg(long)]
    shape: Option<ShapeKind>,

    /// Colour preset for the starting shape
    #[arg(long)]
    preset: Option<String>,

    /// Number of particles
    #[arg(long)]
    count: Option<u32>,

    #[arg(long)]
    strength: Option<f32>,

    /// Influence radius for proximity mode
    #[arg(long)]
    radius: Option<f32>,

    /// Force model (gesture, proximity)
    #[arg(long)]
    mode: Option<ForceMode>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks to run headless
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Run on the wall clock for this many seconds instead
    #[arg(long)]
    realtime: Option<f32>,

    /// Morph to the next shape at the end of every script cycle
    #[arg(long)]
    cycle_shapes: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config {}", path.display()))?;
            serde_yaml::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(shape) = args.shape {
        config.shape = shape;
    }
    if let Some(preset) = &args.preset {
        config.color_presets.insert(config.shape, preset.clone());
    }
    if let Some(count) = args.count {
        config.particle_count = count;
    }
    if let Some(strength) = args.strength {
        config.force_strength = strength;
    }
    if let Some(radius) = args.radius {
        config.force_radius = radius;
    }
    if let Some(mode) = args.mode {
        config.force_mode = mode;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate().context("Invalid simulation config")?;
    Ok(config)
}

fn next_shape(shape: ShapeKind) -> ShapeKind {
    let index = ShapeKind::ALL.iter().position(|s| *s == shape).unwrap_or(0);
    ShapeKind::ALL[(index + 1) % ShapeKind::ALL.len()]
}

fn run_headless(mut simulation: ParticleSimulation, script: &GestureScript, args: &Args) {
    let mailbox = simulation.mailbox();
    let mut sink = StatsSink::new();
    let mut cycle = 0;
    let mut last_phase = simulation.phase().name();

    for tick in 1..=args.ticks {
        let now = REFERENCE_TICK * tick;

        if args.cycle_shapes && script.cycle_index(now) != cycle {
            cycle = script.cycle_index(now);
            let shape = next_shape(simulation.config().shape);
            log::info!("Morphing to {}", shape);
            simulation.set_shape(shape);
        }

        mailbox.publish(script.frame_at(now));
        simulation.step(now);

        let phase = simulation.phase().name();
        if phase != last_phase {
            let gesture = simulation.gesture();
            log::info!(
                "{:>6.2}s: {} -> {} (hand {})",
                now.as_secs_f32(),
                last_phase,
                phase,
                if gesture.hand_detected {
                    format!("at ({:.2}, {:.2})", gesture.hand_position.x, gesture.hand_position.y)
                } else {
                    "absent".to_string()
                }
            );
            last_phase = phase;
        }

        let update = simulation.take_buffer_update();
        sink.present(simulation.particles(), update);

        if sink.should_report() {
            let label = format!("{:>6.2}s {:<9}", now.as_secs_f32(), phase);
            log_field_stats(&label, simulation.particles());
        }
    }

    log::info!(
        "Headless run finished: {} ticks, {}",
        simulation.tick_count(),
        sink.summary()
    );
}

fn run_realtime(
    simulation: ParticleSimulation,
    script: &GestureScript,
    args: &Args,
    seconds: f32,
) -> Result<()> {
    let mut shape = simulation.config().shape;
    let runner = SimulationRunner::spawn(simulation, StatsSink::reporting())
        .context("Failed to start simulation thread")?;
    let mailbox = runner.mailbox();
    let duration = Duration::from_secs_f32(seconds.max(0.0));
    let start = Instant::now();
    let mut cycle = 0;

    while start.elapsed() < duration {
        let elapsed = start.elapsed();

        if args.cycle_shapes && script.cycle_index(elapsed) != cycle {
            cycle = script.cycle_index(elapsed);
            shape = next_shape(shape);
            log::info!("Morphing to {}", shape);
            runner.send(ConfigCommand::SetShape(shape));
        }

        mailbox.publish(script.frame_at(elapsed));
        thread::sleep(TRACKER_INTERVAL);
    }

    let published = mailbox.sequence();
    match runner.stop() {
        Some(simulation) => log::info!(
            "Realtime run finished: {} ticks and {} tracker frames in {:.1}s, final phase {}",
            simulation.tick_count(),
            published,
            start.elapsed().as_secs_f32(),
            simulation.phase().name()
        ),
        None => log::warn!("Simulation thread did not finish cleanly"),
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    log::info!("Starting gesture-driven particle simulation...");
    log::info!(
        "  {} particles, shape {}, {} forces (strength {:.2}, radius {:.1})",
        config.particle_count,
        config.shape,
        config.force_mode,
        config.force_strength,
        config.force_radius
    );

    let simulation = ParticleSimulation::new(config)?;
    let script = GestureScript::default();

    match args.realtime {
        Some(seconds) => run_realtime(simulation, &script, &args, seconds)?,
        None => run_headless(simulation, &script, &args),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_count_must_fit_the_clock() {
        let args = Args::try_parse_from(["particle-morph", "--ticks", "1200"]).unwrap();
        assert_eq!(REFERENCE_TICK * args.ticks, REFERENCE_TICK * 1200);

        assert!(Args::try_parse_from(["particle-morph", "--ticks", "5000000000"]).is_err());
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let args = Args::try_parse_from([
            "particle-morph",
            "--shape",
            "heart",
            "--preset",
            "ember",
            "--strength",
            "0.3",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.shape, ShapeKind::Heart);
        assert_eq!(config.force_strength, 0.3);
        assert_eq!(config.preset_for(ShapeKind::Heart).name, "ember");

        let args = Args::try_parse_from(["particle-morph", "--count", "10"]).unwrap();
        assert!(load_config(&args).is_err());
    }
}
