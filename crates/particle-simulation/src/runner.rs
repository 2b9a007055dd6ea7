//! Threaded simulation loop
//!
//! Moves a [`ParticleSimulation`] onto a worker thread that ticks at the
//! reference rate. The control layer talks to it through a command channel,
//! the tracker through the frame mailbox. Commands are applied between ticks,
//! and a stop request is honoured between ticks, never inside one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use particle_gesture::FrameMailbox;

use crate::clock::FixedTimestep;
use crate::render::RenderSink;
use crate::simulation::{ConfigCommand, ParticleSimulation};

pub struct SimulationRunner {
    stop: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
    commands: Sender<ConfigCommand>,
    mailbox: FrameMailbox,
    handle: Option<JoinHandle<ParticleSimulation>>,
}

impl SimulationRunner {
    /// Start ticking `simulation` at the reference rate on a new thread
    pub fn spawn<S: RenderSink + 'static>(
        simulation: ParticleSimulation,
        sink: S,
    ) -> io::Result<Self> {
        Self::spawn_with_clock(simulation, sink, FixedTimestep::default())
    }

    pub fn spawn_with_clock<S: RenderSink + 'static>(
        simulation: ParticleSimulation,
        sink: S,
        clock: FixedTimestep,
    ) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let ticks = Arc::new(AtomicU64::new(0));
        let (commands, receiver) = mpsc::channel();
        let mailbox = simulation.mailbox();

        let worker = Worker {
            simulation,
            sink,
            clock,
            commands: receiver,
            stop: stop.clone(),
            ticks: ticks.clone(),
        };
        let handle = thread::Builder::new()
            .name("particle-simulation".into())
            .spawn(move || worker.run())?;

        Ok(Self {
            stop,
            ticks,
            commands,
            mailbox,
            handle: Some(handle),
        })
    }

    /// Where the tracker publishes detection frames
    pub fn mailbox(&self) -> FrameMailbox {
        self.mailbox.clone()
    }

    /// Queue a configuration change for the next tick boundary
    pub fn send(&self, command: ConfigCommand) {
        if self.commands.send(command).is_err() {
            log::warn!("Simulation thread is gone, dropping command");
        }
    }

    /// Ticks completed so far
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop ticking and hand the simulation back.
    ///
    /// Once this returns no further tick will run. Returns `None` if the
    /// worker panicked.
    pub fn stop(mut self) -> Option<ParticleSimulation> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<ParticleSimulation> {
        self.stop.store(true, Ordering::Release);
        let handle = self.handle.take()?;
        handle.thread().unpark();
        match handle.join() {
            Ok(simulation) => Some(simulation),
            Err(_) => {
                log::warn!("Simulation thread panicked");
                None
            }
        }
    }
}

impl Drop for SimulationRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Worker<S> {
    simulation: ParticleSimulation,
    sink: S,
    clock: FixedTimestep,
    commands: Receiver<ConfigCommand>,
    stop: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
}

impl<S: RenderSink> Worker<S> {
    fn run(mut self) -> ParticleSimulation {
        log::info!("Simulation thread started ({:?} per tick)", self.clock.step());
        let start = Instant::now();

        while !self.stop.load(Ordering::Acquire) {
            let due = self.clock.advance(start.elapsed());
            for _ in 0..due {
                if self.stop.load(Ordering::Acquire) {
                    break;
                }
                self.apply_commands();
                self.tick();
            }
            thread::park_timeout(self.clock.until_next().max(Duration::from_millis(1)));
        }

        log::info!(
            "Simulation thread stopped after {} ticks",
            self.simulation.tick_count()
        );
        self.simulation
    }

    fn apply_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            log::debug!("Applying {:?}", command);
            if let Err(err) = self.simulation.apply(command) {
                log::warn!("Rejected configuration change: {}", err);
            }
        }
    }

    fn tick(&mut self) {
        let now = self.clock.tick();
        self.simulation.step(now);
        let update = self.simulation.take_buffer_update();
        self.sink.present(self.simulation.particles(), update);
        self.ticks.fetch_add(1, Ordering::Release);
    }
}
