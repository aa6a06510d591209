// stride_sim/src/worker.rs

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

use crate::error::SimError;
use stride_core::prelude::*;

/// Commands sent to the engine thread.
enum Command {
    Ingest {
        sample: SensorSample,
        /// Set when the caller waits for the outcome of this sample.
        reply: Option<mpsc::Sender<Result<MotionStateSnapshot, MotionError>>>,
    },
    UpdateParameters(ParameterUpdate),
    Reset,
    View(mpsc::Sender<EngineView>),
    Shutdown,
}

/// Acceptance counters kept by the engine thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub accepted: u64,
    pub rejected: u64,
}

/// Everything a reader may want from the engine, captured in one round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineView {
    pub snapshot: MotionStateSnapshot,
    pub position: Vector3,
    pub velocity: Vector3,
    pub orientation: Orientation,
    pub trajectory: Vec<TrajectoryPoint>,
    pub path_length: f64,
    pub parameters: Parameters,
    pub stats: WorkerStats,
}

impl EngineView {
    fn capture(engine: &MotionEngine, stats: WorkerStats) -> Self {
        Self {
            snapshot: engine.current_state(),
            position: engine.position(),
            velocity: engine.velocity(),
            orientation: engine.orientation(),
            trajectory: engine.trajectory(),
            path_length: engine.path_length(),
            parameters: engine.parameters(),
            stats,
        }
    }
}

/// Owns a [`MotionEngine`] on a dedicated thread.
///
/// All access goes through one command channel, so samples from any number
/// of producers are processed strictly one at a time, in send order.
#[derive(Debug)]
pub struct EngineWorker {
    command_tx: mpsc::Sender<Command>,
    handle: Option<JoinHandle<()>>,
}

impl EngineWorker {
    pub fn spawn(engine: MotionEngine) -> Result<Self, SimError> {
        let (command_tx, command_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("stride-engine".into())
            .spawn(move || Self::run(engine, command_rx))?;

        Ok(Self {
            command_tx,
            handle: Some(handle),
        })
    }

    fn run(mut engine: MotionEngine, command_rx: mpsc::Receiver<Command>) {
        debug!("Engine thread started");
        let mut stats = WorkerStats::default();

        // Also ends when every sender is gone.
        while let Ok(command) = command_rx.recv() {
            match command {
                Command::Ingest { sample, reply } => {
                    let result = engine.ingest_sample(&sample);
                    match result {
                        Ok(_) => stats.accepted += 1,
                        Err(_) => stats.rejected += 1,
                    }
                    if let Some(reply) = reply {
                        // The caller may have stopped waiting.
                        let _ = reply.send(result);
                    }
                }
                Command::UpdateParameters(update) => engine.update_parameters(&update),
                Command::Reset => {
                    engine.reset();
                    stats = WorkerStats::default();
                }
                Command::View(reply) => {
                    let _ = reply.send(EngineView::capture(&engine, stats));
                }
                Command::Shutdown => break,
            }
        }
        debug!(?stats, "Engine thread exiting");
    }

    fn send(&self, command: Command) -> Result<(), SimError> {
        self.command_tx.send(command).map_err(|_| SimError::WorkerGone)
    }

    /// Queues a sample without waiting for it to be processed.
    pub fn ingest(&self, sample: SensorSample) -> Result<(), SimError> {
        self.send(Command::Ingest {
            sample,
            reply: None,
        })
    }

    /// Processes a sample and returns its outcome, including rejection.
    pub fn ingest_and_wait(&self, sample: SensorSample) -> Result<MotionStateSnapshot, SimError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(Command::Ingest {
            sample,
            reply: Some(reply_tx),
        })?;
        let snapshot = reply_rx.recv().map_err(|_| SimError::WorkerGone)??;
        Ok(snapshot)
    }

    pub fn update_parameters(&self, update: ParameterUpdate) -> Result<(), SimError> {
        self.send(Command::UpdateParameters(update))
    }

    pub fn reset(&self) -> Result<(), SimError> {
        self.send(Command::Reset)
    }

    /// Waits for every previously queued command, then captures the engine.
    pub fn view(&self) -> Result<EngineView, SimError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(Command::View(reply_tx))?;
        reply_rx.recv().map_err(|_| SimError::WorkerGone)
    }

    /// Stops the thread after it drains the commands queued so far.
    pub fn shutdown(mut self) -> Result<(), SimError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), SimError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        // Fails only if the thread is already gone; join reports why.
        let _ = self.command_tx.send(Command::Shutdown);
        handle.join().map_err(|_| SimError::WorkerPanicked)
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            error!("Engine worker did not stop cleanly: {}", e);
        }
    }
}
