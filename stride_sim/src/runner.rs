// stride_sim/src/runner.rs

use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use crate::config::{segment_end_ms, validate};
use crate::config::structs::{MotionProfile, ScenarioConfig};
use crate::error::SimError;
use crate::pairing::SamplePairer;
use crate::prng::DEFAULT_SEED;
use crate::synth::ImuSynthesizer;
use crate::worker::{EngineView, EngineWorker};
use stride_core::prelude::*;

/// Collects engine events for the report.
struct EventLog(Arc<Mutex<Vec<MotionEvent>>>);

impl MotionObserver for EventLog {
    fn on_event(&mut self, event: &MotionEvent) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*event);
    }
}

/// Engine state at the end of one scripted segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    pub label: String,
    pub motion: MotionProfile,
    pub start_ms: u64,
    pub end_ms: u64,
    pub state: MotionState,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub seed: u64,
    /// Paired samples handed to the engine, accepted or not.
    pub samples: u64,
    pub segments: Vec<SegmentSummary>,
    pub events: Vec<MotionEvent>,
    pub final_view: EngineView,
}

/// Plays every segment of `config` through a fresh engine.
///
/// The seed comes from `seed_override`, then the scenario, then
/// [`DEFAULT_SEED`].
pub fn run_scenario(
    config: &ScenarioConfig,
    seed_override: Option<u64>,
) -> Result<RunSummary, SimError> {
    let seed = seed_override
        .or(config.simulation.seed)
        .unwrap_or(DEFAULT_SEED);
    validate(config)?;
    info!(seed, segments = config.segments.len(), "Starting run");

    let mut synth = ImuSynthesizer::new(&config.simulation, &config.noise, seed)?;
    let log = Arc::new(Mutex::new(Vec::new()));
    let engine =
        MotionEngine::new(config.engine.clone()).with_observer(Box::new(EventLog(log.clone())));
    let worker = EngineWorker::spawn(engine)?;
    let mut pairer = SamplePairer::new();

    let mut samples = 0;
    let mut segments = Vec::with_capacity(config.segments.len());
    let mut start_ms = config.simulation.start_timestamp_ms;

    for (index, segment) in config.segments.iter().enumerate() {
        let label = segment
            .name
            .clone()
            .unwrap_or_else(|| format!("segment {}", index + 1));

        if let Some(update) = segment.retune.as_ref().filter(|u| !u.is_empty()) {
            info!(segment = %label, ?update, "Retuning engine");
            worker.update_parameters(update.clone())?;
        }

        info!(segment = %label, start_ms, duration_s = segment.duration_s, "Running segment");
        for event in synth.segment_events(index, segment, start_ms)? {
            if let Some(sample) = pairer.push(&event) {
                worker.ingest(sample)?;
                samples += 1;
            }
        }

        let end_ms = segment_end_ms(index, segment, start_ms)?;
        let view = worker.view()?;
        segments.push(SegmentSummary {
            label,
            motion: segment.motion.clone(),
            start_ms,
            end_ms,
            state: view.snapshot.state,
        });
        start_ms = end_ms;
    }

    let final_view = worker.view()?;
    worker.shutdown()?;

    if final_view.stats.rejected > 0 {
        warn!(
            rejected = final_view.stats.rejected,
            "Some samples were rejected by the engine"
        );
    }

    let events = std::mem::take(&mut *log.lock().unwrap_or_else(PoisonError::into_inner));
    info!(
        steps = final_view.snapshot.state.step_count,
        distance_m = final_view.snapshot.state.distance_meters,
        "Run finished"
    );

    Ok(RunSummary {
        seed,
        samples,
        segments,
        events,
        final_view,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::structs::{NoiseConfig, SegmentConfig};
    use approx::assert_abs_diff_eq;

    fn segment(name: &str, duration_s: f64, motion: MotionProfile) -> SegmentConfig {
        SegmentConfig {
            name: Some(name.to_string()),
            duration_s,
            motion,
            retune: None,
        }
    }

    /// Idle, walk at 2 Hz, idle again; noise-free and unsmoothed.
    fn walk_and_pause() -> ScenarioConfig {
        ScenarioConfig {
            engine: Parameters {
                smoothing_factor: 0.0,
                ..Default::default()
            },
            noise: NoiseConfig {
                accel_std: [0.0; 3],
                gyro_std: [0.0; 3],
                glitch_probability: 0.0,
            },
            segments: vec![
                segment("rest", 2.0, MotionProfile::Idle),
                segment(
                    "walk",
                    5.0,
                    MotionProfile::Walk {
                        cadence_hz: 2.0,
                        amplitude: 2.0,
                        z_drift: 0.0,
                    },
                ),
                segment("stop", 2.0, MotionProfile::Idle),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_walk_and_pause() {
        let summary = run_scenario(&walk_and_pause(), Some(3)).unwrap();

        assert_eq!(summary.seed, 3);
        assert_eq!(summary.samples, 9 * 50);
        assert_eq!(summary.segments.len(), 3);

        let rest = &summary.segments[0].state;
        assert!(!rest.is_moving);
        assert_eq!(rest.step_count, 0);

        // The first peak after the rest only re-arms the step reference.
        let walk = &summary.segments[1].state;
        assert!((8..=11).contains(&walk.step_count), "{} steps", walk.step_count);
        assert_eq!(summary.segments[1].start_ms, 2000);
        assert_eq!(summary.segments[1].end_ms, 7000);

        let stop = &summary.segments[2].state;
        assert!(!stop.is_moving);
        assert_eq!(stop.speed_mps, 0.0);
        assert!(stop.step_count >= walk.step_count);

        let steps = summary
            .events
            .iter()
            .filter(|e| matches!(e, MotionEvent::StepDetected { .. }))
            .count() as u64;
        assert_eq!(steps, stop.step_count);
        assert!(matches!(
            summary.events.first(),
            Some(MotionEvent::MovementStarted { .. })
        ));
        assert!(matches!(
            summary.events.last(),
            Some(MotionEvent::MovementStopped { .. })
        ));
        assert_eq!(summary.final_view.stats.rejected, 0);
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let mut config = walk_and_pause();
        config.noise = NoiseConfig::default();
        config.simulation.seed = Some(11);

        let first = run_scenario(&config, None).unwrap();
        let second = run_scenario(&config, None).unwrap();
        assert_eq!(first.seed, 11);
        assert_eq!(first, second);
    }

    #[test]
    fn test_retune_applies_at_segment_start() {
        let mut config = walk_and_pause();
        config.segments[2].retune = Some(ParameterUpdate {
            avg_step_length: Some(1.0),
            ..Default::default()
        });

        let summary = run_scenario(&config, None).unwrap();
        assert_eq!(summary.seed, DEFAULT_SEED);
        assert_eq!(summary.final_view.parameters.avg_step_length, 1.0);
        let walk = &summary.segments[1].state;
        assert_abs_diff_eq!(walk.distance_meters, walk.step_count as f64 * 0.7, epsilon = 1e-9);
    }

    #[test]
    fn test_timeline_overflow_fails_before_running() {
        let mut config = walk_and_pause();
        config.simulation.start_timestamp_ms = u64::MAX - 3000;
        assert!(matches!(
            run_scenario(&config, None),
            Err(SimError::TimelineOverflow { index: 1 })
        ));

        config.simulation.start_timestamp_ms = 0;
        config.segments[0].duration_s = f64::INFINITY;
        assert!(matches!(
            run_scenario(&config, None),
            Err(SimError::SegmentDuration { index: 0, .. })
        ));
    }

    #[test]
    fn test_glitched_samples_are_counted_as_rejected() {
        let mut config = walk_and_pause();
        config.noise.glitch_probability = 1.0;

        let summary = run_scenario(&config, None).unwrap();
        assert_eq!(summary.final_view.stats.accepted, 0);
        assert_eq!(summary.final_view.stats.rejected, summary.samples);
        assert!(summary.events.is_empty());
    }
}
