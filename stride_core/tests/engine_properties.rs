// stride_core/tests/engine_properties.rs

use approx::assert_abs_diff_eq;
use std::f64::consts::PI;
use stride_core::prelude::*;

const SAMPLE_PERIOD_MS: u64 = 20; // 50 Hz

fn no_rotation() -> Vector3 {
    Vector3::zeros()
}

/// Parameters without accelerometer smoothing, so buffered magnitudes equal the input.
fn unsmoothed() -> Parameters {
    Parameters {
        smoothing_factor: 0.0,
        ..Default::default()
    }
}

// --- Idle input ---

#[test]
fn test_all_zero_input_is_idempotent() {
    let mut engine = MotionEngine::default();
    for k in 0..600 {
        let snapshot = engine
            .ingest(Vector3::zeros(), Vector3::zeros(), k * 7)
            .unwrap();
        assert_eq!(snapshot.state.step_count, 0);
        assert_eq!(snapshot.state.distance_meters, 0.0);
    }

    assert_abs_diff_eq!(engine.position(), Vector3::zeros(), epsilon = 1e-12);
    assert!(engine
        .trajectory()
        .iter()
        .all(|p| p.position.norm() < 1e-12));
}

// --- Buffer bound ---

#[test]
fn test_buffer_holds_exactly_capacity_most_recent() {
    let mut buffer = SampleBuffer::new(7);
    for i in 0..50_u64 {
        let v = i as f64;
        buffer.push(Vector3::new(v, 0.0, 0.0), Vector3::new(0.0, 0.0, v), i);
    }

    assert_eq!(buffer.len(), 7);
    let expected: Vec<u64> = (43..50).collect();
    assert_eq!(buffer.timestamps().iter().copied().collect::<Vec<_>>(), expected);
    for (idx, t) in expected.iter().enumerate() {
        assert_eq!(buffer.accel()[idx].x, *t as f64);
        assert_eq!(buffer.gyro()[idx].z, *t as f64);
    }
}

// --- Step counting ---

#[test]
fn test_periodic_walk_counts_one_step_per_period() {
    let period_ms = 500.0;
    let duration_ms = 10_000;
    let mut engine = MotionEngine::new(unsmoothed());

    let mut walking_at_every_step = true;
    let mut t = 0;
    while t < duration_ms {
        let phase = 2.0 * PI * t as f64 / period_ms;
        let accel = Vector3::new(0.0, 0.0, 9.8 + 2.0 * phase.sin());
        let before = engine.current_state().state.step_count;
        let snapshot = engine.ingest(accel, no_rotation(), t).unwrap();
        if snapshot.state.step_count > before {
            walking_at_every_step &= snapshot.state.is_walking;
        }
        t += SAMPLE_PERIOD_MS;
    }

    let state = engine.current_state().state;
    let expected = (duration_ms as f64 / period_ms).floor() as u64;
    assert!(
        state.step_count + 1 >= expected && state.step_count <= expected + 1,
        "expected about {} steps, counted {}",
        expected,
        state.step_count
    );
    assert!(walking_at_every_step);
    assert_abs_diff_eq!(
        state.distance_meters,
        state.step_count as f64 * 0.7,
        epsilon = 1e-9
    );
    // 0.7 m every 0.5 s.
    assert_abs_diff_eq!(state.speed_mps, 1.4, epsilon = 1e-9);
}

#[test]
fn test_step_count_and_distance_never_decrease() {
    let mut engine = MotionEngine::new(unsmoothed());
    let mut last = MotionState::default();
    let mut t = 0;
    for k in 0..1500_u64 {
        // Walk, pause, walk again.
        let walking = !(500..900).contains(&k);
        let z = if walking {
            9.8 + 2.5 * (2.0 * PI * t as f64 / 600.0).sin()
        } else {
            9.8
        };
        let state = engine
            .ingest(Vector3::new(0.0, 0.0, z), no_rotation(), t)
            .unwrap()
            .state;
        assert!(state.step_count >= last.step_count);
        assert!(state.distance_meters >= last.distance_meters);
        assert!((0.0..=5.0).contains(&state.speed_mps));
        last = state;
        t += SAMPLE_PERIOD_MS;
    }
    // Counting resumed after the pause.
    assert!(last.step_count > 20);
}

// --- ZUPT ---

#[test]
fn test_zupt_converges_velocity_after_motion() {
    let mut engine = MotionEngine::new(unsmoothed());
    let mut t = 0;

    // Vertical bouncing with a net upward push builds up velocity.
    for k in 0..20 {
        let z = if k % 2 == 0 { 13.8 } else { 9.8 };
        engine.ingest(Vector3::new(0.0, 0.0, z), no_rotation(), t).unwrap();
        t += SAMPLE_PERIOD_MS;
    }
    let initial_speed = engine.velocity().norm();
    assert!(initial_speed > 0.1);

    // Hold still.
    let mut previous = initial_speed;
    let mut corrected_cycles = 0;
    for _ in 0..60 {
        engine.ingest(Vector3::new(0.0, 0.0, 9.8), no_rotation(), t).unwrap();
        t += SAMPLE_PERIOD_MS;

        let speed = engine.velocity().norm();
        assert!(speed <= previous + 1e-12, "velocity diverged: {} -> {}", previous, speed);
        if speed < previous {
            assert!(speed <= previous * 0.1 + 1e-15);
            corrected_cycles += 1;
        }
        previous = speed;
    }

    assert!(corrected_cycles > 0);
    assert!(previous < 1e-9);
}

// --- Reset ---

#[test]
fn test_reset_restores_construction_state_but_keeps_parameters() {
    let fresh = MotionEngine::default();
    let mut engine = MotionEngine::default();

    let update = ParameterUpdate {
        step_threshold: Some(3.0),
        avg_step_length: Some(0.9),
        ..Default::default()
    };
    engine.update_parameters(&update);

    let mut t = 0;
    for k in 0..300_u64 {
        let z = 9.8 + 3.0 * (k as f64 * 0.4).sin();
        engine
            .ingest(Vector3::new(0.4, -0.2, z), Vector3::new(0.1, 0.0, 0.3), t)
            .unwrap();
        t += SAMPLE_PERIOD_MS;
    }
    assert!(!engine.trajectory().is_empty());

    engine.reset();

    assert_eq!(engine.current_state(), fresh.current_state());
    assert_eq!(engine.position(), fresh.position());
    assert_eq!(engine.velocity(), fresh.velocity());
    assert_eq!(engine.orientation(), fresh.orientation());
    assert_eq!(engine.trajectory(), fresh.trajectory());
    assert_eq!(engine.buffered_samples(), 0);

    let mut expected = Parameters::default();
    expected.apply(&update);
    assert_eq!(engine.parameters(), expected);

    // Timestamps restart from scratch after a reset.
    assert!(engine.ingest(Vector3::zeros(), Vector3::zeros(), 0).is_ok());
}

// --- Direction ---

/// Feeds a vector whose z follows `z_of(k)` while |a| stays at 9.8, with the
/// classifier forced into "walking" through negative thresholds.
fn direction_after(z_of: impl Fn(u64) -> f64) -> Direction {
    let mut engine = MotionEngine::new(Parameters {
        smoothing_factor: 0.0,
        buffer_size: 8,
        move_threshold: -1.0,
        walk_threshold: -1.0,
        ..Default::default()
    });

    let mut snapshot = None;
    for k in 0..8 {
        let z = z_of(k);
        let x = (9.8 * 9.8 - z * z).sqrt();
        snapshot = Some(
            engine
                .ingest(Vector3::new(x, 0.0, z), no_rotation(), k * SAMPLE_PERIOD_MS)
                .unwrap(),
        );
    }
    let state = snapshot.unwrap().state;
    assert!(state.is_walking);
    state.direction
}

#[test]
fn test_direction_classification() {
    assert_eq!(direction_after(|k| 1.0 + 0.3 * k as f64), Direction::Forward);
    assert_eq!(direction_after(|k| 4.0 - 0.3 * k as f64), Direction::Backward);
    assert_eq!(direction_after(|_| 2.0), Direction::Uncertain);
}

#[test]
fn test_direction_is_stationary_when_not_walking() {
    let mut engine = MotionEngine::new(unsmoothed());
    for k in 0..30 {
        engine
            .ingest(Vector3::new(0.0, 0.0, 9.8), no_rotation(), k * SAMPLE_PERIOD_MS)
            .unwrap();
    }
    assert_eq!(engine.current_state().state.direction, Direction::Stationary);
}

// --- Trajectory cap ---

#[test]
fn test_trajectory_is_capped_at_1000_most_recent() {
    let mut engine = MotionEngine::default();
    for k in 0..1500_u64 {
        engine
            .ingest(Vector3::new(0.0, 0.0, 9.8), no_rotation(), k * SAMPLE_PERIOD_MS)
            .unwrap();
    }

    let trajectory = engine.trajectory();
    assert_eq!(trajectory.len(), 1000);
    assert_eq!(trajectory.first().unwrap().timestamp_ms, 500 * SAMPLE_PERIOD_MS);
    assert_eq!(trajectory.last().unwrap().timestamp_ms, 1499 * SAMPLE_PERIOD_MS);
}

// --- Defensive copies ---

#[test]
fn test_reads_are_copies() {
    let mut engine = MotionEngine::default();
    for k in 0..5 {
        engine
            .ingest(Vector3::new(0.0, 0.0, 9.8), no_rotation(), k * SAMPLE_PERIOD_MS)
            .unwrap();
    }

    let mut trajectory = engine.trajectory();
    trajectory.clear();
    let mut position = engine.position();
    position.x += 100.0;
    let mut snapshot = engine.current_state();
    snapshot.state.step_count = 99;

    assert_eq!(engine.trajectory().len(), 5);
    assert!(engine.position().x < 100.0);
    assert_eq!(engine.current_state().state.step_count, 0);
}
