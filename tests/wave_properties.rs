//! Field, controller and calculator behaviour through the public API

use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use wave_lab::wave_field::{self, SampleGrid};
use wave_lab::{
    solve, FrameOutput, RelationError, SimulationController, SimulationMode, SimulationParams,
    WavePair, WaveParameters, WaveQuantity, WaveRelationInputs,
};

fn sample_parameters() -> Vec<WaveParameters> {
    vec![
        WaveParameters::new(1.0, 2.0 * PI, 3.0, 0.0),
        WaveParameters::new(2.0, PI, 5.0, 0.5),
        WaveParameters::new(1.5, 1.5 * PI, 4.0, PI),
        WaveParameters::new(0.3, 0.7, -2.0, -1.2),
    ]
}

#[test]
fn test_simple_matches_closed_form() {
    let grid = SampleGrid::default();
    for params in sample_parameters() {
        for &t in &[0.0, 0.1, 1.7, 12.3] {
            let ys = wave_field::simple(&params, t, grid.xs());
            for (&x, &y) in grid.xs().iter().zip(&ys) {
                let expected = params.amplitude
                    * (params.wavenumber * x - params.angular_frequency * t + params.phase).sin();
                assert_relative_eq!(y, expected, max_relative = 1e-9, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_superposition_sum_is_sum_of_simple_waves() {
    let grid = SampleGrid::default();
    let params = sample_parameters();
    let (first, second) = (&params[1], &params[2]);
    let t = 2.4;

    let field = wave_field::superposition(first, second, t, grid.xs());
    let y1 = wave_field::simple(first, t, grid.xs());
    let y2 = wave_field::simple(second, t, grid.xs());

    assert_eq!(field.first, y1);
    assert_eq!(field.second, y2);
    for i in 0..grid.len() {
        assert_eq!(field.sum[i], y1[i] + y2[i]);
    }
}

#[test]
fn test_forced_destructive_is_zero_everywhere() {
    let grid = SampleGrid::default();
    for params in sample_parameters() {
        for step in 0..50 {
            let field = wave_field::forced_destructive(&params, step as f64 * 0.1, grid.xs());
            assert!(field.sum.iter().all(|&y| y == 0.0));
        }
    }
}

#[test]
fn test_standing_closed_form() {
    let grid = SampleGrid::default();
    for params in sample_parameters() {
        let t = 0.9;
        let ys = wave_field::standing(&params, t, grid.xs());
        for (&x, &y) in grid.xs().iter().zip(&ys) {
            let expected = 2.0
                * params.amplitude
                * (params.wavenumber * x).cos()
                * (params.angular_frequency * t).sin();
            assert_eq!(y, expected);
        }
    }
}

#[test]
fn test_quarter_period_scenario() {
    let params = WaveParameters::new(1.0, 2.0 * PI, 3.0, 0.0);
    assert_abs_diff_eq!(wave_field::displacement(&params, 0.0, 0.0), 0.0, epsilon = 1e-12);
    assert_relative_eq!(wave_field::displacement(&params, 0.0, 0.25), 1.0, epsilon = 1e-12);
}

#[test]
fn test_mode_change_resets_time_and_trace() {
    let mut controller = SimulationController::default();
    controller.set_mode(SimulationMode::Standing);
    for _ in 0..10 {
        controller.tick();
    }
    assert!(controller.time() > 0.0);
    assert_eq!(controller.trace().len(), 10);

    for &mode in SimulationMode::all() {
        controller.tick();
        controller.set_mode(mode);
        assert_eq!(controller.mode(), mode);
        assert_eq!(controller.time(), 0.0);
        assert!(controller.trace().is_empty());
    }
}

#[test]
fn test_parse_failure_keeps_held_parameters() {
    let mut controller = SimulationController::default();
    controller.tick();
    let before = *controller.waves();

    controller.form_mut().set_field(0, "loud");
    controller.form_mut().set_field(2, "9");
    let frame = controller.tick();

    assert_eq!(*controller.waves(), before);
    let FrameOutput::Superposition(field) = frame.output else {
        panic!("default mode should be superposition");
    };
    let expected = wave_field::simple(&before.first, frame.time, controller.grid().xs());
    assert_eq!(field.first, expected);

    controller.form_mut().set_field(0, "3");
    controller.tick();
    assert_eq!(controller.waves().first.amplitude, 3.0);
    assert_eq!(controller.waves().first.angular_frequency, 9.0);
}

#[test]
fn test_forced_destructive_mirrors_wave_two() {
    let mut controller = SimulationController::new(SimulationParams::default(), WavePair::default());
    controller.set_mode(SimulationMode::ForcedDestructive);

    let WavePair { first, second } = *controller.waves();
    assert_eq!(second.amplitude, first.amplitude);
    assert_eq!(second.wavenumber, first.wavenumber);
    assert_eq!(second.angular_frequency, first.angular_frequency);
    assert_eq!(second.phase, first.phase + PI);

    let frame = controller.tick();
    assert_eq!(frame.mode, SimulationMode::ForcedDestructive);
    let FrameOutput::Superposition(field) = frame.output else {
        panic!("forced destructive mode should produce a superposition frame");
    };
    assert!(field.sum.iter().all(|&y| y == 0.0));
}

#[test]
fn test_standing_particle_follows_fixed_point() {
    let mut controller = SimulationController::default();
    controller.set_mode(SimulationMode::Standing);
    let particle_x = controller.params().particle_x;
    let first = controller.waves().first;

    for _ in 0..5 {
        let frame = controller.tick();
        let FrameOutput::Standing { particle, .. } = frame.output else {
            panic!("standing mode should produce a standing frame");
        };
        assert_eq!(particle, wave_field::particle_displacement(&first, frame.time, particle_x));
        assert_eq!(controller.trace().last(), Some([frame.time, particle]));
    }
}

#[test]
fn test_relation_round_trip() {
    let inputs = WaveRelationInputs::new()
        .with(WaveQuantity::Frequency, 2.0)
        .with(WaveQuantity::Wavelength, 3.0);
    let solved = solve(&inputs).unwrap();
    assert_abs_diff_eq!(solved.get(WaveQuantity::Speed).unwrap(), 6.0, epsilon = 1e-3);
    assert_abs_diff_eq!(solved.get(WaveQuantity::Wavenumber).unwrap(), 2.094, epsilon = 1e-3);
    assert_abs_diff_eq!(solved.get(WaveQuantity::AngularFrequency).unwrap(), 12.566, epsilon = 1e-3);
}

#[test]
fn test_relation_division_by_zero() {
    let inputs = WaveRelationInputs::new()
        .with(WaveQuantity::Speed, 5.0)
        .with(WaveQuantity::Wavelength, 0.0);
    match solve(&inputs) {
        Err(RelationError::DivisionByZero { .. }) => {}
        other => panic!("expected division by zero, got {other:?}"),
    }
}
