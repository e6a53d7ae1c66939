use core::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use imu_dsp::{
    tilt_from_acceleration, AntiTurnCorrector, Calibration, ComplementaryIntegrator,
    ExponentialLowPass, FirFilter, FirParameters, PhysicalValueConverter, SimpsonIntegrator,
    Vector3, G,
};
use rstest::{fixture, rstest};

const FS: f64 = 100.0;
const DT: f64 = 1.0 / FS;

#[fixture]
fn band_pass() -> FirFilter {
    let params = FirParameters {
        order: 64,
        sampling_frequency: FS,
        window: true,
        normalize: true,
    };
    FirFilter::band_pass(params, 10.0, 20.0).unwrap()
}

/// Peak output amplitude for a unit sinusoid at `freq` Hz, once the delay
/// line is full.
#[allow(clippy::cast_precision_loss)]
fn steady_state_amplitude(filter: &mut FirFilter, freq: f64) -> f64 {
    let settle = filter.order() + 1;
    (0..settle + 400)
        .map(|n| filter.update((2.0 * PI * freq * n as f64 * DT).cos()))
        .skip(settle)
        .fold(0.0, |peak: f64, y| peak.max(y.abs()))
}

#[test]
fn zero_input_gives_zero_output() {
    let params = FirParameters {
        order: 4,
        sampling_frequency: 100.0,
        window: true,
        normalize: true,
    };
    let mut filter = FirFilter::low_pass(params, 10.0).unwrap();
    for _ in 0..100 {
        assert_eq!(filter.update(0.0), 0.0);
    }
}

#[rstest]
fn band_pass_passes_center_frequency(mut band_pass: FirFilter) {
    let amplitude = steady_state_amplitude(&mut band_pass, 15.0);
    assert_relative_eq!(amplitude, 1.0, epsilon = 0.02);
}

#[rstest]
#[case(0.0)]
#[case(FS / 2.0)]
fn band_pass_suppresses_dc_and_nyquist(mut band_pass: FirFilter, #[case] freq: f64) {
    let amplitude = steady_state_amplitude(&mut band_pass, freq);
    assert!(amplitude < 0.05, "amplitude {amplitude} at {freq} Hz");
}

#[test]
fn identity_converter_returns_raw_input() {
    let converter = PhysicalValueConverter::new(Calibration::default(), false).unwrap();
    for raw in [
        Vector3::zeros(),
        Vector3::new(1.0, -2.0, 3.5),
        Vector3::new(-32768.0, 32767.0, 16384.0),
    ] {
        assert_eq!(converter.convert(&raw), raw);
    }
}

#[test]
fn integrating_constant_velocity_gives_distance() {
    let mut integrator = SimpsonIntegrator::new(DT).unwrap();
    // 2 m/s for 1 s: 101 samples span 100 sub-intervals
    for _ in 0..=100 {
        integrator.integrate(2.0);
    }
    assert_relative_eq!(integrator.integral(), 2.0, epsilon = 1e-9);
}

#[test]
fn stationary_tilted_sensor_settles() {
    let roll = 0.3_f64;
    let counts_per_g = 16384.0;
    let raw = Vector3::new(0.0, roll.sin(), roll.cos()) * counts_per_g;

    let calibration = Calibration {
        scale: Vector3::from_element(G / counts_per_g),
        ..Calibration::default()
    };
    let converter = PhysicalValueConverter::new(calibration, false).unwrap();
    let mut smoothing = ExponentialLowPass::<3>::with_cutoff_freq(5.0, DT).unwrap();
    let mut fusion = ComplementaryIntegrator::new(0.98).unwrap();
    let mut anti_turn = AntiTurnCorrector::new(0.01).unwrap();

    // gyro at rest reports a small bias
    let gyro_bias = 0.002;

    let mut corrected = Vector3::zeros();
    for _ in 0..5000 {
        let accel = smoothing.filter(converter.convert(&raw));
        let tilt = tilt_from_acceleration(&accel);
        let fused = fusion.fuse_rate(tilt.x, gyro_bias, DT);
        corrected = anti_turn.correct(&Vector3::new(fused, tilt.y, 0.0));
    }

    assert_relative_eq!(fusion.estimate(), roll + 0.98 * gyro_bias * DT / 0.02, epsilon = 1e-6);
    assert_abs_diff_eq!(corrected, Vector3::zeros(), epsilon = 1e-9);
}
