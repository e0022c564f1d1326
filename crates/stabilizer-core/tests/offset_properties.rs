use proptest::prelude::*;

use steadycam_stabilizer::{
    compute_offset, HistoryBuffer, Mode, Offset, OffsetEstimator, SurfaceTransform, TiltSample,
    HISTORY_CAPACITY,
};

fn tilt() -> impl Strategy<Value = TiltSample> {
    (-180.0f64..180.0, -90.0f64..90.0).prop_map(|(beta, gamma)| TiltSample::new(beta, gamma))
}

fn active_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Cinematic), Just(Mode::Standard), Just(Mode::Auto)]
}

proptest! {
    #[test]
    fn off_is_always_zero_and_never_touches_history(
        warmup in prop::collection::vec(tilt(), 0..15),
        samples in prop::collection::vec(tilt(), 1..30),
    ) {
        let mut history = HistoryBuffer::new();
        for sample in &warmup {
            compute_offset(*sample, Mode::Standard, &mut history);
        }
        let before: Vec<_> = history.iter().collect();

        for sample in samples {
            let offset = compute_offset(sample, Mode::Off, &mut history);
            prop_assert_eq!(offset, Offset::ZERO);
        }
        prop_assert_eq!(history.iter().collect::<Vec<_>>(), before);
    }

    #[test]
    fn history_never_exceeds_capacity(
        mode in active_mode(),
        samples in prop::collection::vec(tilt(), 0..60),
    ) {
        let mut history = HistoryBuffer::new();
        for (i, sample) in samples.iter().enumerate() {
            compute_offset(*sample, mode, &mut history);
            prop_assert_eq!(history.len(), (i + 1).min(HISTORY_CAPACITY));
        }
    }

    #[test]
    fn constant_tilt_converges_to_scaled_value(
        mode in active_mode(),
        sample in tilt(),
        noise in prop::collection::vec(tilt(), 0..20),
        repeats in HISTORY_CAPACITY..40usize,
    ) {
        let params = mode.params().unwrap();
        let mut history = HistoryBuffer::new();
        for n in noise {
            compute_offset(n, mode, &mut history);
        }

        let mut offset = Offset::ZERO;
        for _ in 0..repeats {
            offset = compute_offset(sample, mode, &mut history);
        }

        let expected_x = -(sample.gamma * params.sensitivity * params.smoothing);
        let expected_y = -(sample.beta * params.sensitivity * params.smoothing);
        prop_assert!((offset.x - expected_x).abs() < 1e-9);
        prop_assert!((offset.y - expected_y).abs() < 1e-9);
        prop_assert_eq!(offset.rotation, 0.0);
    }

    #[test]
    fn offset_opposes_tilt(mode in active_mode(), sample in tilt()) {
        let mut history = HistoryBuffer::new();
        let offset = compute_offset(sample, mode, &mut history);
        prop_assert!(offset.x * sample.gamma <= 0.0);
        prop_assert!(offset.y * sample.beta <= 0.0);
    }
}

#[test]
fn fifteen_pushes_keep_the_last_ten_raw_offsets() {
    let mut history = HistoryBuffer::new();
    for gamma in 1..=15 {
        compute_offset(TiltSample::new(0.0, gamma as f64), Mode::Standard, &mut history);
    }

    let raw_x: Vec<f64> = history.iter().map(|(x, _)| x).collect();
    let expected: Vec<f64> = (6..=15).map(|g| g as f64 * 0.25).collect();
    assert_eq!(raw_x.len(), expected.len());
    for (got, want) in raw_x.iter().zip(&expected) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn first_offset_after_mode_switch_ignores_previous_mode() {
    let mut estimator = OffsetEstimator::new(Mode::Cinematic);
    for _ in 0..5 {
        estimator.compute(TiltSample::new(-40.0, 60.0));
    }

    estimator.set_mode(Mode::Auto);
    let offset = estimator.compute(TiltSample::new(10.0, 10.0));

    assert_eq!(estimator.history().len(), 1);
    assert!((offset.x + 1.8).abs() < 1e-9);
    assert!((offset.y + 1.8).abs() < 1e-9);
}

#[test]
fn neutral_transform_carries_no_offset() {
    let neutral = SurfaceTransform::neutral();
    assert_eq!(neutral.offset, Offset::ZERO);
    assert_eq!(neutral.css_transform(), "translate(-50%, -50%)");
}
