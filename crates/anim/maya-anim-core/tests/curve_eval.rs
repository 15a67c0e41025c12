use approx::assert_abs_diff_eq;
use maya_anim_core::{ChannelCurve, Keyframe};

fn curve(keys: &[(f32, f32)]) -> ChannelCurve {
    ChannelCurve::from_keys(keys.iter().map(|&(t, v)| Keyframe::new(t, v)))
}

#[test]
fn evaluate_returns_key_values_at_key_times() {
    let c = curve(&[(0.0, 1.0), (0.25, -3.0), (1.0, 4.5), (1.5, 2.0)]);
    for key in c.keys() {
        assert_eq!(c.evaluate(key.time), key.value, "at t={}", key.time);
    }
}

#[test]
fn evaluate_clamps_outside_key_range() {
    let c = curve(&[(0.5, 2.0), (1.0, 6.0)]);
    assert_eq!(c.evaluate(-1.0), 2.0);
    assert_eq!(c.evaluate(0.0), 2.0);
    assert_eq!(c.evaluate(1.0001), 6.0);
    assert_eq!(c.evaluate(50.0), 6.0);
}

#[test]
fn two_keys_interpolate_linearly() {
    let c = curve(&[(0.0, 0.0), (1.0, 1.0)]);
    assert_abs_diff_eq!(c.evaluate(0.25), 0.25, epsilon = 1e-6);
    assert_abs_diff_eq!(c.evaluate(0.5), 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(c.evaluate(0.75), 0.75, epsilon = 1e-6);
}

#[test]
fn interior_tangent_averages_neighbouring_slopes() {
    // Peak key: slopes +10 and -10 cancel, the first key carries slope 10.
    let peak = curve(&[(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)]);
    assert_abs_diff_eq!(peak.evaluate(0.5), 6.25, epsilon = 1e-5);
    assert!(peak.evaluate(0.9) < 10.0);

    // Evenly spaced ramp stays a straight line.
    let ramp = curve(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    assert_abs_diff_eq!(ramp.evaluate(0.5), 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(ramp.evaluate(1.5), 1.5, epsilon = 1e-6);

    // Uneven spacing: the middle slope is (1 + 0) / 2, unweighted by time.
    let uneven = curve(&[(0.0, 0.0), (1.0, 1.0), (3.0, 1.0)]);
    assert_abs_diff_eq!(uneven.evaluate(0.5), 0.5625, epsilon = 1e-6);
}

#[test]
fn finalize_turns_single_key_into_hold() {
    let mut c = ChannelCurve::new();
    c.add_keyframe(0.25, 7.5);
    c.finalize_duration(2.0);

    assert_eq!(c.keys(), &[Keyframe::new(0.25, 7.5), Keyframe::new(2.0, 7.5)]);
    for i in 0..=20 {
        let t = 0.25 + (2.0 - 0.25) * (i as f32 / 20.0);
        assert_eq!(c.evaluate(t), 7.5, "at t={t}");
    }
}

#[test]
fn finalize_with_zero_end_time_keeps_degenerate_hold() {
    let mut c = ChannelCurve::constant(0.0, 3.0);
    c.finalize_duration(0.0);
    assert_eq!(c.len(), 2);
    assert_eq!(c.evaluate(0.0), 3.0);
    assert_eq!(c.evaluate(1.0), 3.0);
}

#[test]
fn duplicate_times_do_not_divide_by_zero() {
    let c = curve(&[(0.0, 1.0), (0.5, 2.0), (0.5, 4.0), (1.0, 4.0)]);
    assert!(c.evaluate(0.5).is_finite());
    assert!(c.evaluate(0.49).is_finite());
    assert_eq!(c.evaluate(1.0), 4.0);
}
