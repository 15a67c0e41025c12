use approx::assert_abs_diff_eq;
use maya_anim_core::{
    euler_curves_to_quaternion, euler_to_quaternion, AnimParser, ChannelCurve, ChannelTable,
    Keyframe, Rotation,
};
use maya_anim_test_fixtures::animations;

fn curve(keys: &[(f32, f32)]) -> ChannelCurve {
    ChannelCurve::from_keys(keys.iter().map(|&(t, v)| Keyframe::new(t, v)))
}

fn times(c: &ChannelCurve) -> Vec<f32> {
    c.keys().iter().map(|k| k.time).collect()
}

fn same_rotation(a: [f32; 4], b: [f32; 4]) -> bool {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    (dot.abs() - 1.0).abs() < 1e-5
}

#[test]
fn converted_curves_reproduce_direct_conversion_at_sample_times() {
    let table = ChannelTable::default();
    let doc = AnimParser::new(&table)
        .parse("Wait1", &animations::text("wait").unwrap())
        .unwrap();
    let axes = match &doc.track("WaistN").unwrap().rotation {
        Rotation::Euler(axes) => axes.clone(),
        other => panic!("expected Euler rotation, got {other:?}"),
    };
    let quat = euler_curves_to_quaternion(&axes, false);

    let zero = ChannelCurve::constant(0.0, 0.0);
    let [x, y, z] = [0, 1, 2].map(|i| axes[i].as_ref().unwrap_or(&zero));
    for t in times(&quat.w) {
        let direct = euler_to_quaternion(x.evaluate(t), y.evaluate(t), z.evaluate(t));
        assert_eq!(quat.evaluate(t), direct, "at t={t}");
    }
}

#[test]
fn sample_set_is_union_of_axis_key_times() {
    let axes = [
        Some(curve(&[(0.0, 10.0), (1.0, 20.0)])),
        None,
        Some(curve(&[(0.0, -30.0), (1.5, 30.0)])),
    ];
    let quat = euler_curves_to_quaternion(&axes, false);
    assert_eq!(times(&quat.w), vec![0.0, 1.0, 1.5]);
    for (_, c) in quat.iter() {
        assert_eq!(c.len(), 3);
    }
}

#[test]
fn missing_axes_contribute_time_zero() {
    let axes = [None, Some(curve(&[(0.5, 30.0), (1.0, 60.0)])), None];
    let quat = euler_curves_to_quaternion(&axes, false);
    assert_eq!(times(&quat.x), vec![0.0, 0.5, 1.0]);
}

#[test]
fn y_only_rotation_has_no_spurious_x_or_z() {
    let axes = [None, Some(curve(&[(0.0, 35.0), (0.5, 80.0), (1.0, -20.0)])), None];
    let quat = euler_curves_to_quaternion(&axes, false);

    let [w, x, y, z] = quat.evaluate(0.0);
    assert_abs_diff_eq!(x, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(z, 0.0, epsilon = 1e-6);
    // Y is negated for the handedness change.
    let half = 17.5f32.to_radians();
    assert_abs_diff_eq!(w, half.cos(), epsilon = 1e-6);
    assert_abs_diff_eq!(y, -half.sin(), epsilon = 1e-6);

    for key in quat.x.keys().iter().chain(quat.z.keys()) {
        assert_abs_diff_eq!(key.value, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn composition_applies_x_then_y_then_z() {
    // Z * Y * X with Y and Z negated, written out by hand.
    let (x, y, z) = (30f32, 45f32, 60f32);
    let (hx, hy, hz) = (x.to_radians() / 2.0, -y.to_radians() / 2.0, -z.to_radians() / 2.0);
    let qx = [hx.cos(), hx.sin(), 0.0, 0.0];
    let qy = [hy.cos(), 0.0, hy.sin(), 0.0];
    let qz = [hz.cos(), 0.0, 0.0, hz.sin()];
    let mul = |a: [f32; 4], b: [f32; 4]| {
        [
            a[0] * b[0] - a[1] * b[1] - a[2] * b[2] - a[3] * b[3],
            a[0] * b[1] + a[1] * b[0] + a[2] * b[3] - a[3] * b[2],
            a[0] * b[2] - a[1] * b[3] + a[2] * b[0] + a[3] * b[1],
            a[0] * b[3] + a[1] * b[2] - a[2] * b[1] + a[3] * b[0],
        ]
    };
    let expected = mul(mul(qz, qy), qx);
    let got = euler_to_quaternion(x, y, z);
    for i in 0..4 {
        assert_abs_diff_eq!(got[i], expected[i], epsilon = 1e-6);
    }
}

#[test]
fn continuity_keeps_samples_on_one_hemisphere() {
    let axes = [Some(curve(&[(0.0, 0.0), (1.0, 200.0), (2.0, 370.0)])), None, None];

    let raw = euler_curves_to_quaternion(&axes, false);
    assert!(raw.w.keys()[1].value < 0.0);

    let smooth = euler_curves_to_quaternion(&axes, true);
    for t in [0.0, 1.0, 2.0] {
        assert!(same_rotation(raw.evaluate(t), smooth.evaluate(t)), "at t={t}");
    }
    let samples: Vec<[f32; 4]> = times(&smooth.w).into_iter().map(|t| smooth.evaluate(t)).collect();
    for pair in samples.windows(2) {
        let dot: f32 = pair[0].iter().zip(pair[1].iter()).map(|(a, b)| a * b).sum();
        assert!(dot >= 0.0, "{pair:?}");
    }
}
