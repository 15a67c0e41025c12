//! Euler-to-quaternion conversion for rotation curves.
//!
//! Quaternion components are nonlinear in all three Euler angles, so the
//! three axis curves are resampled jointly at every time any of them has a
//! key. Source angles are right-handed degrees; the output is the
//! left-handed engine convention obtained by negating Y and Z and composing
//! `Z * Y * X`.

use nalgebra::{UnitQuaternion, Vector3};

use crate::curve::ChannelCurve;
use crate::data::QuatCurves;

/// Convert right-handed Euler angles (degrees) into a left-handed quaternion
/// returned as `[w, x, y, z]`.
pub fn euler_to_quaternion(x: f32, y: f32, z: f32) -> [f32; 4] {
    let (x, y, z) = (x, -y, -z);
    let qx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), x.to_radians());
    let qy = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y.to_radians());
    let qz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z.to_radians());
    let q = qz * qy * qx;
    [q.w, q.i, q.j, q.k]
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

/// Every distinct key time across `curves`, ascending.
fn sample_times(curves: &[&ChannelCurve]) -> Vec<f32> {
    let mut times: Vec<f32> = curves
        .iter()
        .flat_map(|c| c.keys().iter().map(|k| k.time))
        .collect();
    times.sort_by(f32::total_cmp);
    times.dedup();
    times
}

/// Resample Euler curves (x, y, z; any may be missing) into quaternion curves.
///
/// A missing axis is treated as a constant 0 with a key at time 0, which
/// contributes that time to the sample set. With `continuity` set, each
/// sample is sign-flipped onto the hemisphere of the previous one.
pub fn euler_curves_to_quaternion(euler: &[Option<ChannelCurve>; 3], continuity: bool) -> QuatCurves {
    let zero = ChannelCurve::constant(0.0, 0.0);
    let [x, y, z] = [0, 1, 2].map(|axis| euler[axis].as_ref().unwrap_or(&zero));

    let mut out = QuatCurves::default();
    let mut previous: Option<[f32; 4]> = None;
    for time in sample_times(&[x, y, z]) {
        let mut q = euler_to_quaternion(x.evaluate(time), y.evaluate(time), z.evaluate(time));
        if continuity {
            if let Some(prev) = previous {
                if dot4(prev, q) < 0.0 {
                    q = q.map(|c| -c);
                }
            }
            previous = Some(q);
        }
        out.push(time, q);
    }
    out
}
