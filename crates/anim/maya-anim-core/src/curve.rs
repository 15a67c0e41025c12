//! Scalar keyframe curves: the atomic animation primitive.

use serde::{Deserialize, Serialize};

use crate::interp::{hermite_spline, smooth_tangent};

/// A single `(time, value)` sample. Time is in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    #[inline]
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Ordered keyframes for one animated scalar property.
///
/// Between keys the curve is a cubic Hermite spline with smooth tangents;
/// before the first and after the last key it holds the endpoint value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelCurve {
    keys: Vec<Keyframe>,
}

impl ChannelCurve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Curve holding a single key, used for axes missing from a rotation.
    pub fn constant(time: f32, value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(time, value)],
        }
    }

    pub fn from_keys(keys: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut curve = Self::new();
        for key in keys {
            curve.add_keyframe(key.time, key.value);
        }
        curve
    }

    /// Add a keyframe. Keys arrive in time order from the parser; an
    /// out-of-order key is inserted after any keys with an equal or earlier time.
    pub fn add_keyframe(&mut self, time: f32, value: f32) {
        let key = Keyframe::new(time, value);
        match self.keys.last() {
            Some(last) if last.time > time => {
                let pos = self.keys.partition_point(|k| k.time <= time);
                self.keys.insert(pos, key);
            }
            _ => self.keys.push(key),
        }
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<&Keyframe> {
        self.keys.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Keyframe> {
        self.keys.last()
    }

    /// `(first.time, last.time)`, or `None` for an empty curve.
    pub fn time_range(&self) -> Option<(f32, f32)> {
        Some((self.keys.first()?.time, self.keys.last()?.time))
    }

    /// Value of the curve at `time`.
    ///
    /// Returns the exact key value when `time` lands on a key, holds the
    /// endpoint values outside the key range and evaluates 0.0 for an empty
    /// curve.
    pub fn evaluate(&self, time: f32) -> f32 {
        let n = self.keys.len();
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if n == 1 || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // First key strictly after `time`; 1..n-1 given the checks above.
        let i1 = self.keys.partition_point(|k| k.time <= time);
        let i0 = i1 - 1;
        let k0 = self.keys[i0];
        let k1 = self.keys[i1];
        if k0.time == time {
            return k0.value;
        }
        let dt = k1.time - k0.time;
        if dt <= 0.0 {
            return k1.value;
        }

        let m0 = self.tangent_at(i0) * dt;
        let m1 = self.tangent_at(i1) * dt;
        let u = ((time - k0.time) / dt).clamp(0.0, 1.0);
        hermite_spline(k0.value, k1.value, m0, m1, u)
    }

    fn tangent_at(&self, index: usize) -> f32 {
        let prev = index
            .checked_sub(1)
            .and_then(|i| self.keys.get(i))
            .map(|k| (k.time, k.value));
        let key = self.keys[index];
        let next = self.keys.get(index + 1).map(|k| (k.time, k.value));
        smooth_tangent(prev, (key.time, key.value), next)
    }

    /// Turn a single-key curve into a hold by adding a second key with the
    /// same value at `end_time`.
    ///
    /// No-op for curves with zero or several keys. The new key goes in time
    /// order, so an `end_time` before the key yields a hold starting at `end_time`.
    pub fn finalize_duration(&mut self, end_time: f32) {
        if self.keys.len() != 1 {
            return;
        }
        let only = self.keys[0];
        if end_time < only.time {
            log::debug!(
                "hold end {end_time}s precedes the only key at {}s; inserting it first",
                only.time
            );
        }
        self.add_keyframe(end_time, only.value);
    }
}
