//! Interpolation helpers used by [`ChannelCurve`](crate::ChannelCurve).
//!
//! Curves reconstruct between keys with cubic Hermite segments whose
//! tangents are derived from neighbouring keys (smooth "auto" tangents).

pub mod functions;

pub use functions::{hermite_spline, smooth_tangent};
