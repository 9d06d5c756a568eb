//! Keyframe curves and their evaluation
//!
//! Curves are cubic Hermite splines over keyframes carrying explicit in/out
//! tangents. Evaluation clamps outside the key range and degrades to a
//! stepped hold when a segment tangent is infinite.

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// A single keyframe with Hermite tangents
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Keyframe {
    /// Time of the key in seconds
    pub time: f32,
    /// Value at the key
    pub value: f32,
    /// Incoming tangent (slope) of the segment ending at this key
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub in_tangent: f32,
    /// Outgoing tangent (slope) of the segment starting at this key
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Create a keyframe with flat tangents
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }
}

/// A scalar animation curve over keyframes sorted by time
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct AnimationCurve {
    /// Keyframes in ascending time order
    pub keys: Vec<Keyframe>,
}

impl AnimationCurve {
    /// Create a curve from keyframes, sorting them by time
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Create a single-key constant curve
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// Evaluate the curve at `time`
    ///
    /// Times before the first key or after the last clamp to the boundary
    /// key's value. An empty curve evaluates to 0.
    pub fn evaluate(&self, time: f32) -> f32 {
        let keys = &self.keys;
        let Some(first) = keys.first() else {
            return 0.0;
        };
        let Some(last) = keys.last() else {
            return 0.0;
        };
        if keys.len() == 1 || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // Find the segment containing `time`. Key counts are small enough
        // that a linear scan beats a binary search in practice.
        let mut right = 1;
        while right < keys.len() - 1 && keys[right].time < time {
            right += 1;
        }
        let k0 = keys[right - 1];
        let k1 = keys[right];

        let dt = k1.time - k0.time;
        if dt <= f32::EPSILON {
            return k0.value;
        }
        // An infinite tangent marks a stepped segment: hold the left value.
        if !k0.out_tangent.is_finite() || !k1.in_tangent.is_finite() {
            return k0.value;
        }

        let t = (time - k0.time) / dt;
        hermite(t, k0.value, k0.out_tangent * dt, k1.value, k1.in_tangent * dt)
    }
}

/// Cubic Hermite basis over a normalized segment
fn hermite(t: f32, p0: f32, m0: f32, p1: f32, m1: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    h00 * p0 + h10 * m0 + h01 * p1 + h11 * m1
}
