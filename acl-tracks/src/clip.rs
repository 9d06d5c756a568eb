//! Animation clip data model
//!
//! A clip is a named set of curve bindings, each addressing one scalar
//! transform property of one bone by hierarchical path. The clip also fixes
//! the sampling grid: `num_samples` evenly spaced times at `frame_rate`.

use std::fmt;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::curve::AnimationCurve;

/// One of the 10 scalar transform channels a curve can bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum TransformProperty {
    RotationX,
    RotationY,
    RotationZ,
    RotationW,
    TranslationX,
    TranslationY,
    TranslationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl fmt::Display for TransformProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RotationX => "rotation.x",
            Self::RotationY => "rotation.y",
            Self::RotationZ => "rotation.z",
            Self::RotationW => "rotation.w",
            Self::TranslationX => "translation.x",
            Self::TranslationY => "translation.y",
            Self::TranslationZ => "translation.z",
            Self::ScaleX => "scale.x",
            Self::ScaleY => "scale.y",
            Self::ScaleZ => "scale.z",
        };
        f.write_str(name)
    }
}

/// How a curve is bound to its property
///
/// Lookup tries the kinds in declaration order: a continuous float curve
/// first, then an object-reference curve, then a discrete curve. The first
/// kind with a matching binding wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum BindingKind {
    Float,
    ObjectReference,
    Discrete,
}

/// Fixed binding-kind lookup priority
pub const BINDING_PRIORITY: [BindingKind; 3] = [
    BindingKind::Float,
    BindingKind::ObjectReference,
    BindingKind::Discrete,
];

/// A curve bound to (path, property, kind)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct CurveBinding {
    /// Hierarchical bone path, ancestor names joined with `/`
    pub path: String,
    /// The scalar property this curve drives
    pub property: TransformProperty,
    /// Binding kind, decides lookup priority
    #[cfg_attr(feature = "serde-support", serde(default = "default_kind"))]
    pub kind: BindingKind,
    /// The keyframe curve itself
    pub curve: AnimationCurve,
}

#[cfg(feature = "serde-support")]
fn default_kind() -> BindingKind {
    BindingKind::Float
}

/// An animation clip with its curve bindings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct AnimationClip {
    /// Clip name, becomes part of the artifact name
    pub name: String,
    /// Clip length in seconds
    pub length: f32,
    /// Sampling rate in frames per second
    pub frame_rate: f32,
    /// All curve bindings of the clip
    pub bindings: Vec<CurveBinding>,
}

impl AnimationClip {
    /// Number of samples on the fixed grid: `ceil(length * frame_rate) + 1`
    ///
    /// A zero-length clip still yields one sample.
    pub fn num_samples(&self) -> usize {
        (self.length * self.frame_rate).ceil() as usize + 1
    }

    /// Time of sample `i` in seconds
    pub fn sample_time(&self, i: usize) -> f32 {
        i as f32 / self.frame_rate
    }

    /// Look up a curve for (path, property), trying binding kinds in
    /// priority order
    pub fn find_curve(&self, path: &str, property: TransformProperty) -> Option<&AnimationCurve> {
        BINDING_PRIORITY.iter().find_map(|&kind| {
            self.bindings
                .iter()
                .find(|b| b.kind == kind && b.property == property && b.path == path)
                .map(|b| &b.curve)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::AnimationCurve;
    use test_case::test_case;

    #[test_case(1.0, 30.0, 31; "one second at 30 fps")]
    #[test_case(0.0, 30.0, 1; "zero length clip")]
    #[test_case(0.5, 60.0, 31; "half second at 60 fps")]
    #[test_case(1.0, 1000.0, 1001; "very high frame rate")]
    #[test_case(0.034, 30.0, 3; "fractional frame count rounds up")]
    fn num_samples_formula(length: f32, frame_rate: f32, expected: usize) {
        let clip = AnimationClip {
            name: "test".to_string(),
            length,
            frame_rate,
            bindings: Vec::new(),
        };
        assert_eq!(clip.num_samples(), expected);
    }

    fn binding(path: &str, kind: BindingKind, value: f32) -> CurveBinding {
        CurveBinding {
            path: path.to_string(),
            property: TransformProperty::TranslationX,
            kind,
            curve: AnimationCurve::constant(value),
        }
    }

    #[test]
    fn find_curve_prefers_float_binding() {
        let clip = AnimationClip {
            name: "test".to_string(),
            length: 1.0,
            frame_rate: 30.0,
            bindings: vec![
                binding("root", BindingKind::Discrete, 3.0),
                binding("root", BindingKind::Float, 1.0),
                binding("root", BindingKind::ObjectReference, 2.0),
            ],
        };
        let curve = clip
            .find_curve("root", TransformProperty::TranslationX)
            .unwrap();
        assert_eq!(curve.evaluate(0.0), 1.0);
    }

    #[test]
    fn find_curve_falls_back_in_priority_order() {
        let clip = AnimationClip {
            name: "test".to_string(),
            length: 1.0,
            frame_rate: 30.0,
            bindings: vec![
                binding("root", BindingKind::Discrete, 3.0),
                binding("root", BindingKind::ObjectReference, 2.0),
            ],
        };
        let curve = clip
            .find_curve("root", TransformProperty::TranslationX)
            .unwrap();
        assert_eq!(curve.evaluate(0.0), 2.0);
    }

    #[test]
    fn find_curve_misses_on_wrong_path() {
        let clip = AnimationClip {
            name: "test".to_string(),
            length: 1.0,
            frame_rate: 30.0,
            bindings: vec![binding("root/arm", BindingKind::Float, 1.0)],
        };
        assert!(
            clip.find_curve("root", TransformProperty::TranslationX)
                .is_none()
        );
    }
}
