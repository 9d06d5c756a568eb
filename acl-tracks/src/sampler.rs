//! Fixed-rate curve sampling
//!
//! Looks up the scalar curves bound to a bone path and evaluates each on the
//! clip's sampling grid. Pure reads against the clip; grouping and elision
//! happen in the reducer.

use log::trace;

use crate::clip::{AnimationClip, TransformProperty};
use crate::curve::AnimationCurve;

/// Per-curve scalar samples for one bone, prior to reduction
///
/// Array order matches the component order of each group: rotation x/y/z/w,
/// translation x/y/z, scale x/y/z. `None` means no curve was bound to that
/// property under any binding kind.
#[derive(Debug, Clone, Default)]
pub struct ChannelSamples {
    pub rotation: [Option<Vec<f32>>; 4],
    pub translation: [Option<Vec<f32>>; 3],
    pub scale: [Option<Vec<f32>>; 3],
}

impl ChannelSamples {
    /// The rotation scalars, present only when all 4 curves were found
    pub fn rotation(&self) -> Option<[&[f32]; 4]> {
        match &self.rotation {
            [Some(x), Some(y), Some(z), Some(w)] => Some([x, y, z, w]),
            _ => None,
        }
    }

    /// The translation scalars, present only when all 3 curves were found
    pub fn translation(&self) -> Option<[&[f32]; 3]> {
        match &self.translation {
            [Some(x), Some(y), Some(z)] => Some([x, y, z]),
            _ => None,
        }
    }

    /// The scale scalars, present only when all 3 curves were found
    pub fn scale(&self) -> Option<[&[f32]; 3]> {
        match &self.scale {
            [Some(x), Some(y), Some(z)] => Some([x, y, z]),
            _ => None,
        }
    }
}

/// Evaluate a curve at every sample time of the clip's grid
pub fn sample_curve(curve: &AnimationCurve, clip: &AnimationClip) -> Vec<f32> {
    (0..clip.num_samples())
        .map(|i| curve.evaluate(clip.sample_time(i)))
        .collect()
}

/// Sample all 10 transform channels of one bone path
pub fn sample_bone(clip: &AnimationClip, path: &str) -> ChannelSamples {
    let sample = |property: TransformProperty| -> Option<Vec<f32>> {
        let curve = clip.find_curve(path, property);
        if curve.is_none() {
            trace!("no curve for '{path}' {property}");
        }
        curve.map(|c| sample_curve(c, clip))
    };

    ChannelSamples {
        rotation: [
            sample(TransformProperty::RotationX),
            sample(TransformProperty::RotationY),
            sample(TransformProperty::RotationZ),
            sample(TransformProperty::RotationW),
        ],
        translation: [
            sample(TransformProperty::TranslationX),
            sample(TransformProperty::TranslationY),
            sample(TransformProperty::TranslationZ),
        ],
        scale: [
            sample(TransformProperty::ScaleX),
            sample(TransformProperty::ScaleY),
            sample(TransformProperty::ScaleZ),
        ],
    }
}
