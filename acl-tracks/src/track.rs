//! Bones, tracks, and the sampled-track reducer
//!
//! The reducer turns per-curve scalar samples into typed channel samples and
//! applies default elision: a channel whose every sample equals its default
//! value is dropped entirely, so the downstream encoder reconstructs it from
//! the bind pose alone.

use glam::{Quat, Vec3};

use crate::sampler::ChannelSamples;

/// Default rotation a track deviates from
pub const DEFAULT_ROTATION: Quat = Quat::IDENTITY;
/// Default translation a track deviates from
pub const DEFAULT_TRANSLATION: Vec3 = Vec3::ZERO;
/// Default scale a track deviates from
pub const DEFAULT_SCALE: Vec3 = Vec3::ONE;

/// Compression error tolerance handed to the encoder
pub const DEFAULT_ERROR_THRESHOLD: f32 = 0.01;
/// Virtual vertex distance used by the encoder's error metric
pub const VERTEX_DISTANCE: f32 = 3.0;

/// A bone with its bind pose, in traversal order
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Bone name, unique within the skeleton
    pub name: String,
    /// Parent bone name; `None` only for the root bone
    pub parent: Option<String>,
    pub bind_rotation: Quat,
    pub bind_translation: Vec3,
    pub bind_scale: Vec3,
}

/// Sampled animation data for one bone
///
/// Each channel is either empty (absent) or exactly `num_samples` long.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    /// Name of the bone this track belongs to
    pub name: String,
    pub rotations: Vec<Quat>,
    pub translations: Vec<Vec3>,
    pub scales: Vec<Vec3>,
}

impl Track {
    /// Whether every channel of this track is absent
    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty() && self.translations.is_empty() && self.scales.is_empty()
    }
}

/// Clip-level metadata of a document
#[derive(Debug, Clone, PartialEq)]
pub struct ClipInfo {
    pub name: String,
    pub num_samples: usize,
    pub sample_rate: f32,
    pub error_threshold: f32,
}

/// The in-memory intermediate document: clip metadata plus parallel
/// bone/track lists in traversal order
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDocument {
    pub clip: ClipInfo,
    pub bones: Vec<Bone>,
    pub tracks: Vec<Track>,
}

/// Reduce sampled scalar channels into a typed track
///
/// A channel group materializes only when all of its constituent curves were
/// found; a group whose samples never leave the default value collapses back
/// to absent. Comparison against the default is exact, matching the source
/// data bit-for-bit, so a curve that is numerically default everywhere is
/// indistinguishable from no curve at all.
///
/// The sample count is taken from the scalar slices themselves; slices of
/// unequal length yield as many samples as the shortest one, which document
/// validation then reports against the clip's expected count.
pub fn reduce_track(name: &str, samples: &ChannelSamples) -> Track {
    let mut track = Track {
        name: name.to_string(),
        ..Track::default()
    };

    if let Some([x, y, z, w]) = samples.rotation() {
        let rotations: Vec<Quat> = x
            .iter()
            .zip(y.iter())
            .zip(z.iter())
            .zip(w.iter())
            .map(|(((&x, &y), &z), &w)| Quat::from_xyzw(x, y, z, w))
            .collect();
        if rotations.iter().any(|&q| q != DEFAULT_ROTATION) {
            track.rotations = rotations;
        }
    }

    if let Some([x, y, z]) = samples.translation() {
        let translations: Vec<Vec3> = zip_vec3(x, y, z);
        if translations.iter().any(|&v| v != DEFAULT_TRANSLATION) {
            track.translations = translations;
        }
    }

    if let Some([x, y, z]) = samples.scale() {
        let scales: Vec<Vec3> = zip_vec3(x, y, z);
        if scales.iter().any(|&v| v != DEFAULT_SCALE) {
            track.scales = scales;
        }
    }

    track
}

fn zip_vec3(x: &[f32], y: &[f32], z: &[f32]) -> Vec<Vec3> {
    x.iter()
        .zip(y.iter())
        .zip(z.iter())
        .map(|((&x, &y), &z)| Vec3::new(x, y, z))
        .collect()
}
