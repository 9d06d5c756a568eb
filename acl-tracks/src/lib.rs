//! # acl-tracks
//!
//! Samples per-bone transform curves from an animation clip at a fixed rate,
//! reduces never-animated channels away, and serializes the result into the
//! deterministic SJSON intermediate consumed by the external ACL compressor.
//!
//! The core is a pure pipeline: [`pipeline::extract_document`] turns
//! (clip data, skeleton root) into a [`track::TrackDocument`] without any
//! I/O. [`pipeline::convert_clip`] adds the outer plumbing: scratch files,
//! compressor invocation, and atomic placement of the final artifact.

// Re-export main components
pub mod clip;
pub mod compressor;
pub mod curve;
pub mod error;
pub mod pipeline;
pub mod sampler;
pub mod scene;
pub mod skeleton;
pub mod track;
pub mod validation;
pub mod writer;

// Re-export common types
pub use clip::{AnimationClip, BindingKind, CurveBinding, TransformProperty};
pub use compressor::Compressor;
pub use curve::{AnimationCurve, Keyframe};
pub use error::{AclError, Result};
pub use pipeline::{ConvertOptions, convert_clip, extract_document};
pub use scene::{AssetDump, TransformNode};
pub use track::{Bone, Track, TrackDocument};
pub use writer::{document_to_string, write_document};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
