//! The conversion pipeline
//!
//! `extract_document` is the pure core: (clip data, skeleton root) in, track
//! document out, no I/O. `convert_clip` wraps it with artifact handling:
//! the SJSON intermediate and the compressor output both live in a scratch
//! directory, and the binary reaches its final destination only after the
//! whole run has succeeded, so a failed stage never leaves a truncated
//! artifact behind.

use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};

use crate::clip::AnimationClip;
use crate::compressor::Compressor;
use crate::error::{AclError, Result};
use crate::scene::TransformNode;
use crate::skeleton::walk_skeleton;
use crate::track::{ClipInfo, DEFAULT_ERROR_THRESHOLD, TrackDocument};
use crate::validation::validate_document;
use crate::writer::document_to_string;

/// Extension of the final binary artifact
pub const ARTIFACT_EXTENSION: &str = "bytes";

/// Build the intermediate track document for a clip
///
/// Pure function of its inputs: no file is read or written. Fails before any
/// sampling when the clip carries no usable animation data.
pub fn extract_document(clip: &AnimationClip, scene_root: &TransformNode) -> Result<TrackDocument> {
    if clip.bindings.is_empty() {
        return Err(AclError::NoAnimationData(clip.name.clone()));
    }
    // Bindings without a path component point at the object itself rather
    // than a bone hierarchy, which happens with retargeted humanoid rigs.
    if clip.bindings[0].path.is_empty() {
        return Err(AclError::UnsupportedRig(format!(
            "curve bindings in clip '{}' have no path component",
            clip.name
        )));
    }
    if clip.frame_rate <= 0.0 {
        return Err(AclError::Validation(format!(
            "clip '{}' has non-positive frame rate {}",
            clip.name, clip.frame_rate
        )));
    }

    let (bones, tracks) = walk_skeleton(scene_root, clip)?;
    let doc = TrackDocument {
        clip: ClipInfo {
            name: clip.name.clone(),
            num_samples: clip.num_samples(),
            sample_rate: clip.frame_rate,
            error_threshold: DEFAULT_ERROR_THRESHOLD,
        },
        bones,
        tracks,
    };
    validate_document(&doc)?;
    Ok(doc)
}

/// Settings for a full conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Path to the external compressor executable
    pub compressor: PathBuf,
    /// Optional limit on the compressor's run time
    pub timeout: Option<Duration>,
    /// Compression error tolerance written into the document
    pub error_threshold: f32,
    /// Also place the SJSON intermediate next to the artifact
    pub keep_intermediate: bool,
    /// Directory for the artifact; next to the source asset if unset
    pub out_dir: Option<PathBuf>,
}

impl ConvertOptions {
    /// Options for the compressor at `tool`, with defaults otherwise
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self {
            compressor: tool.into(),
            timeout: None,
            error_threshold: DEFAULT_ERROR_THRESHOLD,
            keep_intermediate: false,
            out_dir: None,
        }
    }
}

/// Run the full pipeline for one clip and place the binary artifact next to
/// the source asset, or under `options.out_dir` when set
///
/// The artifact is named `<asset-stem>@<clip-name>.bytes`. Returns its path.
pub fn convert_clip(
    clip: &AnimationClip,
    scene_root: &TransformNode,
    asset_path: &Path,
    options: &ConvertOptions,
) -> Result<PathBuf> {
    let mut doc = extract_document(clip, scene_root)?;
    doc.clip.error_threshold = options.error_threshold;

    let scratch = tempfile::tempdir()?;
    let sjson_path = scratch.path().join(format!("{}.acl.sjson", clip.name));
    let bin_path = scratch.path().join(format!("{}.acl", clip.name));

    let mut sjson = File::create(&sjson_path)?;
    sjson.write_all(document_to_string(&doc).as_bytes())?;
    sjson.sync_all()?;
    drop(sjson);
    debug!("wrote intermediate document {}", sjson_path.display());

    let mut compressor = Compressor::new(&options.compressor);
    if let Some(timeout) = options.timeout {
        compressor = compressor.with_timeout(timeout);
    }
    compressor.compress(&sjson_path, &bin_path)?;

    let mut final_path = artifact_path(asset_path, &clip.name)?;
    if let Some(out_dir) = &options.out_dir {
        fs::create_dir_all(out_dir)?;
        let file_name = final_path.file_name().ok_or_else(|| {
            AclError::Validation(format!(
                "artifact path {} has no file name",
                final_path.display()
            ))
        })?;
        final_path = out_dir.join(file_name);
    }
    finalize(&bin_path, &final_path)?;
    if options.keep_intermediate {
        let kept = final_path.with_extension("acl.sjson");
        fs::copy(&sjson_path, &kept)?;
        debug!("kept intermediate document {}", kept.display());
    }

    info!("generated {}", final_path.display());
    Ok(final_path)
}

/// Destination path for a clip's artifact: `<asset-stem>@<clip>.bytes`
/// alongside the asset
pub fn artifact_path(asset_path: &Path, clip_name: &str) -> Result<PathBuf> {
    let stem = asset_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            AclError::Validation(format!(
                "asset path {} has no usable file name",
                asset_path.display()
            ))
        })?;
    Ok(asset_path.with_file_name(format!("{stem}@{clip_name}.{ARTIFACT_EXTENSION}")))
}

/// Move a finished binary into place without ever exposing a partial file
///
/// Copies into a temporary sibling of the destination, then renames over it.
fn finalize(src: &Path, dest: &Path) -> Result<()> {
    let dir = dest.parent().ok_or_else(|| {
        AclError::Validation(format!("destination {} has no parent", dest.display()))
    })?;
    let staged = tempfile::Builder::new()
        .prefix(".acl-staging-")
        .tempfile_in(dir)?;
    fs::copy(src, staged.path())?;
    staged
        .persist(dest)
        .map_err(|e| AclError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{BindingKind, CurveBinding, TransformProperty};
    use crate::curve::{AnimationCurve, Keyframe};
    use crate::scene::TransformNode;
    use glam::Quat;

    fn rotation_bindings(path: &str, deviate_at: f32) -> Vec<CurveBinding> {
        // Identity everywhere except a y-rotation bump at `deviate_at`.
        let mut bindings = Vec::new();
        for (property, rest) in [
            (TransformProperty::RotationX, 0.0),
            (TransformProperty::RotationY, 0.0),
            (TransformProperty::RotationZ, 0.0),
            (TransformProperty::RotationW, 1.0),
        ] {
            let keys = if property == TransformProperty::RotationY {
                vec![
                    Keyframe::new(deviate_at - 0.05, rest),
                    Keyframe::new(deviate_at, 0.5),
                    Keyframe::new(deviate_at + 0.05, rest),
                ]
            } else {
                vec![Keyframe::new(0.0, rest)]
            };
            bindings.push(CurveBinding {
                path: path.to_string(),
                property,
                kind: BindingKind::Float,
                curve: AnimationCurve::new(keys),
            });
        }
        bindings
    }

    fn single_bone_scene() -> TransformNode {
        let mut scene = TransformNode::new("scene");
        scene.children.push(TransformNode::new("hips"));
        scene
    }

    #[test]
    fn no_bindings_fails_early() {
        let clip = AnimationClip {
            name: "idle".to_string(),
            length: 1.0,
            frame_rate: 30.0,
            bindings: Vec::new(),
        };
        let err = extract_document(&clip, &single_bone_scene()).unwrap_err();
        assert!(matches!(err, AclError::NoAnimationData(_)));
    }

    #[test]
    fn pathless_bindings_are_an_unsupported_rig() {
        let clip = AnimationClip {
            name: "idle".to_string(),
            length: 1.0,
            frame_rate: 30.0,
            bindings: rotation_bindings("", 0.1),
        };
        let err = extract_document(&clip, &single_bone_scene()).unwrap_err();
        assert!(matches!(err, AclError::UnsupportedRig(_)));
    }

    #[test]
    fn single_bone_rotation_scenario() {
        // Rotation deviates around sample 3 only; translation/scale unbound.
        let clip = AnimationClip {
            name: "nod".to_string(),
            length: 1.0,
            frame_rate: 30.0,
            bindings: rotation_bindings("hips", 3.0 / 30.0),
        };
        let doc = extract_document(&clip, &single_bone_scene()).unwrap();
        assert_eq!(doc.bones.len(), 1);
        assert_eq!(doc.tracks.len(), 1);
        let track = &doc.tracks[0];
        assert_eq!(track.rotations.len(), clip.num_samples());
        assert!(track.translations.is_empty());
        assert!(track.scales.is_empty());
        assert_ne!(track.rotations[3], Quat::IDENTITY);
    }

    #[test]
    fn extraction_is_deterministic() {
        let clip = AnimationClip {
            name: "nod".to_string(),
            length: 1.0,
            frame_rate: 30.0,
            bindings: rotation_bindings("hips", 0.1),
        };
        let scene = single_bone_scene();
        let a = extract_document(&clip, &scene).unwrap();
        let b = extract_document(&clip, &scene).unwrap();
        assert_eq!(
            crate::writer::document_to_string(&a),
            crate::writer::document_to_string(&b)
        );
    }

    #[test]
    fn artifact_path_follows_naming_convention() {
        let path = artifact_path(Path::new("/assets/rig.fbx"), "walk").unwrap();
        assert_eq!(path, Path::new("/assets/rig@walk.bytes"));
    }
}
