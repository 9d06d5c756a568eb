//! Skeleton traversal
//!
//! Pre-order depth-first walk over the transform hierarchy, recording each
//! bone's bind pose and sampling its track by hierarchical path. Child order
//! follows the node's own child vector, so repeated runs over the same input
//! traverse identically.

use std::collections::HashSet;

use log::debug;

use crate::clip::AnimationClip;
use crate::error::{AclError, Result};
use crate::sampler::sample_bone;
use crate::scene::TransformNode;
use crate::track::{Bone, Track, reduce_track};

/// Walk the skeleton under `scene_root` and sample every bone's track
///
/// `scene_root` itself is not a bone; it must have exactly one child, the
/// skeleton root. Returns parallel bone/track lists in traversal order, so
/// every parent appears before its children.
pub fn walk_skeleton(
    scene_root: &TransformNode,
    clip: &AnimationClip,
) -> Result<(Vec<Bone>, Vec<Track>)> {
    if scene_root.children.len() != 1 {
        return Err(AclError::Structural(format!(
            "expected exactly one top-level child under '{}', found {}",
            scene_root.name,
            scene_root.children.len()
        )));
    }

    let mut bones = Vec::new();
    let mut tracks = Vec::new();
    let mut seen = HashSet::new();
    visit(
        &scene_root.children[0],
        None,
        "",
        clip,
        &mut bones,
        &mut tracks,
        &mut seen,
    )?;
    debug!(
        "walked {} bones for clip '{}' ({} samples)",
        bones.len(),
        clip.name,
        clip.num_samples()
    );
    Ok((bones, tracks))
}

fn visit(
    node: &TransformNode,
    parent: Option<&str>,
    parent_path: &str,
    clip: &AnimationClip,
    bones: &mut Vec<Bone>,
    tracks: &mut Vec<Track>,
    seen: &mut HashSet<String>,
) -> Result<()> {
    if !seen.insert(node.name.clone()) {
        return Err(AclError::Structural(format!(
            "duplicate bone name '{}'",
            node.name
        )));
    }

    bones.push(Bone {
        name: node.name.clone(),
        parent: parent.map(str::to_string),
        bind_rotation: node.local_rotation,
        bind_translation: node.local_position,
        bind_scale: node.local_scale,
    });

    let path = if parent_path.is_empty() {
        node.name.clone()
    } else {
        format!("{parent_path}/{}", node.name)
    };
    let samples = sample_bone(clip, &path);
    tracks.push(reduce_track(&node.name, &samples));

    for child in &node.children {
        visit(
            child,
            Some(&node.name),
            &path,
            clip,
            bones,
            tracks,
            seen,
        )?;
    }
    Ok(())
}
