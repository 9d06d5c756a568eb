//! Validation functions for track documents

use std::collections::HashSet;

use crate::error::{AclError, Result};
use crate::track::TrackDocument;

/// Validates a track document for various constraints and correctness
pub fn validate_document(doc: &TrackDocument) -> Result<()> {
    validate_clip(doc)?;
    validate_bones(doc)?;
    validate_tracks(doc)?;
    Ok(())
}

/// Validates clip-level metadata
fn validate_clip(doc: &TrackDocument) -> Result<()> {
    if doc.clip.num_samples == 0 {
        return Err(AclError::Validation(
            "clip must have at least one sample".to_string(),
        ));
    }
    if doc.clip.sample_rate <= 0.0 {
        return Err(AclError::Validation(format!(
            "clip sample rate must be positive, got {}",
            doc.clip.sample_rate
        )));
    }
    Ok(())
}

/// Validates bone naming and ordering invariants
fn validate_bones(doc: &TrackDocument) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, bone) in doc.bones.iter().enumerate() {
        if !seen.insert(&bone.name) {
            return Err(AclError::Validation(format!(
                "duplicate bone name '{}'",
                bone.name
            )));
        }
        match &bone.parent {
            None => {
                if index != 0 {
                    return Err(AclError::Validation(format!(
                        "bone '{}' has no parent but is not the root",
                        bone.name
                    )));
                }
            }
            Some(parent) => {
                // Parent must appear earlier in traversal order.
                if !seen.contains(parent.as_str()) {
                    return Err(AclError::Validation(format!(
                        "bone '{}' references parent '{}' which does not precede it",
                        bone.name, parent
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Validates track/bone correspondence and sample counts
fn validate_tracks(doc: &TrackDocument) -> Result<()> {
    if doc.tracks.len() != doc.bones.len() {
        return Err(AclError::Validation(format!(
            "track count ({}) doesn't match bone count ({})",
            doc.tracks.len(),
            doc.bones.len()
        )));
    }
    for (bone, track) in doc.bones.iter().zip(doc.tracks.iter()) {
        if bone.name != track.name {
            return Err(AclError::Validation(format!(
                "track '{}' out of order with bone '{}'",
                track.name, bone.name
            )));
        }
        for (channel, len) in [
            ("rotations", track.rotations.len()),
            ("translations", track.translations.len()),
            ("scales", track.scales.len()),
        ] {
            if len != 0 && len != doc.clip.num_samples {
                return Err(AclError::Validation(format!(
                    "track '{}' {channel} has {len} samples, expected {} or none",
                    track.name, doc.clip.num_samples
                )));
            }
        }
    }
    Ok(())
}
