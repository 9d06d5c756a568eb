//! Scene-graph input types
//!
//! A minimal transform hierarchy carrying the bind pose the tracks deviate
//! from. An [`AssetDump`] bundles one hierarchy with the clips authored
//! against it and is what the CLI deserializes from JSON.

use glam::{Quat, Vec3};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::clip::AnimationClip;
use crate::error::{AclError, Result};

/// A node in the transform hierarchy
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct TransformNode {
    /// Node name, must be unique within the hierarchy
    pub name: String,
    /// Local rotation at bind pose
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub local_rotation: Quat,
    /// Local translation at bind pose
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub local_position: Vec3,
    /// Local scale at bind pose
    #[cfg_attr(feature = "serde-support", serde(default = "unit_scale"))]
    pub local_scale: Vec3,
    /// Children in native order; traversal order follows this vector
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub children: Vec<TransformNode>,
}

#[cfg(feature = "serde-support")]
fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl TransformNode {
    /// Create a node at the default bind pose
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_rotation: Quat::IDENTITY,
            local_position: Vec3::ZERO,
            local_scale: Vec3::ONE,
            children: Vec::new(),
        }
    }
}

/// An exported asset: one scene hierarchy plus the clips sampled against it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct AssetDump {
    /// Asset name, becomes the artifact base name
    pub name: String,
    /// Root of the transform hierarchy, if the exporter found one
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub root: Option<TransformNode>,
    /// Clips authored against this hierarchy
    pub clips: Vec<AnimationClip>,
}

impl AssetDump {
    /// The scene root, or `MissingHostObject` if the dump has none
    pub fn require_root(&self) -> Result<&TransformNode> {
        self.root.as_ref().ok_or_else(|| AclError::MissingHostObject {
            asset: self.name.clone(),
        })
    }

    /// Select a clip by name, or the first clip when `name` is `None`
    pub fn select_clip(&self, name: Option<&str>) -> Result<&AnimationClip> {
        match name {
            Some(name) => self
                .clips
                .iter()
                .find(|c| c.name == name)
                .ok_or_else(|| AclError::ClipNotFound {
                    name: name.to_string(),
                }),
            None => self.clips.first().ok_or(AclError::ClipNotFound {
                name: String::from("<first>"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AclError;

    fn dump(root: Option<TransformNode>) -> AssetDump {
        AssetDump {
            name: "rig".to_string(),
            root,
            clips: vec![
                AnimationClip {
                    name: "walk".to_string(),
                    length: 1.0,
                    frame_rate: 30.0,
                    bindings: Vec::new(),
                },
                AnimationClip {
                    name: "run".to_string(),
                    length: 0.5,
                    frame_rate: 30.0,
                    bindings: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn missing_root_is_reported() {
        let err = dump(None).require_root().unwrap_err();
        assert!(matches!(err, AclError::MissingHostObject { .. }));
    }

    #[test]
    fn select_clip_by_name_and_default() {
        let dump = dump(Some(TransformNode::new("root")));
        assert_eq!(dump.select_clip(None).unwrap().name, "walk");
        assert_eq!(dump.select_clip(Some("run")).unwrap().name, "run");
        assert!(matches!(
            dump.select_clip(Some("idle")),
            Err(AclError::ClipNotFound { .. })
        ));
    }
}
