//! ACL SJSON intermediate document writer
//!
//! Renders a [`TrackDocument`] into the plain-text SJSON form the external
//! compressor consumes: `version`, `clip`, `bones`, `tracks`, in that order.
//! Output is deterministic: the same document always renders to the same
//! bytes. Floats use Rust's shortest round-trip `Display` form.
//!
//! Bind-pose fields and track channels equal to their defaults are elided,
//! but a track block is emitted for every bone even when all of its channels
//! are empty; the compressor asserts on a missing track entry.

use std::fmt::Write as _;
use std::io::Write;

use glam::{Quat, Vec3};

use crate::error::Result;
use crate::track::{
    Bone, DEFAULT_ROTATION, DEFAULT_SCALE, DEFAULT_TRANSLATION, Track, TrackDocument,
    VERTEX_DISTANCE,
};

/// Document format version understood by the compressor
pub const FORMAT_VERSION: u32 = 1;

/// Render a document to a string
pub fn document_to_string(doc: &TrackDocument) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "version = {FORMAT_VERSION}");
    let _ = writeln!(out);

    let _ = writeln!(out, "clip =");
    let _ = writeln!(out, "{{");
    let _ = writeln!(out, "\tname = \"{}\"", doc.clip.name);
    let _ = writeln!(out, "\tnum_samples = {}", doc.clip.num_samples);
    let _ = writeln!(out, "\tsample_rate = {}", doc.clip.sample_rate);
    let _ = writeln!(out, "\terror_threshold = {}", doc.clip.error_threshold);
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);

    let _ = writeln!(out, "bones =");
    let _ = writeln!(out, "[");
    for bone in &doc.bones {
        write_bone(&mut out, bone);
    }
    let _ = writeln!(out, "]");
    let _ = writeln!(out);

    let _ = writeln!(out, "tracks =");
    let _ = writeln!(out, "[");
    for track in &doc.tracks {
        write_track(&mut out, track);
    }
    let _ = writeln!(out, "]");
    let _ = writeln!(out);

    out
}

/// Render a document to a writer
pub fn write_document<W: Write>(writer: &mut W, doc: &TrackDocument) -> Result<()> {
    writer.write_all(document_to_string(doc).as_bytes())?;
    Ok(())
}

fn write_bone(out: &mut String, bone: &Bone) {
    let _ = writeln!(out, "\t{{");
    let _ = writeln!(out, "\t\tname = \"{}\"", bone.name);
    let _ = writeln!(out, "\t\tparent = \"{}\"", bone.parent.as_deref().unwrap_or(""));
    // Debug form keeps the trailing .0 the compressor's parser expects.
    let _ = writeln!(out, "\t\tvertex_distance = {VERTEX_DISTANCE:?}");
    if bone.bind_rotation != DEFAULT_ROTATION {
        let _ = writeln!(out, "\t\tbind_rotation = {}", quat(bone.bind_rotation));
    }
    if bone.bind_translation != DEFAULT_TRANSLATION {
        let _ = writeln!(out, "\t\tbind_translation = {}", vec3(bone.bind_translation));
    }
    if bone.bind_scale != DEFAULT_SCALE {
        let _ = writeln!(out, "\t\tbind_scale = {}", vec3(bone.bind_scale));
    }
    let _ = writeln!(out, "\t}}");
}

fn write_track(out: &mut String, track: &Track) {
    let _ = writeln!(out, "\t{{");
    let _ = writeln!(out, "\t\tname = \"{}\"", track.name);
    if !track.rotations.is_empty() {
        let _ = writeln!(out, "\t\trotations =");
        let _ = writeln!(out, "\t\t[");
        for &q in &track.rotations {
            let _ = writeln!(out, "\t\t\t{}", quat(q));
        }
        let _ = writeln!(out, "\t\t]");
    }
    if !track.translations.is_empty() {
        let _ = writeln!(out, "\t\ttranslations =");
        let _ = writeln!(out, "\t\t[");
        for &v in &track.translations {
            let _ = writeln!(out, "\t\t\t{}", vec3(v));
        }
        let _ = writeln!(out, "\t\t]");
    }
    if !track.scales.is_empty() {
        let _ = writeln!(out, "\t\tscales =");
        let _ = writeln!(out, "\t\t[");
        for &v in &track.scales {
            let _ = writeln!(out, "\t\t\t{}", vec3(v));
        }
        let _ = writeln!(out, "\t\t]");
    }
    let _ = writeln!(out, "\t}}");
}

fn quat(q: Quat) -> String {
    format!("[ {}, {}, {}, {} ]", q.x, q.y, q.z, q.w)
}

fn vec3(v: Vec3) -> String {
    format!("[ {}, {}, {} ]", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{ClipInfo, DEFAULT_ERROR_THRESHOLD};
    use glam::{Quat, Vec3};
    use pretty_assertions::assert_eq;

    fn doc() -> TrackDocument {
        TrackDocument {
            clip: ClipInfo {
                name: "walk".to_string(),
                num_samples: 2,
                sample_rate: 30.0,
                error_threshold: DEFAULT_ERROR_THRESHOLD,
            },
            bones: vec![
                Bone {
                    name: "hips".to_string(),
                    parent: None,
                    bind_rotation: Quat::IDENTITY,
                    bind_translation: Vec3::ZERO,
                    bind_scale: Vec3::ONE,
                },
                Bone {
                    name: "spine".to_string(),
                    parent: Some("hips".to_string()),
                    bind_rotation: Quat::IDENTITY,
                    bind_translation: Vec3::new(0.0, 0.5, 0.0),
                    bind_scale: Vec3::ONE,
                },
            ],
            tracks: vec![
                Track {
                    name: "hips".to_string(),
                    rotations: vec![
                        Quat::IDENTITY,
                        Quat::from_xyzw(0.0, 0.5, 0.0, 0.5),
                    ],
                    translations: Vec::new(),
                    scales: Vec::new(),
                },
                Track {
                    name: "spine".to_string(),
                    ..Track::default()
                },
            ],
        }
    }

    #[test]
    fn renders_all_four_sections_in_order() {
        let text = document_to_string(&doc());
        let version = text.find("version = 1").unwrap();
        let clip = text.find("clip =").unwrap();
        let bones = text.find("bones =").unwrap();
        let tracks = text.find("tracks =").unwrap();
        assert!(version < clip && clip < bones && bones < tracks);
    }

    #[test]
    fn golden_document() {
        let expected = "\
version = 1

clip =
{
\tname = \"walk\"
\tnum_samples = 2
\tsample_rate = 30
\terror_threshold = 0.01
}

bones =
[
\t{
\t\tname = \"hips\"
\t\tparent = \"\"
\t\tvertex_distance = 3.0
\t}
\t{
\t\tname = \"spine\"
\t\tparent = \"hips\"
\t\tvertex_distance = 3.0
\t\tbind_translation = [ 0, 0.5, 0 ]
\t}
]

tracks =
[
\t{
\t\tname = \"hips\"
\t\trotations =
\t\t[
\t\t\t[ 0, 0, 0, 1 ]
\t\t\t[ 0, 0.5, 0, 0.5 ]
\t\t]
\t}
\t{
\t\tname = \"spine\"
\t}
]

";
        assert_eq!(document_to_string(&doc()), expected);
    }

    #[test]
    fn empty_track_block_is_still_emitted() {
        let text = document_to_string(&doc());
        // The spine track has no channels but its block must exist.
        let tracks_section = &text[text.find("tracks =").unwrap()..];
        assert!(tracks_section.contains("name = \"spine\""));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(document_to_string(&doc()), document_to_string(&doc()));
    }
}
