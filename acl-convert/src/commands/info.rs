//! Asset dump information command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use acl_tracks::pipeline::extract_document;

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the JSON asset dump
    pub dump: PathBuf,

    /// Show per-bone track details
    #[arg(short, long)]
    pub detailed: bool,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let dump = super::load_dump(&args.dump)?;

    println!("Asset: {}", dump.name);
    println!(
        "Scene root: {}",
        dump.root
            .as_ref()
            .map_or("<missing>", |root| root.name.as_str())
    );
    println!("Clips: {}", dump.clips.len());

    for clip in &dump.clips {
        println!();
        println!("Clip: {}", clip.name);
        println!("  Length: {} s", clip.length);
        println!("  Frame rate: {} fps", clip.frame_rate);
        println!("  Samples: {}", clip.num_samples());
        println!("  Curve bindings: {}", clip.bindings.len());

        let Ok(root) = dump.require_root() else {
            continue;
        };
        let Ok(doc) = extract_document(clip, root) else {
            println!("  (no extractable track data)");
            continue;
        };
        let animated = doc.tracks.iter().filter(|t| !t.is_empty()).count();
        println!("  Bones: {} ({} animated)", doc.bones.len(), animated);

        if args.detailed {
            for track in &doc.tracks {
                let mut channels = Vec::new();
                if !track.rotations.is_empty() {
                    channels.push("rotation");
                }
                if !track.translations.is_empty() {
                    channels.push("translation");
                }
                if !track.scales.is_empty() {
                    channels.push("scale");
                }
                let summary = if channels.is_empty() {
                    "static".to_string()
                } else {
                    channels.join(", ")
                };
                println!("    {}: {summary}", track.name);
            }
        }
    }
    Ok(())
}
