//! SJSON emission command implementation

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use acl_tracks::pipeline::extract_document;
use acl_tracks::track::DEFAULT_ERROR_THRESHOLD;
use acl_tracks::writer::{document_to_string, write_document};

#[derive(Args)]
pub struct EmitArgs {
    /// Path to the JSON asset dump
    pub dump: PathBuf,

    /// Clip to emit (defaults to the first clip in the dump)
    #[arg(long)]
    pub clip: Option<String>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compression error tolerance
    #[arg(long, default_value_t = DEFAULT_ERROR_THRESHOLD)]
    pub error_threshold: f32,
}

pub fn execute(args: EmitArgs) -> Result<()> {
    let dump = super::load_dump(&args.dump)?;
    let root = dump.require_root()?;
    let clip = dump.select_clip(args.clip.as_deref())?;

    let mut doc = extract_document(clip, root)
        .with_context(|| format!("extraction of clip '{}' failed", clip.name))?;
    doc.clip.error_threshold = args.error_threshold;

    match args.output {
        Some(path) => {
            let mut file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_document(&mut file, &doc)?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", document_to_string(&doc)),
    }
    Ok(())
}
