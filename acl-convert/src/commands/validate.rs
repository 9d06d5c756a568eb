//! Track document validation command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use acl_tracks::pipeline::extract_document;
use acl_tracks::validation::validate_document;

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the JSON asset dump
    pub dump: PathBuf,

    /// Clip to validate (defaults to the first clip in the dump)
    #[arg(long)]
    pub clip: Option<String>,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let dump = super::load_dump(&args.dump)?;
    let root = dump.require_root()?;
    let clip = dump.select_clip(args.clip.as_deref())?;

    let doc = extract_document(clip, root)
        .with_context(|| format!("extraction of clip '{}' failed", clip.name))?;
    validate_document(&doc)
        .with_context(|| format!("track document for clip '{}' is invalid", clip.name))?;

    println!(
        "Clip '{}' is valid: {} bones, {} samples",
        clip.name,
        doc.bones.len(),
        doc.clip.num_samples
    );
    Ok(())
}
