//! Full conversion command implementation

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use acl_tracks::pipeline::{ConvertOptions, convert_clip};
use acl_tracks::track::DEFAULT_ERROR_THRESHOLD;

#[derive(Args)]
pub struct ConvertArgs {
    /// Path to the JSON asset dump
    pub dump: PathBuf,

    /// Path to the external compressor executable
    #[arg(short, long, env = "ACL_COMPRESSOR")]
    pub compressor: PathBuf,

    /// Clip to convert (defaults to the first clip in the dump)
    #[arg(long)]
    pub clip: Option<String>,

    /// Directory to place the artifact in (next to the dump if omitted)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Maximum seconds to wait for the compressor
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Compression error tolerance
    #[arg(long, default_value_t = DEFAULT_ERROR_THRESHOLD)]
    pub error_threshold: f32,

    /// Keep the SJSON intermediate next to the artifact
    #[arg(long)]
    pub keep_intermediate: bool,
}

pub fn execute(args: ConvertArgs) -> Result<()> {
    let dump = super::load_dump(&args.dump)?;
    let root = dump.require_root()?;
    let clip = dump.select_clip(args.clip.as_deref())?;

    let mut options = ConvertOptions::new(&args.compressor);
    options.timeout = args.timeout.map(Duration::from_secs);
    options.error_threshold = args.error_threshold;
    options.keep_intermediate = args.keep_intermediate;
    options.out_dir = args.out_dir;

    let artifact = convert_clip(clip, root, &args.dump, &options)
        .with_context(|| format!("conversion of clip '{}' failed", clip.name))?;
    println!("{}", artifact.display());
    Ok(())
}
