//! Command implementations for acl-convert

pub mod convert;
pub mod emit;
pub mod info;
pub mod validate;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use acl_tracks::AssetDump;
use anyhow::{Context, Result};

/// Load an asset dump from a JSON export
pub fn load_dump(path: &Path) -> Result<AssetDump> {
    let file = File::open(path)
        .with_context(|| format!("failed to open asset dump {}", path.display()))?;
    let dump: AssetDump = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse asset dump {}", path.display()))?;
    Ok(dump)
}
