use std::io;
use thiserror::Error;

/// Error types for track extraction and encoding
#[derive(Error, Debug)]
pub enum AclError {
    /// I/O Error during reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The asset dump has no scene object to sample against
    #[error("Cannot find corresponding scene object for {asset}")]
    MissingHostObject { asset: String },

    /// The clip carries no curve bindings at all
    #[error("No animation data found in clip '{0}'")]
    NoAnimationData(String),

    /// Curve bindings exist but are not path-addressed (humanoid-style rig)
    #[error("Unsupported rig: {0}")]
    UnsupportedRig(String),

    /// The skeleton shape violates a traversal invariant
    #[error("Structural error: {0}")]
    Structural(String),

    /// A produced document fails an internal consistency check
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested clip does not exist in the asset dump
    #[error("Clip '{name}' not found in asset dump")]
    ClipNotFound { name: String },

    /// The external compressor failed or could not be started
    #[error("Encode error: {0}")]
    Encode(String),

    /// The external compressor did not finish within the configured timeout
    #[error("Compressor timed out after {seconds} seconds")]
    Timeout { seconds: u64 },
}

/// Result type using AclError
pub type Result<T> = std::result::Result<T, AclError>;
