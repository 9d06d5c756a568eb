//! Root CLI structure for acl-convert

use clap::{Parser, Subcommand};

use crate::commands::{convert, emit, info, validate};

#[derive(Parser)]
#[command(name = "acl-convert")]
#[command(about = "Sample skeletal animation clips and encode them with the ACL compressor", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: sample, serialize, and compress a clip
    Convert(convert::ConvertArgs),

    /// Emit the SJSON intermediate document without compressing
    Emit(emit::EmitArgs),

    /// Display information about an asset dump and its clips
    Info(info::InfoArgs),

    /// Validate the track document extracted from an asset dump
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
