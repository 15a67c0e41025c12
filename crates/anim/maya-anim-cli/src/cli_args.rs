//! Argument definitions; `main.rs` only dispatches.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Convert Maya ASCII .anim exports into quaternion animation clips
#[derive(Parser)]
#[command(name = "maya-anim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert every .anim file in a directory and write one JSON clip per file
    Convert {
        /// Directory holding the .anim files (not searched recursively)
        #[arg(long)]
        input_dir: PathBuf,

        /// Bone path mapping file (default: <input-dir>/BonePaths.txt)
        #[arg(long)]
        bone_paths: Option<PathBuf>,

        /// Destination directory (default: <input-dir>/Converted)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// JSON config file; command-line flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Stop the batch at the first bone missing from the mapping
        #[arg(long)]
        abort_on_missing_bone: bool,

        /// Keep consecutive quaternion samples on the same hemisphere
        #[arg(long)]
        quaternion_continuity: bool,
    },

    /// Convert a single file and print the resulting clip as JSON
    Inspect {
        /// The .anim file to convert
        file: PathBuf,

        /// Bone path mapping file
        #[arg(long)]
        bone_paths: PathBuf,
    },
}
