//! Maya Anim Core (engine-agnostic)
//!
//! Converts Maya ASCII `.anim` exports into quaternion-rotation animation
//! clips. The pipeline is: [`parser`] (text to per-bone Euler/position/scale
//! curves) -> [`convert`] (Euler triples resampled into quaternion curves)
//! -> [`assemble`] (hold padding, bone path resolution, clip bindings) ->
//! a [`ClipStore`]. [`batch`] drives the pipeline over a directory of files.

pub mod assemble;
pub mod batch;
pub mod channel;
pub mod clip;
pub mod config;
pub mod convert;
pub mod curve;
pub mod data;
pub mod error;
pub mod interp;
pub mod mapping;
pub mod parser;

// Re-exports for consumers (front-ends, engine adapters)
pub use assemble::{prepare_track, Assembler};
pub use batch::{discover_inputs, read_inputs, run_batch, BatchInput, BatchReport};
pub use channel::{ChannelTable, QuatChannel, RawChannel};
pub use clip::{AnimationClip, ClipStore, CurveBinding, JsonDirStore, MemoryClipStore};
pub use config::{Config, MissingBonePolicy};
pub use convert::{euler_to_quaternion, euler_curves_to_quaternion};
pub use curve::{ChannelCurve, Keyframe};
pub use data::{AnimationDocument, BoneTrack, QuatCurves, Rotation};
pub use error::ImportError;
pub use mapping::BonePathMapping;
pub use parser::{frame_to_time, AnimParser, FRAME_RATE, KEY_LINE_OFFSET};

/// Result type used across the importer.
pub type Result<T> = core::result::Result<T, ImportError>;
