//! Importer configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// What to do with a track whose bone has no bone path mapping entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingBonePolicy {
    /// Drop that bone's track; the rest of the clip is still produced.
    #[default]
    SkipTrack,
    /// Stop the whole batch at the first missing bone.
    AbortBatch,
}

/// Batch settings. The source frame rate is fixed and lives in
/// [`FRAME_RATE`](crate::FRAME_RATE), not here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extension (without the dot) of input files picked up from a directory.
    pub input_extension: String,
    /// File name of the bone path mapping, looked up next to the inputs.
    pub bone_path_file: String,
    /// Directory name for converted clips, created next to the inputs.
    pub output_dir: String,
    pub missing_bone: MissingBonePolicy,
    /// Keep consecutive quaternion samples on the same hemisphere.
    pub quaternion_continuity: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_extension: "anim".to_string(),
            bone_path_file: "BonePaths.txt".to_string(),
            output_dir: "Converted".to_string(),
            missing_bone: MissingBonePolicy::SkipTrack,
            quaternion_continuity: false,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ImportError::resource(path, e))?;
        serde_json::from_str(&text).map_err(|e| ImportError::resource(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json_str(r#"{ "missing_bone": "abort_batch" }"#).unwrap();
        assert_eq!(cfg.missing_bone, MissingBonePolicy::AbortBatch);
        assert_eq!(cfg.input_extension, "anim");
        assert!(!cfg.quaternion_continuity);
    }

    #[test]
    fn invalid_json_is_a_resource_error() {
        let err = Config::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.category(), "resource");
    }
}
