//! Engine-neutral clip model and the persistence seam.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::curve::ChannelCurve;
use crate::error::ImportError;

/// One curve bound to a transform property of the node at `path`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveBinding {
    /// Scene path relative to the animated root (e.g. "TopN/TransN/HipN").
    pub path: String,
    /// Transform property, e.g. "localRotation.w".
    pub property: String,
    pub curve: ChannelCurve,
}

/// Finished clip handed to a [`ClipStore`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    /// Clip length in seconds.
    pub length: f32,
    pub frame_rate: f32,
    pub bindings: Vec<CurveBinding>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, length: f32, frame_rate: f32) -> Self {
        Self {
            name: name.into(),
            length,
            frame_rate,
            bindings: Vec::new(),
        }
    }

    /// Bind `curve` to `property` on `path`, replacing an earlier binding of
    /// the same pair.
    pub fn set_curve(&mut self, path: &str, property: &str, curve: ChannelCurve) {
        if let Some(existing) = self
            .bindings
            .iter_mut()
            .find(|b| b.path == path && b.property == property)
        {
            existing.curve = curve;
            return;
        }
        self.bindings.push(CurveBinding {
            path: path.to_string(),
            property: property.to_string(),
            curve,
        });
    }

    pub fn curve(&self, path: &str, property: &str) -> Option<&ChannelCurve> {
        self.bindings
            .iter()
            .find(|b| b.path == path && b.property == property)
            .map(|b| &b.curve)
    }

    /// Distinct bound paths, in binding order.
    pub fn paths(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for b in &self.bindings {
            if !out.contains(&b.path.as_str()) {
                out.push(&b.path);
            }
        }
        out
    }
}

/// Persists finished clips. `destination` is a bare clip name; stores decide
/// where and in which format it lands.
pub trait ClipStore {
    fn save(&mut self, clip: &AnimationClip, destination: &str) -> Result<(), ImportError>;
}

/// Writes each clip as pretty JSON to `<root>/<destination>.json`.
#[derive(Clone, Debug)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, destination: &str) -> PathBuf {
        self.root.join(format!("{destination}.json"))
    }
}

impl ClipStore for JsonDirStore {
    fn save(&mut self, clip: &AnimationClip, destination: &str) -> Result<(), ImportError> {
        let persist = |reason: String| ImportError::Persist {
            clip: clip.name.clone(),
            reason,
        };
        fs::create_dir_all(&self.root)
            .map_err(|e| persist(format!("{}: {e}", self.root.display())))?;
        let path = self.path_for(destination);
        let file = fs::File::create(&path).map_err(|e| persist(format!("{}: {e}", path.display())))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, clip)
            .map_err(|e| persist(format!("{}: {e}", path.display())))?;
        writer
            .flush()
            .map_err(|e| persist(format!("{}: {e}", path.display())))?;
        log::info!("saved animation '{}' at '{}'", clip.name, path.display());
        Ok(())
    }
}

/// Keeps saved clips in memory, keyed by destination.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipStore {
    pub clips: Vec<(String, AnimationClip)>,
}

impl MemoryClipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, destination: &str) -> Option<&AnimationClip> {
        self.clips
            .iter()
            .find(|(d, _)| d == destination)
            .map(|(_, c)| c)
    }
}

impl ClipStore for MemoryClipStore {
    fn save(&mut self, clip: &AnimationClip, destination: &str) -> Result<(), ImportError> {
        self.clips.retain(|(d, _)| d != destination);
        self.clips.push((destination.to_string(), clip.clone()));
        Ok(())
    }
}
