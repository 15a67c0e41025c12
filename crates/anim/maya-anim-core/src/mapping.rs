//! Bone name to scene path table (`boneName=relative/path` per line).

use std::fs;
use std::path::Path;

use hashbrown::HashMap;

use crate::error::ImportError;

/// Read-only mapping loaded once per batch and shared by every document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BonePathMapping {
    paths: HashMap<String, String>,
}

impl BonePathMapping {
    pub fn new(paths: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    /// Parse the mapping resource. Blank lines are skipped; everything after
    /// the first `=` is the path, verbatim.
    pub fn parse(text: &str) -> Result<Self, ImportError> {
        let mut paths = HashMap::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let (bone, path) = line.split_once('=').ok_or_else(|| ImportError::MappingSyntax {
                line: i + 1,
                content: line.to_string(),
                reason: "expected 'boneName=relativePath'".to_string(),
            })?;
            if bone.is_empty() {
                return Err(ImportError::MappingSyntax {
                    line: i + 1,
                    content: line.to_string(),
                    reason: "empty bone name".to_string(),
                });
            }
            if paths.insert(bone.to_string(), path.to_string()).is_some() {
                return Err(ImportError::MappingSyntax {
                    line: i + 1,
                    content: line.to_string(),
                    reason: format!("duplicate entry for bone '{bone}'"),
                });
            }
        }
        Ok(Self { paths })
    }

    /// Load and parse the mapping file; a missing file is a resource error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ImportError::resource(path, e))?;
        let mapping = Self::parse(&text)?;
        log::info!("loaded {} bone path(s) from {}", mapping.len(), path.display());
        Ok(mapping)
    }

    /// Scene path for `bone`, or [`ImportError::Mapping`] naming it.
    pub fn resolve(&self, bone: &str) -> Result<&str, ImportError> {
        self.paths
            .get(bone)
            .map(String::as_str)
            .ok_or_else(|| ImportError::Mapping {
                bone: bone.to_string(),
            })
    }

    pub fn get(&self, bone: &str) -> Option<&str> {
        self.paths.get(bone).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
