//! Error types for the importer

/// Every failure the importer reports, grouped by [`ImportError::category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ImportError {
    /// Malformed header, keyframe field or metadata block.
    #[error("{file}:{line}: {reason}")]
    Format {
        file: String,
        line: usize,
        reason: String,
    },

    /// Channel header names an attribute outside the channel table.
    #[error("{file}:{line}: unrecognized channel '{channel}'")]
    UnknownChannel {
        file: String,
        line: usize,
        channel: String,
    },

    /// Channel header is not followed by a complete metadata block.
    #[error("{file}:{line}: channel header for bone '{bone}' is followed by only {found} line(s), expected {expected}")]
    TruncatedMetadata {
        file: String,
        line: usize,
        bone: String,
        found: usize,
        expected: usize,
    },

    /// Bone name absent from the bone path mapping.
    #[error("bone path mapping has no entry for bone '{bone}'")]
    Mapping { bone: String },

    /// Malformed line in the bone path mapping resource.
    #[error("bone path mapping line {line}: {reason} ('{content}')")]
    MappingSyntax {
        line: usize,
        content: String,
        reason: String,
    },

    /// Missing or unreadable resource (mapping file, input file, directory).
    #[error("{path}: {reason}")]
    Resource { path: String, reason: String },

    /// Clip store failed to persist a finished clip.
    #[error("failed to save clip '{clip}': {reason}")]
    Persist { clip: String, reason: String },
}

impl ImportError {
    pub(crate) fn format(file: &str, line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            file: file.to_string(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn resource(path: impl AsRef<std::path::Path>, reason: impl ToString) -> Self {
        Self::Resource {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get error category for logging/reporting
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Format { .. } | Self::UnknownChannel { .. } | Self::TruncatedMetadata { .. } => {
                "format"
            }
            Self::Mapping { .. } => "mapping",
            Self::MappingSyntax { .. } | Self::Resource { .. } => "resource",
            Self::Persist { .. } => "persist",
        }
    }

    /// Whether this error stops the whole batch rather than a single file.
    ///
    /// `Mapping` only reaches the batch driver under
    /// [`MissingBonePolicy::AbortBatch`](crate::MissingBonePolicy::AbortBatch).
    #[inline]
    pub fn is_batch_fatal(&self) -> bool {
        matches!(
            self,
            Self::Mapping { .. } | Self::MappingSyntax { .. } | Self::Resource { .. }
        )
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Resource {
            path: "<json>".to_string(),
            reason: err.to_string(),
        }
    }
}
