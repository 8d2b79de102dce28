//! # Error Types

use std::{path::PathBuf, time::Duration};

/// Errors raised while reading the model or vocabulary artifacts.
///
/// These are fatal to the prediction subsystem, but not to the process;
/// see [`Recommender`](crate::Recommender) for the degraded mode.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactLoadError {
    /// The artifact could not be read.
    #[error("failed to read artifact {path:?}: {source}")]
    Io {
        /// The artifact path.
        path: PathBuf,

        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact could not be parsed.
    #[error("corrupt artifact {path:?}: {reason}")]
    Corrupt {
        /// The artifact path.
        path: PathBuf,

        /// What failed to parse.
        reason: String,
    },

    /// The artifact parsed, but does not have the expected shape.
    #[error("schema-incompatible artifact {path:?}: {reason}")]
    Schema {
        /// The artifact path.
        path: PathBuf,

        /// What was wrong with it.
        reason: String,
    },

    /// The model and vocabulary artifacts were not fitted together.
    #[error("incompatible artifacts: {0}")]
    Incompatible(String),
}

impl ArtifactLoadError {
    /// Build an [`ArtifactLoadError::Corrupt`].
    pub fn corrupt(
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build an [`ArtifactLoadError::Schema`].
    pub fn schema(
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Self::Schema {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while parsing an artifact stream.
///
/// Path-based loaders attach the path with [`ArtifactParseError::at`].
#[derive(Debug, thiserror::Error)]
pub enum ArtifactParseError {
    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The stream is not well-formed.
    #[error("corrupt: {0}")]
    Corrupt(String),

    /// The stream is well-formed, but has the wrong shape.
    #[error("schema mismatch: {0}")]
    Schema(String),
}

impl ArtifactParseError {
    /// Attach the artifact path.
    pub fn at(
        self,
        path: impl Into<PathBuf>,
    ) -> ArtifactLoadError {
        let path = path.into();
        match self {
            Self::Io(source) => ArtifactLoadError::Io { path, source },
            Self::Corrupt(reason) => ArtifactLoadError::Corrupt { path, reason },
            Self::Schema(reason) => ArtifactLoadError::Schema { path, reason },
        }
    }
}

/// Errors raised around a model scoring call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelInferenceError {
    /// The encoded input does not match the model's input length.
    #[error("model expects input length {expected}, got {actual}")]
    InputShape {
        /// The model's input length.
        expected: usize,

        /// The offered input length.
        actual: usize,
    },

    /// The model returned a distribution of the wrong width.
    #[error("model declared output width {expected}, returned {actual}")]
    OutputShape {
        /// The model's declared output width.
        expected: usize,

        /// The returned distribution width.
        actual: usize,
    },

    /// The scoring call did not finish in time.
    #[error("model scoring timed out after {0:?}")]
    Timeout(Duration),

    /// The scoring backend failed.
    #[error("model backend failure: {0}")]
    Backend(String),
}

/// Errors from keyhint operations.
#[derive(Debug, thiserror::Error)]
pub enum KeyhintError {
    /// Artifact loading failed.
    #[error(transparent)]
    ArtifactLoad(#[from] ArtifactLoadError),

    /// Model scoring failed.
    #[error(transparent)]
    ModelInference(#[from] ModelInferenceError),

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// The options are inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for keyhint operations.
pub type KHResult<T> = Result<T, KeyhintError>;
