//! # Vocabulary Artifact

use crate::{encoding::TextConventions, vocab::VocabIndex};

/// A fitted vocabulary, as loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabArtifact {
    /// The ``{ word <-> id }`` index.
    pub index: VocabIndex,

    /// The conventions the index was fitted with.
    pub conventions: TextConventions,

    /// Optional pairing signature shared with the model artifact.
    pub fingerprint: Option<String>,
}

impl From<VocabIndex> for VocabArtifact {
    fn from(index: VocabIndex) -> Self {
        Self::new(index)
    }
}

impl VocabArtifact {
    /// Wrap an index with default conventions and no fingerprint.
    pub fn new(index: VocabIndex) -> Self {
        Self {
            index,
            conventions: TextConventions::default(),
            fingerprint: None,
        }
    }

    /// Set the conventions.
    pub fn with_conventions(
        mut self,
        conventions: TextConventions,
    ) -> Self {
        self.conventions = conventions;
        self
    }

    /// Set the fingerprint.
    pub fn with_fingerprint(
        mut self,
        fingerprint: Option<String>,
    ) -> Self {
        self.fingerprint = fingerprint;
        self
    }
}
