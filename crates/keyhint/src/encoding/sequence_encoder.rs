//! # Sequence Encoder

use std::sync::Arc;

use crate::{
    encoding::{EncodedSequence, TextConventions},
    types::{DEFAULT_PAD_ID, TokenId},
    vocab::VocabIndex,
};

/// Encodes free-form text into fixed-length model input.
///
/// Encoding never fails: words missing from the vocabulary are dropped
/// without reserving a slot.
#[derive(Debug, Clone)]
pub struct SequenceEncoder {
    index: Arc<VocabIndex>,
    conventions: TextConventions,
    max_len: usize,
    pad_id: TokenId,
}

impl SequenceEncoder {
    /// Build a new encoder.
    ///
    /// ## Arguments
    /// * `index` - the fitted vocabulary.
    /// * `conventions` - the conventions the vocabulary was fitted with.
    /// * `max_len` - the model input length.
    /// * `pad_id` - the pad value.
    pub fn new(
        index: Arc<VocabIndex>,
        conventions: TextConventions,
        max_len: usize,
        pad_id: TokenId,
    ) -> Self {
        Self {
            index,
            conventions,
            max_len,
            pad_id,
        }
    }

    /// Build an encoder with default conventions and pad value.
    pub fn with_defaults(
        index: Arc<VocabIndex>,
        max_len: usize,
    ) -> Self {
        Self::new(index, TextConventions::default(), max_len, DEFAULT_PAD_ID)
    }

    /// The vocabulary index.
    pub fn index(&self) -> &Arc<VocabIndex> {
        &self.index
    }

    /// The text conventions.
    pub fn conventions(&self) -> &TextConventions {
        &self.conventions
    }

    /// The fixed output length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The pad value.
    pub fn pad_id(&self) -> TokenId {
        self.pad_id
    }

    /// Map `text` to vocabulary ids, in order, skipping unknown words.
    pub fn token_ids(
        &self,
        text: &str,
    ) -> Vec<TokenId> {
        self.conventions
            .tokenize(text)
            .iter()
            .filter_map(|word| self.index.lookup_id(word))
            .filter(|&id| self.conventions.admits(id as usize))
            .collect()
    }

    /// Encode `text` into exactly [`Self::max_len`] ids.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn encode(
        &self,
        text: &str,
    ) -> EncodedSequence {
        let ids = self.token_ids(text);
        log::trace!("encoded {} known words", ids.len());
        EncodedSequence::pad_pre(&ids, self.max_len, self.pad_id)
    }
}
