//! # Encoded Sequence

use crate::types::TokenId;

/// A fixed-length, left-padded id sequence ready for model input.
///
/// Real content is right-aligned; the leading `len() - content_len()`
/// slots hold the pad value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSequence {
    ids: Vec<TokenId>,
    content_len: usize,
}

impl EncodedSequence {
    /// Left-pad or truncate `content` to exactly `max_len` ids.
    ///
    /// Truncation drops the oldest ids, keeping the last `max_len`.
    pub fn pad_pre(
        content: &[TokenId],
        max_len: usize,
        pad_id: TokenId,
    ) -> Self {
        let keep = content.len().min(max_len);
        let tail = &content[content.len() - keep..];

        let mut ids = Vec::with_capacity(max_len);
        ids.resize(max_len - keep, pad_id);
        ids.extend_from_slice(tail);

        Self {
            ids,
            content_len: keep,
        }
    }

    /// The fixed sequence length.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Is this a zero-length sequence?
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The number of trailing non-pad slots.
    pub fn content_len(&self) -> usize {
        self.content_len
    }

    /// The full padded id slice.
    pub fn as_slice(&self) -> &[TokenId] {
        &self.ids
    }

    /// The non-pad suffix.
    pub fn content(&self) -> &[TokenId] {
        &self.ids[self.ids.len() - self.content_len..]
    }

    /// The most recent id, if there is any content.
    pub fn last(&self) -> Option<TokenId> {
        self.content().last().copied()
    }

    /// Consume into the padded id vector.
    pub fn into_vec(self) -> Vec<TokenId> {
        self.ids
    }
}

impl AsRef<[TokenId]> for EncodedSequence {
    fn as_ref(&self) -> &[TokenId] {
        self.as_slice()
    }
}
