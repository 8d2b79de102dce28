//! # Word Map ``{ String <-> TokenId }`` Vocabulary Index

use std::collections::BTreeMap;

use crate::{
    errors::{KHResult, KeyhintError},
    types::{DEFAULT_UNK_TOKEN, KHHashMap, TokenId, hash_map_with_capacity},
};

/// Bidirectional, immutable ``{ word <-> id }`` mapping.
///
/// Built once from a fitted vocabulary artifact; read-only afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabIndex {
    /// Map of ``{ word -> id }``.
    word_to_id: KHHashMap<String, TokenId>,

    /// Map of ``{ id -> word }``, in id order.
    id_to_word: BTreeMap<TokenId, String>,

    /// Display string for ids with no word.
    unk_token: String,
}

impl VocabIndex {
    /// Build an index from ``(word, id)`` pairs.
    ///
    /// ## Arguments
    /// * `pairs` - the fitted word index.
    ///
    /// ## Returns
    /// A `Result` with the index, or [`KeyhintError::VocabConflict`] if
    /// a word is empty, or a word or id appears twice.
    pub fn try_from_word_index<I, S>(pairs: I) -> KHResult<Self>
    where
        I: IntoIterator<Item = (S, TokenId)>,
        S: Into<String>,
    {
        let pairs = pairs.into_iter();
        let mut word_to_id: KHHashMap<String, TokenId> =
            hash_map_with_capacity(pairs.size_hint().0);
        let mut id_to_word: BTreeMap<TokenId, String> = BTreeMap::new();

        for (word, id) in pairs {
            let word: String = word.into();
            if word.is_empty() {
                return Err(KeyhintError::VocabConflict(format!(
                    "empty word assigned to id {id}"
                )));
            }
            if let Some(prev) = id_to_word.get(&id) {
                return Err(KeyhintError::VocabConflict(format!(
                    "id {id} assigned to both {prev:?} and {word:?}"
                )));
            }
            if let Some(prev) = word_to_id.get(&word) {
                return Err(KeyhintError::VocabConflict(format!(
                    "word {word:?} assigned to both {prev} and {id}"
                )));
            }
            word_to_id.insert(word.clone(), id);
            id_to_word.insert(id, word);
        }

        word_to_id.shrink_to_fit();

        Ok(Self {
            word_to_id,
            id_to_word,
            unk_token: DEFAULT_UNK_TOKEN.to_string(),
        })
    }

    /// Replace the display string used for ids with no word.
    pub fn with_unk_token(
        mut self,
        unk_token: impl Into<String>,
    ) -> Self {
        self.unk_token = unk_token.into();
        self
    }

    /// The display string used for ids with no word.
    pub fn unk_token(&self) -> &str {
        &self.unk_token
    }

    /// The number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.word_to_id.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.word_to_id.is_empty()
    }

    /// The largest assigned id, if any.
    pub fn max_id(&self) -> Option<TokenId> {
        self.id_to_word.keys().next_back().copied()
    }

    /// Return the id assigned to `word`, if it was seen when fitting.
    pub fn lookup_id(
        &self,
        word: &str,
    ) -> Option<TokenId> {
        self.word_to_id.get(word).copied()
    }

    /// Return the word for `id`, if any.
    pub fn get_token(
        &self,
        id: TokenId,
    ) -> Option<&str> {
        self.id_to_word.get(&id).map(String::as_str)
    }

    /// Return the word for `id`, or [`Self::unk_token`] when there is none.
    pub fn lookup_token(
        &self,
        id: TokenId,
    ) -> &str {
        self.get_token(id).unwrap_or(&self.unk_token)
    }

    /// Iterate over ``(id, word)`` entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &str)> + '_ {
        self.id_to_word
            .iter()
            .map(|(&id, word)| (id, word.as_str()))
    }
}
