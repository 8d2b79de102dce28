//! # Text Conventions
//!
//! The text preprocessing a vocabulary was fitted with.
//!
//! Encoding must use exactly the conventions of the vocabulary artifact;
//! a mismatch silently degrades predictions rather than failing.

use serde::{Deserialize, Serialize};

/// The default character filter set of a Keras text `Tokenizer`.
pub const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// The default split string.
pub const DEFAULT_SPLIT: &str = " ";

/// Tokenization conventions shared by fitting and encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConventions {
    /// Fold text to lowercase before splitting.
    pub lower: bool,

    /// Characters replaced by the split string before splitting.
    pub filters: String,

    /// The word separator.
    pub split: String,

    /// When set, only ids `< num_words` are kept when encoding.
    pub num_words: Option<usize>,
}

impl Default for TextConventions {
    fn default() -> Self {
        Self {
            lower: true,
            filters: DEFAULT_FILTERS.to_string(),
            split: DEFAULT_SPLIT.to_string(),
            num_words: None,
        }
    }
}

impl TextConventions {
    /// Set the lowercase flag.
    pub fn with_lower(
        mut self,
        lower: bool,
    ) -> Self {
        self.lower = lower;
        self
    }

    /// Set the filter character set.
    pub fn with_filters(
        mut self,
        filters: impl Into<String>,
    ) -> Self {
        self.filters = filters.into();
        self
    }

    /// Set the split string.
    pub fn with_split(
        mut self,
        split: impl Into<String>,
    ) -> Self {
        self.split = split.into();
        self
    }

    /// Set the id limit.
    pub fn with_num_words(
        mut self,
        num_words: Option<usize>,
    ) -> Self {
        self.num_words = num_words;
        self
    }

    /// Does `id` pass the `num_words` limit?
    pub fn admits(
        &self,
        id: usize,
    ) -> bool {
        self.num_words.is_none_or(|limit| id < limit)
    }

    /// Split `text` into words.
    ///
    /// Lowercases (when enabled), replaces each filter character with the
    /// split string, splits, and drops empty pieces.
    pub fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        let text = if self.lower {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut normalized = String::with_capacity(text.len());
        for c in text.chars() {
            if self.filters.contains(c) {
                normalized.push_str(&self.split);
            } else {
                normalized.push(c);
            }
        }

        // An empty separator would split between every char.
        if self.split.is_empty() {
            return normalized
                .split_whitespace()
                .map(str::to_string)
                .collect();
        }

        normalized
            .split(self.split.as_str())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }
}
