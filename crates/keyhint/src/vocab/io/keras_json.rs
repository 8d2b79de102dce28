//! # Keras Tokenizer JSON IO
//!
//! Reads the ``Tokenizer.to_json()`` document of a fitted Keras text tokenizer:
//!
//! ```json
//! {"class_name": "Tokenizer", "config": {
//!     "num_words": null, "filters": "...", "lower": true, "split": " ",
//!     "char_level": false, "oov_token": null,
//!     "word_index": "{\"the\": 1, \"cat\": 2}"
//! }}
//! ```
//!
//! Keras stores `word_index` as an embedded JSON string; an inline object
//! is accepted as well.

use std::{collections::BTreeMap, io::Read};

use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    encoding::{DEFAULT_FILTERS, DEFAULT_SPLIT, TextConventions},
    errors::ArtifactParseError,
    vocab::{
        VocabArtifact,
        io::{index_from_word_map, read_json_value},
    },
};

/// A value that is either inline JSON, or a string holding encoded JSON.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaybeEncoded<T> {
    Inline(T),
    Encoded(String),
}

impl<T: DeserializeOwned> MaybeEncoded<T> {
    fn decode(self) -> Result<T, ArtifactParseError> {
        match self {
            MaybeEncoded::Inline(value) => Ok(value),
            MaybeEncoded::Encoded(text) => serde_json::from_str(&text)
                .map_err(|e| ArtifactParseError::Schema(format!("embedded word_index: {e}"))),
        }
    }
}

fn default_lower() -> bool {
    true
}

fn default_filters() -> Option<String> {
    Some(DEFAULT_FILTERS.to_string())
}

fn default_split() -> String {
    DEFAULT_SPLIT.to_string()
}

#[derive(Debug, Deserialize)]
struct KerasTokenizerConfig {
    #[serde(default)]
    num_words: Option<usize>,

    #[serde(default = "default_filters")]
    filters: Option<String>,

    #[serde(default = "default_lower")]
    lower: bool,

    #[serde(default = "default_split")]
    split: String,

    #[serde(default)]
    char_level: bool,

    #[serde(default)]
    oov_token: Option<String>,

    word_index: MaybeEncoded<BTreeMap<String, u64>>,
}

#[derive(Debug, Deserialize)]
struct KerasTokenizerJson {
    class_name: String,

    config: KerasTokenizerConfig,

    /// Not written by Keras; an optional pairing signature.
    #[serde(default)]
    fingerprint: Option<String>,
}

/// Read a Keras tokenizer JSON document.
pub fn read_keras_vocab_json<R: Read>(reader: R) -> Result<VocabArtifact, ArtifactParseError> {
    read_json_value(reader).and_then(keras_vocab_from_value)
}

/// Build a [`VocabArtifact`] from a parsed Keras tokenizer JSON document.
pub fn keras_vocab_from_value(
    value: serde_json::Value,
) -> Result<VocabArtifact, ArtifactParseError> {
    let doc: KerasTokenizerJson =
        serde_json::from_value(value).map_err(|e| ArtifactParseError::Schema(e.to_string()))?;

    if doc.class_name != "Tokenizer" {
        return Err(ArtifactParseError::Schema(format!(
            "expected class_name \"Tokenizer\", found {:?}",
            doc.class_name
        )));
    }

    let config = doc.config;
    if config.char_level {
        return Err(ArtifactParseError::Schema(
            "character-level tokenizers are not supported".to_string(),
        ));
    }
    if let Some(oov) = &config.oov_token {
        // Unknown words are dropped on encode; the oov word stays an ordinary entry.
        log::debug!("ignoring oov_token {oov:?} for encoding");
    }

    let index = index_from_word_map(config.word_index.decode()?)?;

    let conventions = TextConventions::default()
        .with_lower(config.lower)
        .with_filters(config.filters.unwrap_or_default())
        .with_split(config.split)
        .with_num_words(config.num_words);

    Ok(VocabArtifact::new(index)
        .with_conventions(conventions)
        .with_fingerprint(doc.fingerprint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_word_index() {
        let text = r##"{
            "class_name": "Tokenizer",
            "config": {
                "num_words": null,
                "filters": "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n",
                "lower": true,
                "split": " ",
                "char_level": false,
                "oov_token": null,
                "document_count": 2,
                "word_counts": "{\"the\": 3, \"cat\": 1}",
                "word_index": "{\"the\": 1, \"cat\": 2, \"sat\": 3}",
                "index_word": "{\"1\": \"the\", \"2\": \"cat\", \"3\": \"sat\"}"
            }
        }"##;

        let artifact = read_keras_vocab_json(text.as_bytes()).unwrap();
        assert_eq!(artifact.index.len(), 3);
        assert_eq!(artifact.index.lookup_id("sat"), Some(3));
        assert_eq!(artifact.conventions, TextConventions::default());
        assert_eq!(artifact.fingerprint, None);
    }

    #[test]
    fn test_inline_word_index_matches_embedded() {
        let inline = r#"{"class_name": "Tokenizer",
            "config": {"word_index": {"the": 1, "cat": 2}}}"#;
        let embedded = r#"{"class_name": "Tokenizer",
            "config": {"word_index": "{\"the\": 1, \"cat\": 2}"}}"#;

        assert_eq!(
            read_keras_vocab_json(inline.as_bytes()).unwrap(),
            read_keras_vocab_json(embedded.as_bytes()).unwrap()
        );
    }

    #[test]
    fn test_conventions_carried() {
        let text = r#"{"class_name": "Tokenizer", "fingerprint": "abc",
            "config": {"num_words": 2, "lower": false, "split": "|", "filters": null,
                       "word_index": {"The": 1, "Cat": 2}}}"#;

        let artifact = read_keras_vocab_json(text.as_bytes()).unwrap();
        assert_eq!(
            artifact.conventions,
            TextConventions::default()
                .with_lower(false)
                .with_split("|")
                .with_filters("")
                .with_num_words(Some(2))
        );
        assert_eq!(artifact.fingerprint.as_deref(), Some("abc"));
    }

    #[test]
    fn test_rejects() {
        let char_level = r#"{"class_name": "Tokenizer",
            "config": {"char_level": true, "word_index": {"a": 1}}}"#;
        assert!(matches!(
            read_keras_vocab_json(char_level.as_bytes()),
            Err(ArtifactParseError::Schema(_))
        ));

        let wrong_class = r#"{"class_name": "TextVectorization",
            "config": {"word_index": {"a": 1}}}"#;
        assert!(matches!(
            read_keras_vocab_json(wrong_class.as_bytes()),
            Err(ArtifactParseError::Schema(_))
        ));

        let no_index = r#"{"class_name": "Tokenizer", "config": {}}"#;
        assert!(matches!(
            read_keras_vocab_json(no_index.as_bytes()),
            Err(ArtifactParseError::Schema(_))
        ));

        let bad_embedded = r#"{"class_name": "Tokenizer",
            "config": {"word_index": "{\"the\": "}}"#;
        assert!(matches!(
            read_keras_vocab_json(bad_embedded.as_bytes()),
            Err(ArtifactParseError::Schema(_))
        ));
    }
}
