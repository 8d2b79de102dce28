//! # Vocabulary IO
//!
//! Loaders for fitted vocabulary artifacts.
//!
//! ## Loading A Vocab
//!
//! ```rust,no_run
//! use keyhint::vocab::io::{VocabFormat, load_vocab_path};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let artifact = load_vocab_path("tokenizer.json", VocabFormat::Auto)?;
//!     println!("{} words", artifact.index.len());
//!     Ok(())
//! }
//! ```

mod keras_json;
mod word_index_json;
mod word_list;

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

#[doc(inline)]
pub use keras_json::*;
#[doc(inline)]
pub use word_index_json::*;
#[doc(inline)]
pub use word_list::*;

use crate::{
    errors::{ArtifactLoadError, ArtifactParseError},
    types::{TokenId, token_id_from_usize},
    vocab::{VocabArtifact, VocabIndex},
};

/// Supported vocabulary artifact formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabFormat {
    /// Detect the format from the path and content.
    Auto,

    /// The `to_json()` output of a fitted Keras text `Tokenizer`.
    KerasJson,

    /// A ``{ word: id }`` JSON object, bare or in an envelope.
    WordIndexJson,

    /// One word per line; line `n` (1-based) is id `n`.
    WordList,
}

impl FromStr for VocabFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "keras" | "keras-json" => Ok(Self::KerasJson),
            "word-index" | "word-index-json" => Ok(Self::WordIndexJson),
            "word-list" | "txt" => Ok(Self::WordList),
            _ => Err(format!("unknown vocab format: {s:?}")),
        }
    }
}

/// Guess the format of a JSON document.
fn detect_json_format(value: &serde_json::Value) -> VocabFormat {
    match value.get("class_name") {
        Some(_) => VocabFormat::KerasJson,
        None => VocabFormat::WordIndexJson,
    }
}

/// Does the path name a plain-text word list?
fn is_word_list_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("txt" | "vocab")
    )
}

/// Load a [`VocabArtifact`] from a file.
///
/// ## Arguments
/// * `path` - the artifact path.
/// * `format` - the artifact format, or [`VocabFormat::Auto`].
pub fn load_vocab_path<P: AsRef<Path>>(
    path: P,
    format: VocabFormat,
) -> Result<VocabArtifact, ArtifactLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ArtifactParseError::from(e).at(path))?;
    let reader = BufReader::new(file);

    let format = match format {
        VocabFormat::Auto if is_word_list_path(path) => VocabFormat::WordList,
        other => other,
    };

    let artifact = match format {
        VocabFormat::WordList => read_word_list(reader),
        VocabFormat::KerasJson => read_json_value(reader).and_then(keras_vocab_from_value),
        VocabFormat::WordIndexJson => read_json_value(reader).and_then(word_index_from_value),
        VocabFormat::Auto => {
            read_json_value(reader).and_then(|value| match detect_json_format(&value) {
                VocabFormat::KerasJson => keras_vocab_from_value(value),
                _ => word_index_from_value(value),
            })
        }
    }
    .map_err(|e| e.at(path))?;

    log::info!(
        "loaded vocabulary {:?}: {} words, max id {:?}",
        path,
        artifact.index.len(),
        artifact.index.max_id()
    );

    Ok(artifact)
}

/// Parse a JSON document; syntax errors are [`ArtifactParseError::Corrupt`].
pub(crate) fn read_json_value<R: Read>(reader: R) -> Result<serde_json::Value, ArtifactParseError> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            ArtifactParseError::Io(e.into())
        } else {
            ArtifactParseError::Corrupt(e.to_string())
        }
    })
}

/// Build a [`VocabIndex`] from a parsed ``{ word: id }`` map.
pub(crate) fn index_from_word_map(
    word_index: BTreeMap<String, u64>,
) -> Result<VocabIndex, ArtifactParseError> {
    let mut pairs: Vec<(String, TokenId)> = Vec::with_capacity(word_index.len());
    for (word, id) in word_index {
        let id = usize::try_from(id)
            .ok()
            .and_then(token_id_from_usize)
            .ok_or_else(|| ArtifactParseError::Schema(format!("id {id} of {word:?} out of range")))?;
        pairs.push((word, id));
    }

    VocabIndex::try_from_word_index(pairs).map_err(|e| ArtifactParseError::Schema(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("auto".parse::<VocabFormat>(), Ok(VocabFormat::Auto));
        assert_eq!("keras".parse::<VocabFormat>(), Ok(VocabFormat::KerasJson));
        assert_eq!("word-index".parse::<VocabFormat>(), Ok(VocabFormat::WordIndexJson));
        assert_eq!("txt".parse::<VocabFormat>(), Ok(VocabFormat::WordList));
        assert!("pickle".parse::<VocabFormat>().is_err());
    }

    #[test]
    fn test_auto_detect() {
        tempdir::TempDir::new("vocab_detect")
            .and_then(|dir| {
                let keras = dir.path().join("tokenizer.json");
                File::create(&keras)?.write_all(
                    br#"{"class_name": "Tokenizer", "config": {"word_index": {"the": 1, "cat": 2}}}"#,
                )?;

                let plain = dir.path().join("words.json");
                File::create(&plain)?.write_all(br#"{"the": 1, "cat": 2}"#)?;

                let list = dir.path().join("words.txt");
                File::create(&list)?.write_all(b"the\ncat\n")?;

                for path in [&keras, &plain, &list] {
                    let artifact = load_vocab_path(path, VocabFormat::Auto).unwrap();
                    assert_eq!(artifact.index.lookup_id("the"), Some(1));
                    assert_eq!(artifact.index.lookup_token(2), "cat");
                }

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_load_errors() {
        tempdir::TempDir::new("vocab_errors")
            .and_then(|dir| {
                let missing = dir.path().join("missing.json");
                assert!(matches!(
                    load_vocab_path(&missing, VocabFormat::Auto),
                    Err(ArtifactLoadError::Io { .. })
                ));

                let corrupt = dir.path().join("corrupt.json");
                File::create(&corrupt)?.write_all(b"{\"the\": 1,")?;
                assert!(matches!(
                    load_vocab_path(&corrupt, VocabFormat::Auto),
                    Err(ArtifactLoadError::Corrupt { .. })
                ));

                let wrong = dir.path().join("wrong.json");
                File::create(&wrong)?.write_all(b"[1, 2, 3]")?;
                assert!(matches!(
                    load_vocab_path(&wrong, VocabFormat::Auto),
                    Err(ArtifactLoadError::Schema { .. })
                ));

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_index_from_word_map_range() {
        let mut map = BTreeMap::new();
        map.insert("big".to_string(), u64::MAX);
        assert!(matches!(
            index_from_word_map(map),
            Err(ArtifactParseError::Schema(_))
        ));
    }
}
