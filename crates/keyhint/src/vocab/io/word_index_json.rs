//! # Word Index JSON IO
//!
//! Either a bare ``{"word": id}`` object, or an envelope:
//!
//! ```json
//! {"word_index": {"the": 1}, "conventions": {"lower": true}, "fingerprint": "..."}
//! ```

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    encoding::TextConventions,
    errors::{ArtifactLoadError, ArtifactParseError},
    vocab::{
        VocabArtifact,
        io::{index_from_word_map, read_json_value},
    },
};

#[derive(Debug, Serialize, Deserialize)]
struct WordIndexEnvelope {
    word_index: BTreeMap<String, u64>,

    #[serde(default)]
    conventions: TextConventions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordIndexDoc {
    Envelope(WordIndexEnvelope),
    Bare(BTreeMap<String, u64>),
}

/// Read a word-index JSON document.
pub fn read_word_index_json<R: Read>(reader: R) -> Result<VocabArtifact, ArtifactParseError> {
    read_json_value(reader).and_then(word_index_from_value)
}

/// Build a [`VocabArtifact`] from a parsed word-index JSON document.
pub fn word_index_from_value(
    value: serde_json::Value,
) -> Result<VocabArtifact, ArtifactParseError> {
    let doc: WordIndexDoc = serde_json::from_value(value).map_err(|_| {
        ArtifactParseError::Schema(
            "expected a { word: id } object or a { \"word_index\": ... } envelope".to_string(),
        )
    })?;

    let envelope = match doc {
        WordIndexDoc::Envelope(envelope) => envelope,
        WordIndexDoc::Bare(word_index) => WordIndexEnvelope {
            word_index,
            conventions: TextConventions::default(),
            fingerprint: None,
        },
    };

    Ok(VocabArtifact::new(index_from_word_map(envelope.word_index)?)
        .with_conventions(envelope.conventions)
        .with_fingerprint(envelope.fingerprint))
}

/// Write a [`VocabArtifact`] as a word-index JSON envelope.
pub fn write_word_index_json<W: Write>(
    artifact: &VocabArtifact,
    writer: &mut W,
) -> Result<(), ArtifactParseError> {
    let envelope = WordIndexEnvelope {
        word_index: artifact
            .index
            .iter()
            .map(|(id, word)| (word.to_string(), id as u64))
            .collect(),
        conventions: artifact.conventions.clone(),
        fingerprint: artifact.fingerprint.clone(),
    };

    serde_json::to_writer_pretty(&mut *writer, &envelope)
        .map_err(|e| ArtifactParseError::Io(e.into()))?;
    writeln!(writer)?;
    Ok(())
}

/// Save a [`VocabArtifact`] as a word-index JSON envelope.
pub fn save_word_index_json_path<P: AsRef<Path>>(
    artifact: &VocabArtifact,
    path: P,
) -> Result<(), ArtifactLoadError> {
    let path = path.as_ref();
    File::create(path)
        .map_err(ArtifactParseError::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write_word_index_json(artifact, &mut writer)?;
            writer.flush()?;
            Ok(())
        })
        .map_err(|e| e.at(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::io::{VocabFormat, load_vocab_path};

    #[test]
    fn test_bare_map() {
        let artifact = read_word_index_json(r#"{"the": 1, "cat": 2}"#.as_bytes()).unwrap();
        assert_eq!(artifact.index.lookup_id("cat"), Some(2));
        assert_eq!(artifact.conventions, TextConventions::default());
    }

    #[test]
    fn test_envelope() {
        let text = r#"{"word_index": {"The": 1}, "conventions": {"lower": false},
                       "fingerprint": "f00d"}"#;
        let artifact = read_word_index_json(text.as_bytes()).unwrap();
        assert_eq!(artifact.index.lookup_id("The"), Some(1));
        assert!(!artifact.conventions.lower);
        assert_eq!(artifact.fingerprint.as_deref(), Some("f00d"));
    }

    #[test]
    fn test_shape_errors() {
        for text in [r#"{"the": "one"}"#, r#"["the"]"#, r#"{"the": -1}"#] {
            assert!(
                matches!(
                    read_word_index_json(text.as_bytes()),
                    Err(ArtifactParseError::Schema(_))
                ),
                "{text}"
            );
        }
    }

    #[test]
    fn test_save_load() {
        let artifact = read_word_index_json(
            r#"{"word_index": {"the": 1, "cat": 2, "sat": 3}, "fingerprint": "v1"}"#.as_bytes(),
        )
        .unwrap();

        tempdir::TempDir::new("word_index_test")
            .and_then(|dir| {
                let path = dir.path().join("vocab.json");

                save_word_index_json_path(&artifact, &path).expect("Failed to save vocab");

                let loaded =
                    load_vocab_path(&path, VocabFormat::Auto).expect("Failed to load vocab");

                assert_eq!(&loaded, &artifact);

                Ok(())
            })
            .unwrap();
    }
}
