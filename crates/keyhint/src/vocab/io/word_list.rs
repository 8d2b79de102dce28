//! # Word List IO
//!
//! One word per line; line `n` (1-based) is id `n`, leaving id `0` for padding.

use std::io::BufRead;

use crate::{
    errors::ArtifactParseError,
    types::TokenId,
    vocab::{VocabArtifact, VocabIndex},
};

/// Read a word list.
pub fn read_word_list<R: BufRead>(reader: R) -> Result<VocabArtifact, ArtifactParseError> {
    let mut pairs: Vec<(String, TokenId)> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => {
                ArtifactParseError::Corrupt(format!("line {}: not UTF-8", idx + 1))
            }
            _ => ArtifactParseError::Io(e),
        })?;

        let word = line.trim();
        if word.is_empty() {
            return Err(ArtifactParseError::Schema(format!(
                "line {}: blank word",
                idx + 1
            )));
        }

        let id = TokenId::try_from(idx + 1)
            .map_err(|_| ArtifactParseError::Schema("too many words".to_string()))?;
        pairs.push((word.to_string(), id));
    }

    let index =
        VocabIndex::try_from_word_index(pairs).map_err(|e| ArtifactParseError::Schema(e.to_string()))?;

    Ok(VocabArtifact::new(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read() {
        let artifact = read_word_list("the\ncat\r\nsat\n".as_bytes()).unwrap();
        assert_eq!(artifact.index.len(), 3);
        assert_eq!(artifact.index.lookup_id("the"), Some(1));
        assert_eq!(artifact.index.lookup_id("sat"), Some(3));
        assert_eq!(artifact.index.get_token(0), None);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            read_word_list("the\n\ncat\n".as_bytes()),
            Err(ArtifactParseError::Schema(_))
        ));
        assert!(matches!(
            read_word_list("the\nthe\n".as_bytes()),
            Err(ArtifactParseError::Schema(_))
        ));
        assert!(matches!(
            read_word_list(&b"the\n\xff\xfe\n"[..]),
            Err(ArtifactParseError::Corrupt(_))
        ));
    }
}
