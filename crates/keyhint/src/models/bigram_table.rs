//! # Bigram Table Model
//!
//! A pre-trained bigram table, scored from the most recent word:
//!
//! ```json
//! {
//!   "format": "bigram-table",
//!   "input_length": 107,
//!   "vocab_size": 4,
//!   "fingerprint": "optional pairing signature",
//!   "backoff": 0.4,
//!   "unigram": [0.0, 0.5, 0.3, 0.2],
//!   "transitions": {"1": {"2": 0.7, "3": 0.3}}
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    encoding::EncodedSequence,
    errors::{ArtifactParseError, ModelInferenceError},
    models::{Distribution, NextWordModel, check_input},
    types::{KHHashMap, TokenId, hash_map_with_capacity},
};

/// The `format` tag of bigram table artifacts.
pub const BIGRAM_TABLE_FORMAT: &str = "bigram-table";

/// The default backoff weight applied to unigram scores.
pub const DEFAULT_BACKOFF: f32 = 0.4;

fn default_backoff() -> f32 {
    DEFAULT_BACKOFF
}

/// The serialized form of a [`BigramTableModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigramTableSpec {
    /// Must be [`BIGRAM_TABLE_FORMAT`].
    pub format: String,

    /// The model input length.
    pub input_length: usize,

    /// The distribution width.
    pub vocab_size: usize,

    /// Optional pairing signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Weight applied to unigram scores inside a known context.
    #[serde(default = "default_backoff")]
    pub backoff: f32,

    /// Context-free scores, one per id.
    pub unigram: Vec<f32>,

    /// ``{ prev_id: { next_id: score } }``.
    #[serde(default)]
    pub transitions: BTreeMap<String, BTreeMap<String, f32>>,
}

/// A bigram language model over vocabulary ids.
///
/// The context is the last non-pad id of the input. When the table has a
/// row for it, row entries score directly and every other id scores
/// `backoff * unigram`. Without a row (or without context), the unigram
/// scores are returned.
#[derive(Debug, Clone, PartialEq)]
pub struct BigramTableModel {
    input_len: usize,
    fingerprint: Option<String>,
    backoff: f32,
    unigram: Vec<f32>,
    rows: KHHashMap<TokenId, Vec<(TokenId, f32)>>,
}

fn parse_id(
    key: &str,
    vocab_size: usize,
) -> Result<TokenId, ArtifactParseError> {
    key.parse::<TokenId>()
        .ok()
        .filter(|&id| (id as usize) < vocab_size)
        .ok_or_else(|| ArtifactParseError::Schema(format!("bad transition id {key:?}")))
}

impl BigramTableModel {
    /// Build a model with unigram scores only.
    pub fn new(
        input_len: usize,
        unigram: Vec<f32>,
    ) -> Self {
        Self {
            input_len,
            fingerprint: None,
            backoff: DEFAULT_BACKOFF,
            unigram,
            rows: Default::default(),
        }
    }

    /// Set the backoff weight.
    pub fn with_backoff(
        mut self,
        backoff: f32,
    ) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set the pairing signature.
    pub fn with_fingerprint(
        mut self,
        fingerprint: Option<String>,
    ) -> Self {
        self.fingerprint = fingerprint;
        self
    }

    /// Add (or replace) the transition score `prev -> next`.
    ///
    /// ## Panics
    /// If `next` is out of range of the unigram table.
    pub fn with_transition(
        mut self,
        prev: TokenId,
        next: TokenId,
        score: f32,
    ) -> Self {
        assert!((next as usize) < self.unigram.len(), "next id out of range");
        let row = self.rows.entry(prev).or_default();
        match row.iter_mut().find(|(id, _)| *id == next) {
            Some(entry) => entry.1 = score,
            None => row.push((next, score)),
        }
        self
    }

    /// Build a model from its serialized form.
    pub fn try_from_spec(spec: BigramTableSpec) -> Result<Self, ArtifactParseError> {
        if spec.format != BIGRAM_TABLE_FORMAT {
            return Err(ArtifactParseError::Schema(format!(
                "expected format {BIGRAM_TABLE_FORMAT:?}, found {:?}",
                spec.format
            )));
        }
        if spec.unigram.len() != spec.vocab_size {
            return Err(ArtifactParseError::Schema(format!(
                "unigram table has {} entries, vocab_size is {}",
                spec.unigram.len(),
                spec.vocab_size
            )));
        }
        if !(spec.backoff.is_finite() && spec.backoff >= 0.0) {
            return Err(ArtifactParseError::Schema(format!(
                "backoff must be a non-negative number, found {}",
                spec.backoff
            )));
        }

        let mut rows: KHHashMap<TokenId, Vec<(TokenId, f32)>> =
            hash_map_with_capacity(spec.transitions.len());
        for (prev, row) in &spec.transitions {
            let prev = parse_id(prev, spec.vocab_size)?;
            let row = row
                .iter()
                .map(|(next, &score)| Ok((parse_id(next, spec.vocab_size)?, score)))
                .collect::<Result<Vec<_>, ArtifactParseError>>()?;
            rows.insert(prev, row);
        }

        Ok(Self {
            input_len: spec.input_length,
            fingerprint: spec.fingerprint,
            backoff: spec.backoff,
            unigram: spec.unigram,
            rows,
        })
    }

    /// Convert to the serialized form.
    pub fn to_spec(&self) -> BigramTableSpec {
        BigramTableSpec {
            format: BIGRAM_TABLE_FORMAT.to_string(),
            input_length: self.input_len,
            vocab_size: self.unigram.len(),
            fingerprint: self.fingerprint.clone(),
            backoff: self.backoff,
            unigram: self.unigram.clone(),
            transitions: self
                .rows
                .iter()
                .map(|(prev, row)| {
                    (
                        prev.to_string(),
                        row.iter()
                            .map(|(next, score)| (next.to_string(), *score))
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}

impl NextWordModel for BigramTableModel {
    fn input_len(&self) -> usize {
        self.input_len
    }

    fn output_width(&self) -> usize {
        self.unigram.len()
    }

    fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, input)))]
    fn score(
        &self,
        input: &EncodedSequence,
    ) -> Result<Distribution, ModelInferenceError> {
        check_input(self, input)?;

        let row = input.last().and_then(|prev| self.rows.get(&prev));
        let Some(row) = row else {
            return Ok(self.unigram.clone().into());
        };

        let mut scores: Vec<f32> = self.unigram.iter().map(|&u| u * self.backoff).collect();
        for &(next, score) in row {
            scores[next as usize] = score;
        }
        Ok(scores.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> BigramTableModel {
        BigramTableModel::new(4, vec![0.0, 0.5, 0.3, 0.2])
            .with_backoff(0.5)
            .with_transition(1, 2, 0.9)
            .with_transition(1, 3, 0.1)
    }

    #[test]
    fn test_known_context() {
        let dist = model()
            .score(&EncodedSequence::pad_pre(&[3, 1], 4, 0))
            .unwrap();
        assert_eq!(dist.as_slice(), &[0.0, 0.25, 0.9, 0.1]);
    }

    #[test]
    fn test_unknown_context_uses_unigram() {
        let m = model();
        let dist = m.score(&EncodedSequence::pad_pre(&[2], 4, 0)).unwrap();
        assert_eq!(dist.as_slice(), &[0.0, 0.5, 0.3, 0.2]);

        let dist = m.score(&EncodedSequence::pad_pre(&[], 4, 0)).unwrap();
        assert_eq!(dist.as_slice(), &[0.0, 0.5, 0.3, 0.2]);
    }

    #[test]
    fn test_input_shape_checked() {
        assert_eq!(
            model().score(&EncodedSequence::pad_pre(&[1], 3, 0)),
            Err(ModelInferenceError::InputShape {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_replace_transition() {
        let m = model().with_transition(1, 2, 0.2);
        let dist = m.score(&EncodedSequence::pad_pre(&[1], 4, 0)).unwrap();
        assert_eq!(dist.get(2), Some(0.2));
    }

    #[test]
    fn test_spec_round_trip() {
        let m = model().with_fingerprint(Some("v2".to_string()));
        let spec = m.to_spec();
        assert_eq!(spec.vocab_size, 4);
        assert_eq!(spec.transitions["1"]["2"], 0.9);

        let text = serde_json::to_string(&spec).unwrap();
        let parsed: BigramTableSpec = serde_json::from_str(&text).unwrap();
        let rebuilt = BigramTableModel::try_from_spec(parsed).unwrap();

        let contexts: [&[TokenId]; 4] = [&[], &[1], &[2], &[3, 1]];
        for ctx in contexts {
            let seq = EncodedSequence::pad_pre(ctx, 4, 0);
            assert_eq!(rebuilt.score(&seq), m.score(&seq));
        }
        assert_eq!(rebuilt.fingerprint(), Some("v2"));
    }

    #[test]
    fn test_spec_validation() {
        let base = model().to_spec();

        let mut spec = base.clone();
        spec.format = "keras".to_string();
        assert!(BigramTableModel::try_from_spec(spec).is_err());

        let mut spec = base.clone();
        spec.vocab_size = 5;
        assert!(BigramTableModel::try_from_spec(spec).is_err());

        let mut spec = base.clone();
        spec.backoff = f32::NAN;
        assert!(BigramTableModel::try_from_spec(spec).is_err());

        let mut spec = base.clone();
        spec.transitions
            .entry("1".to_string())
            .or_default()
            .insert("9".to_string(), 1.0);
        assert!(BigramTableModel::try_from_spec(spec).is_err());

        let mut spec = base;
        spec.transitions.insert("one".to_string(), BTreeMap::new());
        assert!(BigramTableModel::try_from_spec(spec).is_err());
    }
}
