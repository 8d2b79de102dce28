//! # Next-Word Model Trait

use std::sync::Arc;

use crate::{encoding::EncodedSequence, errors::ModelInferenceError, types::TokenId};

/// A score per vocabulary position; position `i` scores token id `i`.
///
/// Scores are only meaningful relative to each other; they are not
/// guaranteed to be normalized probabilities.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution {
    scores: Vec<f32>,
}

impl From<Vec<f32>> for Distribution {
    fn from(scores: Vec<f32>) -> Self {
        Self { scores }
    }
}

impl Distribution {
    /// The number of scored positions.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Is the distribution empty?
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The score of `id`, if in range.
    pub fn get(
        &self,
        id: TokenId,
    ) -> Option<f32> {
        self.scores.get(id as usize).copied()
    }

    /// The raw scores.
    pub fn as_slice(&self) -> &[f32] {
        &self.scores
    }

    /// Consume into the raw scores.
    pub fn into_vec(self) -> Vec<f32> {
        self.scores
    }
}

/// A pre-trained scoring function: ``score(sequence) -> distribution``.
///
/// The model is treated as opaque; implementations only declare the shapes
/// they accept and produce, so callers can validate around the call.
pub trait NextWordModel: Send + Sync {
    /// The sequence length the model was trained with.
    fn input_len(&self) -> usize;

    /// The width of the returned [`Distribution`].
    fn output_width(&self) -> usize;

    /// An optional pairing signature shared with the vocabulary artifact.
    fn fingerprint(&self) -> Option<&str> {
        None
    }

    /// Score the next word for `input`.
    fn score(
        &self,
        input: &EncodedSequence,
    ) -> Result<Distribution, ModelInferenceError>;
}

impl<M: NextWordModel + ?Sized> NextWordModel for Arc<M> {
    fn input_len(&self) -> usize {
        (**self).input_len()
    }

    fn output_width(&self) -> usize {
        (**self).output_width()
    }

    fn fingerprint(&self) -> Option<&str> {
        (**self).fingerprint()
    }

    fn score(
        &self,
        input: &EncodedSequence,
    ) -> Result<Distribution, ModelInferenceError> {
        (**self).score(input)
    }
}

/// Check that `input` has the model's input length.
pub fn check_input<M: NextWordModel + ?Sized>(
    model: &M,
    input: &EncodedSequence,
) -> Result<(), ModelInferenceError> {
    if input.len() != model.input_len() {
        return Err(ModelInferenceError::InputShape {
            expected: model.input_len(),
            actual: input.len(),
        });
    }
    Ok(())
}

/// Check that `distribution` has the model's declared output width.
pub fn check_output<M: NextWordModel + ?Sized>(
    model: &M,
    distribution: &Distribution,
) -> Result<(), ModelInferenceError> {
    if distribution.len() != model.output_width() {
        return Err(ModelInferenceError::OutputShape {
            expected: model.output_width(),
            actual: distribution.len(),
        });
    }
    Ok(())
}
